use serde::{Deserialize, Serialize};

use crate::types::ModuleKind;

/// Pseudo-URL under which raw HTML input is evaluated.
pub const CUSTOM_HTML_URL: &str = "customHtml";

/// Everything an evaluation run can be configured with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOptions {
    /// A single page to evaluate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Additional pages to evaluate
    #[serde(default)]
    pub urls: Vec<String>,

    /// Path to a file listing one URL per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Start URL of a domain to crawl for pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl: Option<String>,

    #[serde(default)]
    pub crawl_options: CrawlOptions,

    /// Raw markup evaluated under [`CUSTOM_HTML_URL`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_evaluations: Option<usize>,

    /// Keep quiet about pages that fail to load
    #[serde(default)]
    pub force: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute: Option<ModulesToExecute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<ViewportOptions>,

    #[serde(default)]
    pub act_rules: RuleFilter,

    #[serde(default)]
    pub html_techniques: RuleFilter,

    #[serde(default)]
    pub css_techniques: RuleFilter,

    #[serde(default)]
    pub best_practices: RuleFilter,
}

impl EvaluationOptions {
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn for_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Default::default()
        }
    }

    /// Rule filter configured for a module.
    pub fn filter_for(&self, kind: ModuleKind) -> &RuleFilter {
        match kind {
            ModuleKind::ActRules => &self.act_rules,
            ModuleKind::HtmlTechniques => &self.html_techniques,
            ModuleKind::CssTechniques => &self.css_techniques,
            ModuleKind::BestPractices => &self.best_practices,
        }
    }
}

/// Which evaluation modules run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModulesToExecute {
    #[serde(default)]
    pub act: bool,
    #[serde(default)]
    pub html: bool,
    #[serde(default)]
    pub css: bool,
    #[serde(default)]
    pub bp: bool,
}

impl Default for ModulesToExecute {
    fn default() -> Self {
        Self {
            act: true,
            html: true,
            css: true,
            bp: true,
        }
    }
}

impl ModulesToExecute {
    pub fn none() -> Self {
        Self {
            act: false,
            html: false,
            css: false,
            bp: false,
        }
    }

    pub fn from_kinds(kinds: &[ModuleKind]) -> Self {
        let mut modules = Self::none();
        for kind in kinds {
            modules.set(*kind, true);
        }
        modules
    }

    pub fn is_enabled(&self, kind: ModuleKind) -> bool {
        match kind {
            ModuleKind::ActRules => self.act,
            ModuleKind::HtmlTechniques => self.html,
            ModuleKind::CssTechniques => self.css,
            ModuleKind::BestPractices => self.bp,
        }
    }

    pub fn set(&mut self, kind: ModuleKind, enabled: bool) {
        match kind {
            ModuleKind::ActRules => self.act = enabled,
            ModuleKind::HtmlTechniques => self.html = enabled,
            ModuleKind::CssTechniques => self.css = enabled,
            ModuleKind::BestPractices => self.bp = enabled,
        }
    }

    pub fn enabled(&self) -> Vec<ModuleKind> {
        ModuleKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }
}

/// Selects which rules of a module run, by code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleFilter {
    /// Run only these rules (all when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    /// Never run these rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl RuleFilter {
    pub fn allows(&self, code: &str) -> bool {
        if self.exclude.iter().any(|c| c.eq_ignore_ascii_case(code)) {
            return false;
        }
        match &self.rules {
            Some(rules) => rules.iter().any(|c| c.eq_ignore_ascii_case(code)),
            None => true,
        }
    }
}

/// Page emulation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewportOptions {
    #[serde(default)]
    pub mobile: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landscape: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ResolutionOptions>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Limits for domain crawling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    pub max_depth: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_urls: Option<usize>,
    pub max_parallel_crawls: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 1,
            max_urls: None,
            max_parallel_crawls: 5,
            timeout_secs: None,
        }
    }
}
