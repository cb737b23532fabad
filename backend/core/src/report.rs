//! Evaluation report types.
//!
//! A report is built bottom-up: test results are recorded on a [`RuleReport`],
//! finished rule reports are inserted into a [`ModuleReport`], and module
//! reports are folded into the page's [`EvaluationReport`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::options::CUSTOM_HTML_URL;
use crate::types::{ModuleKind, Outcome, Verdict};

/// Tallies of verdicts or outcomes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Counts {
    pub passed: u32,
    pub warning: u32,
    pub failed: u32,
    pub inapplicable: u32,
}

impl Counts {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::Warning => self.warning += 1,
            Verdict::Failed => self.failed += 1,
            Verdict::Inapplicable => self.inapplicable += 1,
        }
    }

    pub fn merge(&mut self, other: &Counts) {
        self.passed += other.passed;
        self.warning += other.warning;
        self.failed += other.failed;
        self.inapplicable += other.inapplicable;
    }

    pub fn total(&self) -> u32 {
        self.passed + self.warning + self.failed + self.inapplicable
    }
}

/// An element a test result refers to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElementReport {
    /// Unique CSS path to the element
    pub pointer: String,
    /// Outer HTML of the element
    pub html_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_name: Option<String>,
}

/// One test performed by a rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub verdict: Verdict,
    pub description: String,
    pub result_code: String,
    #[serde(default)]
    pub elements: Vec<ElementReport>,
}

impl TestResult {
    pub fn new(verdict: Verdict, result_code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            verdict,
            description: description.into(),
            result_code: result_code.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: ElementReport) -> Self {
        self.elements.push(element);
        self
    }
}

/// A WCAG success criterion a rule maps to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessCriterion {
    pub name: String,
    pub level: String,
    pub principle: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    /// Selector of the elements the rule applies to
    pub target: String,
    #[serde(default)]
    pub success_criteria: Vec<SuccessCriterion>,
    #[serde(default)]
    pub related: Vec<String>,
    pub url: String,
    pub passed: u32,
    pub warning: u32,
    pub failed: u32,
    pub inapplicable: u32,
    pub outcome: Outcome,
    pub description: String,
}

impl RuleMetadata {
    /// Count a verdict and raise the outcome if it is worse.
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::Warning => self.warning += 1,
            Verdict::Failed => self.failed += 1,
            Verdict::Inapplicable => self.inapplicable += 1,
        }
        self.outcome = self.outcome.max(Outcome::from(verdict));
        self.description = self.outcome.description().to_string();
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// The results of one rule on one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleReport {
    pub code: String,
    pub name: String,
    /// Code of the WCAG technique or ACT rule this maps to
    pub mapping: String,
    pub description: String,
    pub metadata: RuleMetadata,
    pub results: Vec<TestResult>,
}

impl RuleReport {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        mapping: impl Into<String>,
        description: impl Into<String>,
        metadata: RuleMetadata,
    ) -> Self {
        let mut metadata = metadata;
        metadata.description = metadata.outcome.description().to_string();
        Self {
            code: code.into(),
            name: name.into(),
            mapping: mapping.into(),
            description: description.into(),
            metadata,
            results: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: TestResult) {
        self.metadata.record(result.verdict);
        self.results.push(result);
    }

    pub fn outcome(&self) -> Outcome {
        self.metadata.outcome
    }
}

/// The results of one module on one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleReport {
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    /// Number of rules per outcome
    pub metadata: Counts,
    pub assertions: BTreeMap<String, RuleReport>,
}

impl ModuleReport {
    pub fn new(kind: ModuleKind) -> Self {
        Self {
            kind,
            metadata: Counts::default(),
            assertions: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, report: RuleReport) {
        self.metadata.record(report.outcome().into());
        self.assertions.insert(report.code.clone(), report);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UrlInfo {
    pub input_url: String,
    pub protocol: String,
    pub domain_name: String,
    pub domain: String,
    pub uri: String,
    pub complete_url: String,
}

impl UrlInfo {
    /// Split an input URL into its report parts.
    ///
    /// Raw-HTML evaluations and unparsable URLs keep only `input_url`.
    pub fn parse(input_url: &str) -> Self {
        let blank = Self {
            input_url: input_url.to_string(),
            ..Default::default()
        };
        if input_url == CUSTOM_HTML_URL {
            return blank;
        }
        let Ok(parsed) = url::Url::parse(input_url) else {
            return blank;
        };

        let domain_name = parsed.host_str().unwrap_or_default().to_string();
        let domain = domain_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        let mut uri = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            uri.push('?');
            uri.push_str(query);
        }

        Self {
            input_url: input_url.to_string(),
            protocol: parsed.scheme().to_string(),
            domain_name,
            domain,
            uri,
            complete_url: parsed.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewportInfo {
    pub mobile: bool,
    pub landscape: bool,
    pub user_agent: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub element_count: usize,
    pub html_length: usize,
    pub stylesheet_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub viewport: ViewportInfo,
    pub dom: DomInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub date: DateTime<Utc>,
    pub url: UrlInfo,
    pub page: PageInfo,
}

impl SystemInfo {
    pub fn new(url: UrlInfo, page: PageInfo) -> Self {
        Self {
            name: "a11yforge".to_string(),
            description: "Automated web accessibility evaluator".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            date: Utc::now(),
            url,
            page,
        }
    }
}

/// The complete evaluation of one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationReport {
    #[serde(rename = "type")]
    pub report_type: String,
    pub system: SystemInfo,
    /// Number of rules per outcome, across modules
    pub metadata: Counts,
    pub modules: BTreeMap<ModuleKind, ModuleReport>,
}

impl EvaluationReport {
    pub fn new(system: SystemInfo) -> Self {
        Self {
            report_type: "evaluation".to_string(),
            system,
            metadata: Counts::default(),
            modules: BTreeMap::new(),
        }
    }

    pub fn add_module(&mut self, module: ModuleReport) {
        self.metadata.merge(&module.metadata);
        self.modules.insert(module.kind, module);
    }

    /// Every rule report, across modules.
    pub fn rules(&self) -> impl Iterator<Item = &RuleReport> {
        self.modules.values().flat_map(|m| m.assertions.values())
    }
}
