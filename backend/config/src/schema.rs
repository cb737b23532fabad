//! a11yforge runtime configuration schema.
//!
//! Typed for serde YAML/JSON deserialization. Every section is optional so
//! a partial file (or none at all) is valid input.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for a11yforge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct A11yForgeConfig {
    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Page loading configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<BrowserConfig>,

    /// Evaluation defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationConfig>,

    /// Crawler limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawler: Option<CrawlerConfig>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>, // "trace" | "debug" | "info" | "warn" | "error"
    /// Directory for rolling log files; no file logging when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

// ---------------------------------------------------------------------------
// Browser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Per-request timeout for pages and stylesheets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<ViewportConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landscape: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_evaluations: Option<usize>,
    /// Keep going quietly when pages fail to load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<ModulesConfig>,
    /// Rule filters keyed by module ("act", "html", "css", "bp")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RulesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModulesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act: Option<RuleFilterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<RuleFilterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<RuleFilterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp: Option<RuleFilterConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleFilterConfig {
    /// Only these rule codes run when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

// ---------------------------------------------------------------------------
// Crawler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_urls: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_crawls: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
logging:
  level: debug
browser:
  userAgent: "a11yforge-test"
  timeoutSecs: 10
  viewport:
    mobile: true
evaluation:
  maxParallelEvaluations: 4
  modules:
    css: false
  rules:
    act:
      exclude: ["QW-ACT-R1"]
crawler:
  maxDepth: 2
"#;
        let cfg: A11yForgeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.logging.unwrap().level.unwrap(), "debug");
        let browser = cfg.browser.unwrap();
        assert_eq!(browser.timeout_secs, Some(10));
        assert_eq!(browser.viewport.unwrap().mobile, Some(true));
        let evaluation = cfg.evaluation.unwrap();
        assert_eq!(evaluation.max_parallel_evaluations, Some(4));
        assert_eq!(evaluation.modules.unwrap().css, Some(false));
        assert_eq!(
            evaluation.rules.unwrap().act.unwrap().exclude,
            vec!["QW-ACT-R1".to_string()]
        );
        assert_eq!(cfg.crawler.unwrap().max_depth, Some(2));
    }

    #[test]
    fn empty_document_is_default() {
        let cfg: A11yForgeConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, A11yForgeConfig::default());
    }
}
