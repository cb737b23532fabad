//! Config validation: deep schema checks with user-friendly error messages.

use crate::schema::{A11yForgeConfig, RuleFilterConfig};
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &A11yForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_logging(config, &mut report);
    validate_browser(config, &mut report);
    validate_evaluation(config, &mut report);
    validate_crawler(config, &mut report);
    report
}

fn validate_logging(config: &A11yForgeConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            report.error(
                "logging.level",
                format!("Unknown log level '{level}'. Use one of {}", LOG_LEVELS.join(", ")),
            );
        }
    }
}

fn validate_browser(config: &A11yForgeConfig, report: &mut ValidationReport) {
    let Some(browser) = &config.browser else { return };
    if browser.timeout_secs == Some(0) {
        report.error("browser.timeoutSecs", "timeoutSecs must be > 0");
    }
    if let Some(ua) = &browser.user_agent {
        if ua.trim().is_empty() {
            report.warn("browser.userAgent", "Empty user agent; the default will be used");
        }
    }
    if let Some(viewport) = &browser.viewport {
        if viewport.width == Some(0) {
            report.error("browser.viewport.width", "width must be > 0");
        }
        if viewport.height == Some(0) {
            report.error("browser.viewport.height", "height must be > 0");
        }
    }
}

fn validate_evaluation(config: &A11yForgeConfig, report: &mut ValidationReport) {
    let Some(evaluation) = &config.evaluation else { return };
    if evaluation.max_parallel_evaluations == Some(0) {
        report.error(
            "evaluation.maxParallelEvaluations",
            "maxParallelEvaluations must be >= 1",
        );
    }
    if let Some(modules) = &evaluation.modules {
        let flags = [modules.act, modules.html, modules.css, modules.bp];
        if flags.iter().all(|flag| *flag == Some(false)) {
            report.warn("evaluation.modules", "All modules are disabled; reports will be empty");
        }
    }
    if let Some(rules) = &evaluation.rules {
        for (name, filter) in [
            ("act", &rules.act),
            ("html", &rules.html),
            ("css", &rules.css),
            ("bp", &rules.bp),
        ] {
            if let Some(filter) = filter {
                validate_rule_filter(&format!("evaluation.rules.{name}"), filter, report);
            }
        }
    }
}

fn validate_rule_filter(path: &str, filter: &RuleFilterConfig, report: &mut ValidationReport) {
    let codes = filter.rules.iter().flatten().chain(filter.exclude.iter());
    for code in codes {
        if code.trim().is_empty() {
            report.error(path, "Rule code cannot be empty");
        } else if !code.to_ascii_uppercase().starts_with("QW-") {
            report.warn(path, format!("'{code}' does not look like a rule code"));
        }
    }
    if filter.rules.as_ref().is_some_and(Vec::is_empty) {
        report.warn(format!("{path}.rules"), "Empty rule list; no rule of this module will run");
    }
}

fn validate_crawler(config: &A11yForgeConfig, report: &mut ValidationReport) {
    let Some(crawler) = &config.crawler else { return };
    if crawler.max_parallel_crawls == Some(0) {
        report.error("crawler.maxParallelCrawls", "maxParallelCrawls must be >= 1");
    }
    if crawler.max_urls == Some(0) {
        report.warn("crawler.maxUrls", "maxUrls is 0; crawls will find nothing");
    }
    if crawler.timeout_secs == Some(0) {
        report.error("crawler.timeoutSecs", "timeoutSecs must be > 0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CrawlerConfig, EvaluationConfig, LoggingConfig, RulesConfig};

    #[test]
    fn empty_config_is_valid() {
        let report = validate(&A11yForgeConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn zero_parallelism_is_error() {
        let mut cfg = A11yForgeConfig::default();
        cfg.evaluation = Some(EvaluationConfig {
            max_parallel_evaluations: Some(0),
            ..Default::default()
        });
        cfg.crawler = Some(CrawlerConfig {
            max_parallel_crawls: Some(0),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].path.contains("maxParallelEvaluations"));
    }

    #[test]
    fn unknown_level_is_error() {
        let mut cfg = A11yForgeConfig::default();
        cfg.logging = Some(LoggingConfig {
            level: Some("verbose".to_string()),
            ..Default::default()
        });
        assert!(!validate(&cfg).is_valid());
    }

    #[test]
    fn odd_rule_codes_are_warnings() {
        let mut cfg = A11yForgeConfig::default();
        cfg.evaluation = Some(EvaluationConfig {
            rules: Some(RulesConfig {
                css: Some(RuleFilterConfig {
                    rules: None,
                    exclude: vec!["font-size".to_string(), "qw-css-t2".to_string()],
                }),
                ..Default::default()
            }),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "evaluation.rules.css");
    }
}
