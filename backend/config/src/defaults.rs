//! Config defaults: applies sensible default values to parsed config.

use crate::schema::{
    A11yForgeConfig, BrowserConfig, CrawlerConfig, EvaluationConfig, LoggingConfig, ModulesConfig,
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default per-request timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of pages evaluated at once.
pub const DEFAULT_MAX_PARALLEL_EVALUATIONS: usize = 5;

/// Default crawl depth below the start URL.
pub const DEFAULT_CRAWL_MAX_DEPTH: u32 = 1;

/// Default number of pages fetched at once while crawling.
pub const DEFAULT_CRAWL_MAX_PARALLEL: usize = 5;

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: A11yForgeConfig) -> A11yForgeConfig {
    let config = apply_logging_defaults(config);
    let config = apply_browser_defaults(config);
    let config = apply_evaluation_defaults(config);
    apply_crawler_defaults(config)
}

fn apply_logging_defaults(mut config: A11yForgeConfig) -> A11yForgeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }
    config
}

fn apply_browser_defaults(mut config: A11yForgeConfig) -> A11yForgeConfig {
    let browser = config.browser.get_or_insert_with(BrowserConfig::default);
    if browser.timeout_secs.is_none() {
        browser.timeout_secs = Some(DEFAULT_TIMEOUT_SECS);
    }
    config
}

/// Every module runs unless switched off explicitly.
fn apply_evaluation_defaults(mut config: A11yForgeConfig) -> A11yForgeConfig {
    let evaluation = config.evaluation.get_or_insert_with(EvaluationConfig::default);
    if evaluation.max_parallel_evaluations.is_none() {
        evaluation.max_parallel_evaluations = Some(DEFAULT_MAX_PARALLEL_EVALUATIONS);
    }
    if evaluation.force.is_none() {
        evaluation.force = Some(false);
    }
    let modules = evaluation.modules.get_or_insert_with(ModulesConfig::default);
    for flag in [
        &mut modules.act,
        &mut modules.html,
        &mut modules.css,
        &mut modules.bp,
    ] {
        flag.get_or_insert(true);
    }
    config
}

fn apply_crawler_defaults(mut config: A11yForgeConfig) -> A11yForgeConfig {
    let crawler = config.crawler.get_or_insert_with(CrawlerConfig::default);
    if crawler.max_depth.is_none() {
        crawler.max_depth = Some(DEFAULT_CRAWL_MAX_DEPTH);
    }
    if crawler.max_parallel_crawls.is_none() {
        crawler.max_parallel_crawls = Some(DEFAULT_CRAWL_MAX_PARALLEL);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_evaluation_defaults() {
        let cfg = apply_all_defaults(A11yForgeConfig::default());
        let evaluation = cfg.evaluation.unwrap();
        assert_eq!(
            evaluation.max_parallel_evaluations.unwrap(),
            DEFAULT_MAX_PARALLEL_EVALUATIONS
        );
        let modules = evaluation.modules.unwrap();
        assert_eq!(modules.act, Some(true));
        assert_eq!(modules.bp, Some(true));
        assert_eq!(cfg.logging.unwrap().level.unwrap(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = A11yForgeConfig::default();
        cfg.evaluation = Some(EvaluationConfig {
            max_parallel_evaluations: Some(2),
            modules: Some(ModulesConfig {
                css: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        });
        cfg.crawler = Some(CrawlerConfig {
            max_depth: Some(3),
            ..Default::default()
        });
        let cfg = apply_all_defaults(cfg);
        let evaluation = cfg.evaluation.unwrap();
        assert_eq!(evaluation.max_parallel_evaluations, Some(2));
        assert_eq!(evaluation.modules.unwrap().css, Some(false));
        let crawler = cfg.crawler.unwrap();
        assert_eq!(crawler.max_depth, Some(3));
        assert_eq!(crawler.max_parallel_crawls, Some(DEFAULT_CRAWL_MAX_PARALLEL));
    }
}
