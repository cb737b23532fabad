//! `a11yforge-config`: runtime configuration management.
//!
//! Provides:
//! - Typed config schema (logging, browser, evaluation, crawler)
//! - YAML read/write with backup rotation
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Schema validation
//! - RFC 7396 merge patches for command-line overrides

pub mod defaults;
pub mod env;
pub mod io;
pub mod options;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    collect_referenced_vars, contains_env_var_reference, resolve_env_vars, resolve_env_vars_with,
    MissingEnvVarError,
};
pub use io::{
    apply_merge_patch, config_dir, config_file_path, json_merge_patch, load_config,
    load_config_value, write_config,
};
pub use schema::{
    A11yForgeConfig, BrowserConfig, CrawlerConfig, EvaluationConfig, LoggingConfig,
    ModulesConfig, RuleFilterConfig, RulesConfig, ViewportConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load, apply env substitution and overrides, apply defaults, and validate.
///
/// `overrides` is a JSON merge patch applied before defaults, so flags win
/// over the file. Validation errors fail the load; warnings are logged.
pub async fn load_and_prepare(path: &Path, overrides: Option<&Value>) -> Result<A11yForgeConfig> {
    let raw = load_config_value(path).await?;

    let mut value = resolve_env_vars(&raw).context("Failed to resolve env vars in config")?;
    if let Some(patch) = overrides {
        json_merge_patch(&mut value, patch);
    }

    let config: A11yForgeConfig = serde_json::from_value(value)
        .with_context(|| format!("Invalid config at: {}", path.display()))?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if let Some(first) = report.errors.first() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        bail!("{first}");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn overrides_beat_defaults() {
        let path = std::env::temp_dir().join("a11yforge-no-such-dir/config.yaml");
        let patch = json!({ "evaluation": { "maxParallelEvaluations": 2 } });
        let cfg = load_and_prepare(&path, Some(&patch)).await.unwrap();
        assert_eq!(cfg.evaluation.unwrap().max_parallel_evaluations, Some(2));
        assert_eq!(cfg.logging.unwrap().level.as_deref(), Some("info"));
    }

    #[tokio::test]
    async fn invalid_values_fail_the_load() {
        let path = std::env::temp_dir().join("a11yforge-no-such-dir/config.yaml");
        let patch = json!({ "crawler": { "maxParallelCrawls": 0 } });
        let err = load_and_prepare(&path, Some(&patch)).await.unwrap_err();
        assert!(err.to_string().contains("crawler.maxParallelCrawls"));
    }
}
