//! `${VAR_NAME}` substitution in config string values.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are matched. `$${VAR}` is an
//! escape and yields the literal text `${VAR}`.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

/// A reference, optionally escaped by a leading `$`.
static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\$)?\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute `${VAR}` references using the given variables.
///
/// Fails on the first reference to a variable that is unset or empty.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    Ok(match value {
        Value::String(s) => Value::String(substitute_string(s, env, path)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| substitute_value(item, env, &format!("{path}[{i}]")))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                out.insert(key.clone(), substitute_value(item, env, &child)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<String> = None;
    let replaced = REFERENCE_PATTERN.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if caps.get(1).is_some() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    if let Some(var_name) = missing {
        bail!(MissingEnvVarError {
            var_name,
            config_path: path.to_string(),
        });
    }
    Ok(replaced.into_owned())
}

/// Whether a string contains an unescaped env var reference.
pub fn contains_env_var_reference(s: &str) -> bool {
    REFERENCE_PATTERN
        .captures_iter(s)
        .any(|caps| caps.get(1).is_none())
}

/// All env var names referenced in a config value tree, sorted and deduplicated.
pub fn collect_referenced_vars(value: &Value) -> Vec<String> {
    let mut vars = Vec::new();
    collect_vars(value, &mut vars);
    vars.sort();
    vars.dedup();
    vars
}

fn collect_vars(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.extend(
            REFERENCE_PATTERN
                .captures_iter(s)
                .filter(|caps| caps.get(1).is_none())
                .map(|caps| caps[2].to_string()),
        ),
        Value::Array(items) => items.iter().for_each(|item| collect_vars(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_vars(item, out)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_nested_values() {
        let v = json!({"browser": {"userAgent": "a11yforge/${BUILD_ID} (${HOSTNAME})"}});
        let env = env(&[("BUILD_ID", "42"), ("HOSTNAME", "ci")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["browser"]["userAgent"], "a11yforge/42 (ci)");
    }

    #[test]
    fn error_names_var_and_path() {
        let v = json!({"logging": {"dir": "${LOG_ROOT}/a11yforge"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err();
        let missing = err.downcast_ref::<MissingEnvVarError>().unwrap();
        assert_eq!(missing.var_name, "LOG_ROOT");
        assert_eq!(missing.config_path, "logging.dir");
    }

    #[test]
    fn escaped_reference_is_literal() {
        let v = json!({"rules": ["$${NOT_A_VAR}", "plain"]});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result["rules"][0], "${NOT_A_VAR}");
        assert_eq!(result["rules"][1], "plain");
        assert!(!contains_env_var_reference("$${NOT_A_VAR}"));
    }

    #[test]
    fn collects_referenced_vars() {
        let v = json!({"a": "${FOO}", "b": {"c": ["${BAR}", "${FOO}"]}});
        assert_eq!(collect_referenced_vars(&v), vec!["BAR", "FOO"]);
    }
}
