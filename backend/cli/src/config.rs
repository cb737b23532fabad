use std::path::{Path, PathBuf};

use a11yforge_config::{config_dir, config_file_path, load_and_prepare, A11yForgeConfig};
use anyhow::Result;
use logging::LoggerOptions;
use serde_json::{Map, Value};

/// Command-line flags that override config file values, collected as a
/// JSON merge patch.
#[derive(Debug, Default)]
pub struct Overrides(Map<String, Value>);

impl Overrides {
    /// Set a camelCase config path, e.g. `["evaluation", "force"]`.
    pub fn set(&mut self, path: &[&str], value: impl Into<Value>) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut map = &mut self.0;
        for key in parents {
            let entry = map
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(child) = entry else {
                return;
            };
            map = child;
        }
        map.insert(last.to_string(), value.into());
    }

    pub fn set_opt<T: Into<Value>>(&mut self, path: &[&str], value: Option<T>) {
        if let Some(value) = value {
            self.set(path, value);
        }
    }

    pub fn into_patch(self) -> Value {
        Value::Object(self.0)
    }
}

/// `--config` when given, else `config.yaml` in the config directory.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_file_path(&config_dir()))
}

pub async fn load(explicit: Option<&Path>, overrides: Overrides) -> Result<A11yForgeConfig> {
    let path = config_path(explicit);
    load_and_prepare(&path, Some(&overrides.into_patch())).await
}

pub fn logger_options(config: &A11yForgeConfig) -> LoggerOptions {
    let defaults = LoggerOptions::default();
    let Some(logging) = &config.logging else {
        return defaults;
    };
    LoggerOptions {
        level: logging.level.clone().unwrap_or(defaults.level),
        json: logging.json.unwrap_or(defaults.json),
        log_dir: logging.dir.as_ref().map(PathBuf::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_nested_patch() {
        let mut overrides = Overrides::default();
        overrides.set(&["evaluation", "force"], true);
        overrides.set(&["evaluation", "modules", "css"], false);
        overrides.set_opt(&["browser", "userAgent"], None::<String>);
        overrides.set_opt(&["crawler", "maxDepth"], Some(2));
        assert_eq!(
            overrides.into_patch(),
            json!({
                "evaluation": { "force": true, "modules": { "css": false } },
                "crawler": { "maxDepth": 2 }
            })
        );
    }

    #[tokio::test]
    async fn overrides_reach_the_config() {
        let dir = std::env::temp_dir().join("a11yforge-cli-missing");
        let mut overrides = Overrides::default();
        overrides.set(&["logging", "level"], "debug");
        overrides.set(&["logging", "json"], true);
        let config = load(Some(&dir.join("config.yaml")), overrides).await.unwrap();

        let options = logger_options(&config);
        assert_eq!(options.level, "debug");
        assert!(options.json);
        assert!(options.log_dir.is_none());
    }
}
