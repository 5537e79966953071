#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::artifacts::{ArtifactPaths, DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

/// Values given explicitly on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub model_path: Option<String>,
    pub scaler_path: Option<String>,
    pub log_json: bool,
    pub verbose: bool,
}

/// Fully resolved settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub bind: String,
    pub model_path: String,
    pub scaler_path: String,
    pub log_format: String,
    pub verbose: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            model_path: DEFAULT_MODEL_PATH.to_string(),
            scaler_path: DEFAULT_SCALER_PATH.to_string(),
            log_format: "compact".to_string(),
            verbose: false,
        }
    }
}

impl ServiceConfig {
    /// CLI flags, then the TOML file, then built-in defaults.
    pub fn resolve(file: Option<&TomlConfig>, overrides: Overrides) -> Self {
        let defaults = Self::default();
        let from_file = |get: fn(&TomlConfig) -> Option<&str>| {
            file.and_then(get).map(str::to_string)
        };

        let log_format = if overrides.log_json {
            "json".to_string()
        } else {
            from_file(TomlConfig::log_format).unwrap_or(defaults.log_format)
        };

        Self {
            bind: overrides
                .bind
                .or_else(|| from_file(TomlConfig::bind))
                .unwrap_or(defaults.bind),
            model_path: overrides
                .model_path
                .or_else(|| from_file(TomlConfig::model_path))
                .unwrap_or(defaults.model_path),
            scaler_path: overrides
                .scaler_path
                .or_else(|| from_file(TomlConfig::scaler_path))
                .unwrap_or(defaults.scaler_path),
            log_format,
            verbose: overrides.verbose || file.and_then(TomlConfig::verbose).unwrap_or(false),
        }
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::from_config(self)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

impl ConfigProvider for ServiceConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn scaler_path(&self) -> &str {
        &self.scaler_path
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_bind_address("bind", &self.bind)?;
        validation::validate_path("model_path", &self.model_path)?;
        validation::validate_path("scaler_path", &self.scaler_path)?;
        validation::validate_one_of("log_format", &self.log_format, &LOG_FORMATS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = ServiceConfig::resolve(None, Overrides::default());
        assert_eq!(config, ServiceConfig::default());
        assert!(config.validate().is_ok());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_flags_override_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[server]
bind = "0.0.0.0:8000"

[artifacts]
model_path = "file-model.json"
scaler_path = "file-scaler.json"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = ServiceConfig::resolve(
            Some(&file),
            Overrides {
                model_path: Some("cli-model.json".to_string()),
                ..Overrides::default()
            },
        );

        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.model_path(), "cli-model.json");
        assert_eq!(config.scaler_path(), "file-scaler.json");
        assert!(config.json_logs());
    }

    #[test]
    fn test_log_json_flag() {
        let config = ServiceConfig::resolve(
            None,
            Overrides {
                log_json: true,
                verbose: true,
                ..Overrides::default()
            },
        );
        assert!(config.json_logs());
        assert!(config.verbose);
    }

    #[test]
    fn test_invalid_bind_fails_validation() {
        let config = ServiceConfig {
            bind: "nowhere".to_string(),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_artifact_paths() {
        let paths = ServiceConfig::default().artifact_paths();
        assert_eq!(paths, ArtifactPaths::default());
    }
}
