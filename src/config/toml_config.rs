use crate::utils::error::{PredictError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub artifacts: Option<ArtifactsSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactsSection {
    pub model_path: Option<String>,
    pub scaler_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.bind.as_deref())
    }

    pub fn model_path(&self) -> Option<&str> {
        self.artifacts.as_ref().and_then(|a| a.model_path.as_deref())
    }

    pub fn scaler_path(&self) -> Option<&str> {
        self.artifacts.as_ref().and_then(|a| a.scaler_path.as_deref())
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }

    pub fn verbose(&self) -> Option<bool> {
        self.logging.as_ref().and_then(|l| l.verbose)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        if let Some(bind) = self.bind() {
            validate_bind_address("server.bind", bind)?;
        }
        if let Some(path) = self.model_path() {
            validate_path("artifacts.model_path", path)?;
        }
        if let Some(path) = self.scaler_path() {
            validate_path("artifacts.scaler_path", path)?;
        }
        if let Some(format) = self.log_format() {
            validate_one_of("logging.format", format, &super::LOG_FORMATS)?;
        }
        Ok(())
    }
}
