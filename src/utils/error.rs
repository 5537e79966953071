use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Artifact not found: {path}")]
    ArtifactNotFound { path: String },

    #[error("Failed to load artifact {path}: {reason}")]
    ArtifactLoadError { path: String, reason: String },

    #[error("Missing required field: {name}")]
    MissingField { name: String },

    #[error("could not convert field {name} to float: '{raw}'")]
    InvalidField { name: String, raw: String },

    #[error("Scaling failed: {detail}")]
    Scaling { detail: String },

    #[error("Inference failed: {detail}")]
    Inference { detail: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Input,
    Model,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::ArtifactNotFound { .. } | PredictError::ArtifactLoadError { .. } => {
                ErrorCategory::Artifact
            }
            PredictError::MissingField { .. } | PredictError::InvalidField { .. } => {
                ErrorCategory::Input
            }
            PredictError::Scaling { .. } | PredictError::Inference { .. } => ErrorCategory::Model,
            PredictError::ConfigError { .. } | PredictError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            PredictError::IoError(_)
            | PredictError::SerializationError(_)
            | PredictError::CsvError(_) => ErrorCategory::System,
        }
    }

    /// 請求層級的錯誤不會中止服務；啟動期錯誤為 Critical
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Model => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Artifact | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// True for failures caused by the caller's values rather than the artifacts.
    pub fn is_input_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    /// Name of the request stage that produced the error, if any.
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            PredictError::MissingField { .. } | PredictError::InvalidField { .. } => {
                Some("parsing")
            }
            PredictError::Scaling { .. } => Some("scaling"),
            PredictError::Inference { .. } => Some("inference"),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PredictError::ArtifactNotFound { path } => {
                format!("Model artifact '{}' does not exist", path)
            }
            PredictError::ArtifactLoadError { path, .. } => {
                format!("Model artifact '{}' is corrupt or has an unsupported format", path)
            }
            PredictError::MissingField { name } => format!("Please provide a value for {}", name),
            PredictError::InvalidField { name, raw } => {
                format!("'{}' is not a valid number for {}", raw, name)
            }
            PredictError::Scaling { .. } => "The input could not be normalized".to_string(),
            PredictError::Inference { .. } => "The model could not produce a prediction".to_string(),
            PredictError::ConfigError { message } => message.clone(),
            PredictError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Artifact => {
                "Check --model-path / --scaler-path and re-export the artifacts as JSON"
            }
            ErrorCategory::Input => "Submit all seven fields as plain numbers",
            ErrorCategory::Model => {
                "Make sure the scaler and model were exported from the same training run"
            }
            ErrorCategory::Configuration => "Review the command line flags and the TOML config",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_message_names_field_and_value() {
        let err = PredictError::InvalidField {
            name: "Age".to_string(),
            raw: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Age"));
        assert!(msg.contains("abc"));
        assert_eq!(err.stage(), Some("parsing"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_artifact_errors_are_critical() {
        let err = PredictError::ArtifactNotFound {
            path: "scaler.json".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Artifact);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_model_errors_are_not_input_errors() {
        let err = PredictError::Scaling {
            detail: "expected 7 features, got 6".to_string(),
        };
        assert!(!err.is_input_error());
        assert_eq!(err.stage(), Some("scaling"));
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
