//! Loads the model and scaler artifacts once at startup.
//!
//! A missing file is reported as [`PredictError::ArtifactNotFound`]; a file
//! that exists but does not deserialize into a consistent artifact is
//! [`PredictError::ArtifactLoadError`]. Both are fatal for the server.

use crate::core::network::{DenseNetwork, NetworkSpec};
use crate::core::scaler::ScalerSpec;
use crate::domain::model::FEATURE_COUNT;
use crate::domain::ports::{ConfigProvider, Model, Scaler};
use crate::utils::error::{PredictError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_MODEL_PATH: &str = "calorie_predictor_model.json";
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    pub fn new(model: impl Into<PathBuf>, scaler: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            scaler: scaler.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.model_path(), config.scaler_path())
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH)
    }
}

/// Immutable handles shared by every request.
#[derive(Clone)]
pub struct PredictionContext {
    model: Arc<dyn Model>,
    scaler: Arc<dyn Scaler>,
    loaded_at: DateTime<Utc>,
}

impl std::fmt::Debug for PredictionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionContext")
            .field("model_input_dim", &self.model.input_dim())
            .field("scaler_features", &self.scaler.n_features_in())
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}

impl PredictionContext {
    pub fn new(model: Arc<dyn Model>, scaler: Arc<dyn Scaler>) -> Self {
        Self {
            model,
            scaler,
            loaded_at: Utc::now(),
        }
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let display = path.display().to_string();
    let content = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PredictError::ArtifactNotFound {
            path: display.clone(),
        },
        _ => PredictError::ArtifactLoadError {
            path: display.clone(),
            reason: e.to_string(),
        },
    })?;

    serde_json::from_slice(&content).map_err(|e| PredictError::ArtifactLoadError {
        path: display,
        reason: e.to_string(),
    })
}

pub fn load_scaler(path: &Path) -> Result<ScalerSpec> {
    let scaler: ScalerSpec = read_json(path)?;
    scaler
        .check_consistency()
        .map_err(|reason| PredictError::ArtifactLoadError {
            path: path.display().to_string(),
            reason,
        })?;
    Ok(scaler)
}

pub fn load_model(path: &Path) -> Result<DenseNetwork> {
    let spec: NetworkSpec = read_json(path)?;
    DenseNetwork::from_spec(spec).map_err(|reason| PredictError::ArtifactLoadError {
        path: path.display().to_string(),
        reason,
    })
}

/// Loads both artifacts. Call once per process and share the result.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<PredictionContext> {
    tracing::info!("Loading model from {}", paths.model.display());
    let model = load_model(&paths.model)?;
    tracing::info!(
        "Model loaded: {} layers, input_dim={}, output_dim={}",
        model.layer_count(),
        model.input_dim(),
        model.output_dim()
    );

    tracing::info!("Loading scaler from {}", paths.scaler.display());
    let scaler = load_scaler(&paths.scaler)?;
    tracing::info!("Scaler loaded: expects {} features", scaler.n_features_in());

    // 維度不一致不阻止啟動；請求時會回報 scaling / inference 錯誤
    if scaler.n_features_in() != FEATURE_COUNT {
        tracing::warn!(
            "Scaler expects {} features but requests carry {}",
            scaler.n_features_in(),
            FEATURE_COUNT
        );
    }
    if model.input_dim() != scaler.n_features_in() {
        tracing::warn!(
            "Model input_dim {} differs from scaler output width {}",
            model.input_dim(),
            scaler.n_features_in()
        );
    }

    Ok(PredictionContext::new(Arc::new(model), Arc::new(scaler)))
}
