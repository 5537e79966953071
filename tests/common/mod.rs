#![allow(dead_code)]

use calorie_serve::{load_artifacts, ArtifactPaths, PredictionContext};
use std::path::PathBuf;
use tempfile::TempDir;

pub const SCALER_JSON: &str = r#"{
    "type": "standard",
    "mean": [42.8, 0.5, 174.5, 75.0, 15.5, 95.5, 40.0],
    "scale": [16.9, 0.5, 14.3, 15.0, 8.3, 9.6, 0.8]
}"#;

/// Small relu network exported in the dense-layer layout.
pub const MODEL_JSON: &str = r#"{
    "input_dim": 7,
    "layers": [
        {
            "units": 3,
            "activation": "relu",
            "kernel": [
                [0.2, 0.1, -0.1],
                [-0.1, 0.0, 0.1],
                [0.05, 0.1, 0.0],
                [0.1, 0.2, 0.05],
                [0.9, 0.3, 0.4],
                [0.6, 0.2, 0.3],
                [0.3, 0.1, 0.2]
            ],
            "bias": [0.5, 0.1, 0.2]
        },
        {
            "units": 1,
            "activation": "linear",
            "kernel": [[60.0], [25.0], [30.0]],
            "bias": [89.5]
        }
    ]
}"#;

pub struct Fixture {
    pub dir: TempDir,
    pub paths: ArtifactPaths,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_contents(MODEL_JSON, SCALER_JSON)
    }

    pub fn with_contents(model: &str, scaler: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let model_path = dir.path().join("calorie_predictor_model.json");
        let scaler_path = dir.path().join("scaler.json");
        std::fs::write(&model_path, model).unwrap();
        std::fs::write(&scaler_path, scaler).unwrap();
        Self {
            dir,
            paths: ArtifactPaths::new(model_path, scaler_path),
        }
    }

    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn context(&self) -> PredictionContext {
        load_artifacts(&self.paths).unwrap()
    }
}

pub fn sample_form() -> String {
    "Age=25&Gender=0&Height=170&Weight=70&Duration=30&Heart_Rate=120&Body_Temp=37.0".to_string()
}

pub fn is_rounded_to_cents(value: f64) -> bool {
    let cents = value * 100.0;
    (cents - cents.round()).abs() < 1e-6
}
