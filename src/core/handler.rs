//! Shared prediction path used by every front end.
//!
//! `parse -> scale -> infer -> round`. Each stage returns a `Result` and a
//! failure stops the request; nothing downstream runs after an input error.

use crate::core::artifacts::PredictionContext;
use crate::domain::model::{round_to_cents, FeatureVector, Prediction, FEATURE_COUNT, FIELD_NAMES};
use crate::utils::error::{PredictError, Result};
use ndarray::Array2;
use std::collections::{BTreeMap, HashMap};

/// Named raw values as submitted by a caller.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldSource for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for [(&str, &str)] {
    fn field(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// Python-style float coercion: surrounding whitespace is ignored.
pub fn parse_number(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PredictError::InvalidField {
            name: name.to_string(),
            raw: raw.to_string(),
        })
}

/// Reads the seven fields in fitted order.
pub fn parse_fields<F: FieldSource + ?Sized>(source: &F) -> Result<FeatureVector> {
    let mut values = [0.0; FEATURE_COUNT];
    for (slot, name) in values.iter_mut().zip(FIELD_NAMES) {
        let raw = source.field(name).ok_or_else(|| PredictError::MissingField {
            name: name.to_string(),
        })?;
        *slot = parse_number(name, raw)?;
    }
    Ok(FeatureVector::new(values))
}

#[derive(Debug, Clone)]
pub struct PredictionHandler {
    context: PredictionContext,
}

impl PredictionHandler {
    pub fn new(context: PredictionContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &PredictionContext {
        &self.context
    }

    pub fn scale(&self, vector: &FeatureVector) -> Result<Array2<f64>> {
        let scaler = self.context.scaler();
        tracing::debug!(
            "Input data for scaling: {:?} ({} features, scaler expects {})",
            vector.values(),
            vector.len(),
            scaler.n_features_in()
        );

        scaler.transform(vector.to_batch().view()).map_err(|e| match e {
            PredictError::Scaling { .. } => e,
            other => PredictError::Scaling {
                detail: other.to_string(),
            },
        })
    }

    pub fn infer(&self, scaled: &Array2<f64>) -> Result<Prediction> {
        let output = self
            .context
            .model()
            .predict(scaled.view())
            .map_err(|e| match e {
                PredictError::Inference { .. } => e,
                other => PredictError::Inference {
                    detail: other.to_string(),
                },
            })?;

        let raw = output
            .get((0, 0))
            .copied()
            .ok_or_else(|| PredictError::Inference {
                detail: format!("model returned an empty output of shape {:?}", output.shape()),
            })?;

        if !raw.is_finite() {
            return Err(PredictError::Inference {
                detail: format!("model returned a non-finite value ({})", raw),
            });
        }

        let calories = round_to_cents(raw);
        if !calories.is_finite() {
            return Err(PredictError::Inference {
                detail: format!("model output {} does not round to a finite value", raw),
            });
        }

        Ok(Prediction { calories })
    }

    pub fn predict_vector(&self, vector: &FeatureVector) -> Result<Prediction> {
        let scaled = self.scale(vector)?;
        self.infer(&scaled)
    }

    /// Full request path for raw submitted fields.
    pub fn handle<F: FieldSource + ?Sized>(&self, source: &F) -> Result<Prediction> {
        let result = parse_fields(source).and_then(|vector| self.predict_vector(&vector));
        match &result {
            Ok(prediction) => tracing::info!("Predicted {} calories", prediction),
            Err(e) => tracing::warn!(
                "Prediction failed at {} stage: {}",
                e.stage().unwrap_or("unknown"),
                e
            ),
        }
        result
    }
}
