//! Fitted feature scalers read from `scaler.json`.
//!
//! Two transforms are supported, matching what the training side exports:
//! standardization (`(x - mean) / scale`) and min-max scaling into a
//! feature range.

use crate::domain::ports::Scaler;
use crate::utils::error::{PredictError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScalerSpec {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
    #[serde(default = "default_feature_range")]
    pub feature_range: (f64, f64),
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Zero-width columns would divide by zero; they are left unscaled instead.
fn non_zero(values: Array1<f64>) -> Array1<f64> {
    values.mapv_into(|v| if v == 0.0 { 1.0 } else { v })
}

fn row(values: &[f64]) -> ArrayView2<'_, f64> {
    ArrayView1::from(values).insert_axis(Axis(0))
}

fn check_columns(batch: &ArrayView2<'_, f64>, expected: usize) -> Result<()> {
    if batch.ncols() != expected {
        return Err(PredictError::Scaling {
            detail: format!(
                "X has {} features, but the scaler is expecting {} features as input",
                batch.ncols(),
                expected
            ),
        });
    }
    Ok(())
}

impl ScalerSpec {
    /// Checks that the fitted vectors agree with each other.
    pub fn check_consistency(&self) -> std::result::Result<(), String> {
        let (a, b, names) = match self {
            ScalerSpec::Standard(s) => (s.mean.len(), s.scale.len(), ("mean", "scale")),
            ScalerSpec::MinMax(s) => (s.data_min.len(), s.data_max.len(), ("data_min", "data_max")),
        };
        if a == 0 {
            return Err(format!("{} is empty", names.0));
        }
        if a != b {
            return Err(format!(
                "{} has {} entries but {} has {}",
                names.0, a, names.1, b
            ));
        }
        if let ScalerSpec::MinMax(s) = self {
            if s.feature_range.0 >= s.feature_range.1 {
                return Err(format!(
                    "feature_range minimum {} must be below maximum {}",
                    s.feature_range.0, s.feature_range.1
                ));
            }
        }
        Ok(())
    }
}

impl Scaler for ScalerSpec {
    fn n_features_in(&self) -> usize {
        match self {
            ScalerSpec::Standard(s) => s.mean.len(),
            ScalerSpec::MinMax(s) => s.data_min.len(),
        }
    }

    fn transform(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        check_columns(&batch, self.n_features_in())?;

        let scaled = match self {
            ScalerSpec::Standard(s) => {
                let scale = non_zero(Array1::from(s.scale.clone()));
                (&batch - &row(&s.mean)) / &scale.insert_axis(Axis(0))
            }
            ScalerSpec::MinMax(s) => {
                let (lo, hi) = s.feature_range;
                let span = non_zero(
                    &ArrayView1::from(&s.data_max[..]) - &ArrayView1::from(&s.data_min[..]),
                );
                let unit = (&batch - &row(&s.data_min)) / &span.insert_axis(Axis(0));
                unit * (hi - lo) + lo
            }
        };
        Ok(scaled)
    }
}
