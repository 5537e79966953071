use crate::utils::error::Result;
use ndarray::{Array2, ArrayView2};

/// A fitted feature transformation. Errors should be `PredictError::Scaling`.
pub trait Scaler: Send + Sync {
    fn n_features_in(&self) -> usize;
    fn transform(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>>;
}

/// A trained regression model. Returns one row per input row.
/// Errors should be `PredictError::Inference`.
pub trait Model: Send + Sync {
    fn input_dim(&self) -> usize;

    /// Number of layers, for diagnostics.
    fn layer_count(&self) -> usize {
        1
    }

    fn predict(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn model_path(&self) -> &str;
    fn scaler_path(&self) -> &str;
}
