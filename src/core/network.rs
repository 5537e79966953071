//! Sequential dense regression network read from the model artifact.
//!
//! The on-disk layout follows Keras `Dense` layers: each kernel is stored
//! as `input x units` rows so an exported `get_weights()` dump can be
//! written out without transposing.

use crate::domain::ports::Model;
use crate::utils::error::{PredictError, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    fn apply(self, x: Array2<f64>) -> Array2<f64> {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.mapv_into(|v| v.max(0.0)),
            Activation::Sigmoid => x.mapv_into(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => x.mapv_into(f64::tanh),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayerSpec {
    pub units: usize,
    #[serde(default)]
    pub activation: Activation,
    pub kernel: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_dim: usize,
    pub layers: Vec<DenseLayerSpec>,
}

#[derive(Debug, Clone)]
struct DenseLayer {
    kernel: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

#[derive(Debug, Clone)]
pub struct DenseNetwork {
    input_dim: usize,
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Builds the network, rejecting any layer whose shapes do not chain.
    pub fn from_spec(spec: NetworkSpec) -> std::result::Result<Self, String> {
        if spec.input_dim == 0 {
            return Err("input_dim must be at least 1".to_string());
        }
        if spec.layers.is_empty() {
            return Err("model has no layers".to_string());
        }

        let mut fan_in = spec.input_dim;
        let mut layers = Vec::with_capacity(spec.layers.len());
        for (index, layer) in spec.layers.into_iter().enumerate() {
            if layer.kernel.len() != fan_in {
                return Err(format!(
                    "layer {} kernel has {} rows, expected {}",
                    index,
                    layer.kernel.len(),
                    fan_in
                ));
            }
            if let Some(bad) = layer.kernel.iter().position(|r| r.len() != layer.units) {
                return Err(format!(
                    "layer {} kernel row {} has {} columns, expected {}",
                    index,
                    bad,
                    layer.kernel[bad].len(),
                    layer.units
                ));
            }
            if layer.bias.len() != layer.units {
                return Err(format!(
                    "layer {} bias has {} entries, expected {}",
                    index,
                    layer.bias.len(),
                    layer.units
                ));
            }

            let flat: Vec<f64> = layer.kernel.into_iter().flatten().collect();
            let kernel = Array2::from_shape_vec((fan_in, layer.units), flat)
                .map_err(|e| format!("layer {} kernel: {}", index, e))?;
            layers.push(DenseLayer {
                kernel,
                bias: Array1::from(layer.bias),
                activation: layer.activation,
            });
            fan_in = layer.units;
        }

        Ok(Self {
            input_dim: spec.input_dim,
            layers,
        })
    }

    pub fn output_dim(&self) -> usize {
        self.layers.last().map(|l| l.bias.len()).unwrap_or(0)
    }
}

impl Model for DenseNetwork {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn predict(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if batch.ncols() != self.input_dim {
            return Err(PredictError::Inference {
                detail: format!(
                    "input has {} columns, model expects {}",
                    batch.ncols(),
                    self.input_dim
                ),
            });
        }

        let mut x = batch.to_owned();
        for layer in &self.layers {
            let z = x.dot(&layer.kernel) + &layer.bias.view().insert_axis(Axis(0));
            x = layer.activation.apply(z);
        }
        Ok(x)
    }
}
