pub mod artifacts;
pub mod handler;
pub mod network;
pub mod scaler;

pub use crate::domain::model::{FeatureVector, Gender, Prediction};
pub use crate::domain::ports::{ConfigProvider, Model, Scaler};
pub use crate::utils::error::Result;
