use crate::utils::error::{PredictError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of inputs the scaler and model were fitted on.
pub const FEATURE_COUNT: usize = 7;

/// Form field names in feature-vector order. The order is the column order
/// the scaler was fitted with and must not change.
pub const FIELD_NAMES: [&str; FEATURE_COUNT] = [
    "Age",
    "Gender",
    "Height",
    "Weight",
    "Duration",
    "Heart_Rate",
    "Body_Temp",
];

/// One workout, in fitted column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Single-row batch, the shape every scaler and model sees.
    pub fn to_batch(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, col)| self.0[col])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const LABELS: [&'static str; 2] = ["Male", "Female"];

    /// 與訓練資料一致：male = 0, female = 1
    pub fn code(self) -> f64 {
        match self {
            Gender::Male => 0.0,
            Gender::Female => 1.0,
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(PredictError::InvalidField {
                name: "Gender".to_string(),
                raw: other.to_string(),
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A successful prediction, already rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub calories: f64,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.calories)
    }
}

/// Rounds the exact binary value to two decimals, ties to even.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_labels_map_to_codes() {
        assert_eq!(Gender::from_label("Male").unwrap().code(), 0.0);
        assert_eq!(Gender::from_label("Female").unwrap().code(), 1.0);
        assert!(Gender::from_label("male").is_err());
        assert!(Gender::from_label("Other").is_err());
    }

    #[test]
    fn test_feature_vector_batch_keeps_order() {
        let vector = FeatureVector::new([25.0, 0.0, 170.0, 70.0, 30.0, 120.0, 37.0]);
        let batch = vector.to_batch();
        assert_eq!(batch.shape(), &[1, FEATURE_COUNT]);
        assert_eq!(batch[[0, 0]], 25.0);
        assert_eq!(batch[[0, 2]], 170.0);
        assert_eq!(batch[[0, 6]], 37.0);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(231.456), 231.46);
        assert_eq!(round_to_cents(-3.14159), -3.14);
        assert_eq!(round_to_cents(10.0), 10.0);
    }

    #[test]
    fn test_round_to_cents_uses_exact_binary_value() {
        // 2.675 is stored as 2.67499999...
        assert_eq!(round_to_cents(2.675), 2.67);
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(150.125), 150.12);
    }

    #[test]
    fn test_round_to_cents_huge_value_stays_finite() {
        let rounded = round_to_cents(1.7e307);
        assert!(rounded.is_finite());
        assert_eq!(rounded, 1.7e307);
    }

    #[test]
    fn test_prediction_display_has_two_decimals() {
        let prediction = Prediction { calories: 150.5 };
        assert_eq!(prediction.to_string(), "150.50");
    }
}
