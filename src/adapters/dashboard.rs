//! Dashboard front end at `/dashboard`.
//!
//! Renders typed number widgets with browser-side ranges and a gender
//! selector. Ranges are only enforced by the browser; the server forwards
//! whatever arrives to the core handler after mapping the gender label.

use crate::adapters::form::collect_fields;
use crate::adapters::server::{render_page, AppState};
use crate::domain::model::{Gender, Prediction};
use crate::utils::error::{PredictError, Result};
use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Form;
use std::collections::HashMap;
use std::sync::Arc;

/// A numeric input widget.
#[derive(Debug, Clone)]
pub struct Widget {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

pub const WIDGETS: [Widget; 6] = [
    Widget { name: "Age", label: "Age (years)", min: 1.0, max: 120.0, step: 1.0, default: 25.0 },
    Widget { name: "Height", label: "Height (cm)", min: 10.0, max: 250.0, step: 1.0, default: 170.0 },
    Widget { name: "Weight", label: "Weight (kg)", min: 1.0, max: 300.0, step: 1.0, default: 70.0 },
    Widget { name: "Duration", label: "Duration (minutes)", min: 1.0, max: 600.0, step: 1.0, default: 30.0 },
    Widget { name: "Heart_Rate", label: "Heart rate (bpm)", min: 30.0, max: 220.0, step: 1.0, default: 120.0 },
    Widget { name: "Body_Temp", label: "Body temperature (°C)", min: 30.0, max: 42.0, step: 0.1, default: 37.0 },
];

pub struct WidgetView {
    pub widget: Widget,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(String),
    InvalidInput(String),
    Failure(String),
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub widgets: Vec<WidgetView>,
    pub genders: Vec<GenderOption>,
    pub panel: Option<Panel>,
}

pub struct GenderOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Result box shown under the form.
pub struct Panel {
    pub class: &'static str,
    pub title: &'static str,
    pub message: String,
}

impl DashboardTemplate {
    fn new(submitted: Option<&HashMap<String, String>>, outcome: Option<Outcome>) -> Self {
        let widgets = WIDGETS
            .iter()
            .map(|w| WidgetView {
                widget: w.clone(),
                value: submitted
                    .and_then(|s| s.get(w.name).cloned())
                    .unwrap_or_else(|| w.default.to_string()),
            })
            .collect();
        let selected = submitted
            .and_then(|s| s.get("Gender").map(String::as_str))
            .unwrap_or(Gender::Male.label());
        let genders = Gender::LABELS
            .iter()
            .map(|&label| GenderOption {
                label,
                selected: label == selected,
            })
            .collect();

        Self {
            widgets,
            genders,
            panel: outcome.map(Outcome::into_panel),
        }
    }
}

/// Replaces the gender label with its numeric code.
pub fn encode_gender(mut fields: HashMap<String, String>) -> Result<HashMap<String, String>> {
    let label = fields.get("Gender").ok_or_else(|| PredictError::MissingField {
        name: "Gender".to_string(),
    })?;
    let gender = Gender::from_label(label)?;
    fields.insert("Gender".to_string(), gender.code().to_string());
    Ok(fields)
}

impl Outcome {
    pub fn from_result(result: Result<Prediction>) -> Self {
        match result {
            Ok(prediction) => Outcome::Success(prediction.to_string()),
            Err(e) if e.is_input_error() => Outcome::InvalidInput(e.to_string()),
            Err(e) => Outcome::Failure(e.to_string()),
        }
    }

    fn into_panel(self) -> Panel {
        match self {
            Outcome::Success(value) => Panel {
                class: "success",
                title: "Estimated calories burnt",
                message: value,
            },
            Outcome::InvalidInput(message) => Panel {
                class: "warning",
                title: "Invalid input",
                message,
            },
            Outcome::Failure(message) => Panel {
                class: "error",
                title: "Prediction failed",
                message,
            },
        }
    }
}

pub async fn index_handler() -> Response {
    render_page(&DashboardTemplate::new(None, None))
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    form: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let submitted = collect_fields(form);

    let result =
        encode_gender(submitted.clone()).and_then(|fields| state.handler.handle(&fields));
    let outcome = Outcome::from_result(result);

    render_page(&DashboardTemplate::new(Some(&submitted), Some(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(gender: &str) -> HashMap<String, String> {
        HashMap::from([("Gender".to_string(), gender.to_string())])
    }

    #[test]
    fn test_encode_gender() {
        assert_eq!(encode_gender(fields("Male")).unwrap()["Gender"], "0");
        assert_eq!(encode_gender(fields("Female")).unwrap()["Gender"], "1");
        assert!(matches!(
            encode_gender(fields("Robot")),
            Err(PredictError::InvalidField { .. })
        ));
        assert!(matches!(
            encode_gender(HashMap::new()),
            Err(PredictError::MissingField { .. })
        ));
    }

    #[test]
    fn test_outcome_separates_input_errors() {
        let input = Outcome::from_result(Err(PredictError::InvalidField {
            name: "Age".to_string(),
            raw: "x".to_string(),
        }));
        assert!(matches!(input, Outcome::InvalidInput(_)));

        let other = Outcome::from_result(Err(PredictError::Inference {
            detail: "boom".to_string(),
        }));
        assert!(matches!(other, Outcome::Failure(_)));
    }

    #[test]
    fn test_widget_ranges() {
        let temp = WIDGETS.iter().find(|w| w.name == "Body_Temp").unwrap();
        assert_eq!((temp.min, temp.max, temp.step), (30.0, 42.0, 0.1));
        let hr = WIDGETS.iter().find(|w| w.name == "Heart_Rate").unwrap();
        assert_eq!((hr.min, hr.max), (30.0, 220.0));
    }
}
