//! Plain form front end at `/`.
//!
//! Fields are posted under their wire names and passed to the core handler
//! untouched. The page shows either the rounded prediction or the error
//! text prefixed with `Error: `.

use crate::adapters::server::{render_page, AppState};
use crate::domain::model::FIELD_NAMES;
use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Form;
use std::collections::HashMap;
use std::sync::Arc;

pub struct FormField {
    pub name: &'static str,
    pub value: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub fields: Vec<FormField>,
    pub prediction: Option<String>,
}

impl IndexTemplate {
    fn new(submitted: Option<&HashMap<String, String>>, prediction: Option<String>) -> Self {
        let fields = FIELD_NAMES
            .iter()
            .map(|&name| FormField {
                name,
                value: submitted
                    .and_then(|s| s.get(name).cloned())
                    .unwrap_or_default(),
            })
            .collect();
        Self { fields, prediction }
    }
}

pub async fn index_handler() -> Response {
    render_page(&IndexTemplate::new(None, None))
}

/// Builds the field map from a decoded body. A repeated name keeps its
/// first value.
pub(crate) fn collect_fields(
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> HashMap<String, String> {
    // 無法解析的表單視為空白，讓核心回報缺少欄位
    let pairs = match form {
        Ok(Form(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!("Form body rejected: {}", rejection);
            Vec::new()
        }
    };

    let mut fields = HashMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        fields.entry(name).or_insert(value);
    }
    fields
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let fields = collect_fields(form);

    let prediction = match state.handler.handle(&fields) {
        Ok(prediction) => prediction.to_string(),
        Err(e) => format!("Error: {}", e),
    };

    render_page(&IndexTemplate::new(Some(&fields), Some(prediction)))
}
