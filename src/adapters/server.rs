//! HTTP wiring: shared state, router and the serve loop.
//!
//! Handlers never turn a prediction failure into a non-200 status; the
//! outcome is carried in the rendered page instead.

use crate::adapters::{dashboard, form};
use crate::core::handler::PredictionHandler;
use crate::domain::model::FEATURE_COUNT;
use crate::utils::error::Result;
use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

const STYLE_CSS: &str = include_str!("../../templates/style.css");

#[derive(Debug)]
pub struct AppState {
    pub handler: PredictionHandler,
}

impl AppState {
    pub fn new(handler: PredictionHandler) -> Arc<Self> {
        Arc::new(Self { handler })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub features: usize,
    pub model_input_dim: usize,
    pub model_layers: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Routes:
/// - `GET /`, `POST /` -- plain prediction form
/// - `GET /dashboard`, `POST /dashboard` -- widget form with gender selector
/// - `GET /healthz` -- artifact summary as JSON
/// - `GET /static/style.css`
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(form::index_handler).post(form::submit_handler))
        .route(
            "/dashboard",
            get(dashboard::index_handler).post(dashboard::submit_handler),
        )
        .route("/healthz", get(health_handler))
        .route("/static/style.css", get(css_handler))
        .with_state(state)
}

pub(crate) fn render_page<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed").into_response()
        }
    }
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ctx = state.handler.context();
    Json(HealthResponse {
        status: "ok",
        features: FEATURE_COUNT,
        model_input_dim: ctx.model().input_dim(),
        model_layers: ctx.model().layer_count(),
        loaded_at: ctx.loaded_at(),
    })
}

async fn css_handler() -> ([(&'static str, &'static str); 1], &'static str) {
    ([("content-type", "text/css; charset=utf-8")], STYLE_CSS)
}

/// Serves until the process is terminated.
pub async fn run(listener: tokio::net::TcpListener, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}
