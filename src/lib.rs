pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::server::{build_router, AppState};
pub use config::ServiceConfig;
pub use core::artifacts::{load_artifacts, ArtifactPaths, PredictionContext};
pub use core::handler::PredictionHandler;
pub use utils::error::{PredictError, Result};
