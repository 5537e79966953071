use super::toml_config::TomlConfig;
use super::{Overrides, ServiceConfig};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "calorie-serve")]
#[command(about = "Serve calorie-burn predictions from a trained regression model")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Socket address to listen on (default 127.0.0.1:5000)
    #[arg(long)]
    pub bind: Option<String>,

    /// Path to the exported model JSON
    #[arg(long)]
    pub model_path: Option<String>,

    /// Path to the exported scaler JSON
    #[arg(long)]
    pub scaler_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    fn overrides(&self) -> Overrides {
        Overrides {
            bind: self.bind.clone(),
            model_path: self.model_path.clone(),
            scaler_path: self.scaler_path.clone(),
            log_json: self.log_json,
            verbose: self.verbose,
        }
    }

    /// Merges the optional config file under the command line flags.
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        Ok(ServiceConfig::resolve(file.as_ref(), self.overrides()))
    }
}
