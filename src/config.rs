use std::sync::Arc;

use common::PipelineConfig;
use ::config::{Config, Environment, File};
use dashboard::{Pipeline, PipelineError, StubForecastProvider, zip_stages};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::schemas::AppState;

/// Default name of the optional configuration file (`fincast.toml`).
pub const DEFAULT_CONFIG_FILE: &str = "fincast";

/// Error types for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] ::config::ConfigError),

    #[error("Invalid pipeline configuration: {0}")]
    InvalidPipeline(#[from] PipelineError),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Stage labels and durations as two parallel lists, so each can be
/// overridden from a single environment variable.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    pub labels: Vec<String>,
    pub stage_durations_ms: Vec<u64>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        let defaults = PipelineConfig::default();
        Self {
            labels: defaults.stages.iter().map(|s| s.label.clone()).collect(),
            stage_durations_ms: defaults.stages.iter().map(|s| s.duration_ms).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderSettings {
    /// When set, the stub provider fails every request with this reason.
    pub failure: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub pipeline: PipelineSettings,
    pub provider: ProviderSettings,
}

impl Settings {
    /// Loads settings from built-in defaults, then `path` (or an optional
    /// `fincast.toml` in the working directory), then `FINCAST__*` variables.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => File::with_name(path),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("FINCAST")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("pipeline.labels")
                    .with_list_parse_key("pipeline.stage_durations_ms"),
            )
            .build()?
            .try_deserialize()?;

        settings.pipeline_config()?;
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// The validated pipeline configuration.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigError> {
        let config = zip_stages(&self.pipeline.labels, &self.pipeline.stage_durations_ms)?;
        Pipeline::new(&config)?;
        Ok(config)
    }

    pub fn provider(&self) -> StubForecastProvider {
        match &self.provider.failure {
            Some(reason) => {
                warn!("Forecast provider will fail every request: {}", reason);
                StubForecastProvider::failing(reason.clone())
            }
            None => StubForecastProvider::sample(),
        }
    }
}

/// Initialize application state from loaded settings
pub fn initialize_app_state(settings: &Settings) -> Result<AppState, ConfigError> {
    let pipeline = settings.pipeline_config()?;
    info!(
        "Pipeline configured with {} stages: {:?}",
        pipeline.stages.len(),
        settings.pipeline.labels
    );

    Ok(AppState {
        provider: Arc::new(settings.provider()),
        pipeline,
    })
}
