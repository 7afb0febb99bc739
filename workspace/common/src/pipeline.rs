use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One stage of the processing sequence shown before the dashboard is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StageConfig {
    /// Label shown next to the stage indicator
    pub label: String,
    /// How long the stage stays active, in milliseconds
    pub duration_ms: u64,
}

impl StageConfig {
    pub fn new(label: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            label: label.into(),
            duration_ms,
        }
    }
}

/// Stage labels and timing of the readiness pipeline.
///
/// Stage `i` ends `sum(duration_ms[0..=i])` milliseconds after mount; the end of
/// the last stage is when the forecast provider is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PipelineConfig {
    pub stages: Vec<StageConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                StageConfig::new("Analyzing Trends", 1500),
                StageConfig::new("Calculating Risk", 1500),
                StageConfig::new("Generating Forecast", 1500),
            ],
        }
    }
}

impl PipelineConfig {
    /// Builds a config where every stage lasts `duration_ms`.
    pub fn uniform<I, S>(labels: I, duration_ms: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stages: labels
                .into_iter()
                .map(|label| StageConfig::new(label, duration_ms))
                .collect(),
        }
    }
}
