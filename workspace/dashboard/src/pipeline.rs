use common::{PipelineConfig, StageConfig};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{PipelineError, Result};

/// A validated readiness pipeline: ordered stage labels and the mount-relative
/// deadline at which each stage ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    labels: Vec<String>,
    deadlines: Vec<Duration>,
}

impl Pipeline {
    /// Validates `config` and precomputes the boundary deadlines.
    ///
    /// Deadlines are cumulative sums of the stage durations, so boundary `i`
    /// fires at the same offset from mount no matter when boundary `i - 1`
    /// actually ran.
    #[instrument(skip(config), fields(stages = config.stages.len()))]
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        if config.stages.is_empty() {
            return Err(PipelineError::NoStages);
        }

        for (index, stage) in config.stages.iter().enumerate() {
            if stage.label.trim().is_empty() {
                return Err(PipelineError::EmptyLabel(index));
            }
            if stage.duration_ms == 0 {
                return Err(PipelineError::ZeroDuration {
                    index,
                    label: stage.label.clone(),
                });
            }
        }

        let pipeline = Self::from_stages(&config.stages);
        debug!("Pipeline ready, provider invoked at {:?}", pipeline.total_duration());
        Ok(pipeline)
    }

    fn from_stages(stages: &[StageConfig]) -> Self {
        let mut elapsed = Duration::ZERO;
        let deadlines = stages
            .iter()
            .map(|stage| {
                elapsed += Duration::from_millis(stage.duration_ms);
                elapsed
            })
            .collect();
        Self {
            labels: stages.iter().map(|stage| stage.label.clone()).collect(),
            deadlines,
        }
    }

    pub fn stage_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, stage: usize) -> Option<&str> {
        self.labels.get(stage).map(String::as_str)
    }

    /// Mount-relative instant at which `stage` ends.
    pub fn deadline(&self, stage: usize) -> Option<Duration> {
        self.deadlines.get(stage).copied()
    }

    /// Index of the boundary that invokes the provider.
    pub fn last_stage(&self) -> usize {
        self.labels.len() - 1
    }

    /// Total time from mount until the provider is invoked.
    pub fn total_duration(&self) -> Duration {
        self.deadlines[self.last_stage()]
    }

    /// Every boundary with its deadline, in firing order.
    pub fn boundaries(&self) -> impl Iterator<Item = (usize, Duration)> + '_ {
        self.deadlines.iter().copied().enumerate()
    }

    /// Progress shown while `stage` is active: `(stage + 1) / stage_count`.
    pub fn progress(&self, stage: usize) -> f64 {
        let stage = stage.min(self.last_stage());
        (stage + 1) as f64 / self.stage_count() as f64
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_stages(&PipelineConfig::default().stages)
    }
}

/// Pairs stage labels with durations given as two parallel lists.
pub fn zip_stages(labels: &[String], durations_ms: &[u64]) -> Result<PipelineConfig> {
    if labels.len() != durations_ms.len() {
        return Err(PipelineError::StageCountMismatch {
            labels: labels.len(),
            durations: durations_ms.len(),
        });
    }
    Ok(PipelineConfig {
        stages: labels
            .iter()
            .zip(durations_ms)
            .map(|(label, duration_ms)| StageConfig::new(label.clone(), *duration_ms))
            .collect(),
    })
}

impl TryFrom<&PipelineConfig> for Pipeline {
    type Error = PipelineError;

    fn try_from(config: &PipelineConfig) -> Result<Self> {
        Pipeline::new(config)
    }
}
