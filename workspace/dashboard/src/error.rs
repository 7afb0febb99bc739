use thiserror::Error;

/// Failure reported by a forecast data provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider could not be reached or refused to answer
    #[error("Forecast provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with something that is not dashboard data
    #[error("Invalid dashboard payload: {0}")]
    InvalidPayload(String),
}

/// Error types for pipeline configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A pipeline needs at least one stage before the provider is invoked
    #[error("Pipeline has no stages")]
    NoStages,

    /// Every stage must last a non-zero amount of time
    #[error("Stage {index} ({label}) has zero duration")]
    ZeroDuration { index: usize, label: String },

    /// A stage label may not be blank
    #[error("Stage {0} has an empty label")]
    EmptyLabel(usize),

    /// Labels and durations were given as separate lists of different length
    #[error("{labels} stage labels but {durations} durations")]
    StageCountMismatch { labels: usize, durations: usize },
}

/// Type alias for Result with PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;
