//! Readiness pipeline and view composition for the forecast dashboard.
//!
//! Everything here is host-agnostic: the browser frontend drives it with gloo
//! timers, the terminal preview with tokio, and the tests with [`ManualTimer`].

pub mod actions;
pub mod chart;
pub mod compose;
pub mod error;
pub mod gauge;
pub mod pipeline;
pub mod provider;
pub mod readiness;
pub mod session;
pub mod timer;

pub use actions::{ActionNotifier, Notification, NotificationKind, QuickAction, dispatch};
pub use compose::{RenderPlan, compose};
pub use error::{PipelineError, ProviderError, Result};
pub use pipeline::{Pipeline, zip_stages};
pub use provider::{ForecastProvider, StubForecastProvider, sample_dashboard_data};
pub use readiness::{IgnoreReason, ReadinessMachine, ReadinessState, Transition};
pub use session::DashboardSession;
pub use timer::{ManualTimer, Timer};

use common::PipelineConfig;

/// Returns the pipeline for `config`, falling back to the three default
/// stages when the configuration is invalid.
pub fn pipeline_or_default(config: &PipelineConfig) -> Pipeline {
    Pipeline::new(config).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Invalid pipeline configuration, using defaults");
        Pipeline::default()
    })
}
