use async_trait::async_trait;
use common::{DashboardData, ForecastPoint, RiskLevel};
use rust_decimal::Decimal;
use std::rc::Rc;
use tracing::{debug, instrument, warn};

use crate::error::ProviderError;

/// Source of the data the dashboard renders once the pipeline completes.
///
/// Invoked once per session at the final stage boundary. Implementations must
/// finish (or fail) in finite time and be safe to call again on retry.
///
/// The pipeline runs on a single-threaded event loop, so the returned future
/// need not be `Send`.
#[async_trait(?Send)]
pub trait ForecastProvider {
    async fn fetch_dashboard_data(&self) -> Result<DashboardData, ProviderError>;
}

#[async_trait(?Send)]
impl<P: ForecastProvider + ?Sized> ForecastProvider for Rc<P> {
    async fn fetch_dashboard_data(&self) -> Result<DashboardData, ProviderError> {
        (**self).fetch_dashboard_data().await
    }
}

/// Sample twelve-month forecast: `(period, savings, expenses)`.
const SAMPLE_SERIES: [(&str, i64, i64); 12] = [
    ("Jan", 2000, 1400),
    ("Feb", 2200, 1300),
    ("Mar", 2100, 1600),
    ("Apr", 2600, 1400),
    ("May", 2800, 1500),
    ("Jun", 3200, 1300),
    ("Jul", 3100, 1800),
    ("Aug", 3400, 1900),
    ("Sep", 3800, 1600),
    ("Oct", 4100, 1400),
    ("Nov", 4300, 1500),
    ("Dec", 4800, 1700),
];

const SAMPLE_INSIGHT: &str =
    "Expected $400 spike in utilities next month due to winter season trends.";

/// The canned data set served while no real forecast backend exists.
pub fn sample_dashboard_data() -> DashboardData {
    DashboardData {
        series: SAMPLE_SERIES
            .iter()
            .map(|(period, savings, expenses)| {
                ForecastPoint::new(*period, Decimal::from(*savings), Decimal::from(*expenses))
            })
            .collect(),
        risk_level: RiskLevel::Low,
        risk_score: 22,
        insight: SAMPLE_INSIGHT.to_string(),
    }
}

/// In-process provider returning a fixed data set, or a fixed failure.
#[derive(Debug, Clone, PartialEq)]
pub struct StubForecastProvider {
    data: DashboardData,
    failure: Option<String>,
}

impl Default for StubForecastProvider {
    fn default() -> Self {
        Self::sample()
    }
}

impl StubForecastProvider {
    pub fn sample() -> Self {
        Self::with_data(sample_dashboard_data())
    }

    pub fn with_data(data: DashboardData) -> Self {
        Self {
            data,
            failure: None,
        }
    }

    /// A provider whose every fetch fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            data: sample_dashboard_data(),
            failure: Some(reason.into()),
        }
    }

    pub fn is_failing(&self) -> bool {
        self.failure.is_some()
    }

    /// Synchronous form of [`ForecastProvider::fetch_dashboard_data`].
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> Result<DashboardData, ProviderError> {
        match &self.failure {
            Some(reason) => {
                warn!("Stub provider configured to fail: {}", reason);
                Err(ProviderError::Unavailable(reason.clone()))
            }
            None => {
                debug!("Serving stub dashboard data");
                Ok(self.data.clone())
            }
        }
    }
}

#[async_trait(?Send)]
impl ForecastProvider for StubForecastProvider {
    async fn fetch_dashboard_data(&self) -> Result<DashboardData, ProviderError> {
        self.snapshot()
    }
}
