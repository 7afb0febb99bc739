use crate::api_client::{self, ApiError};
use async_trait::async_trait;
use common::{DashboardData, PipelineConfig};
use dashboard::{ForecastProvider, ProviderError};

pub async fn get_dashboard() -> Result<DashboardData, ApiError> {
    log::trace!("Fetching dashboard data");
    api_client::get("/dashboard").await
}

pub async fn get_pipeline() -> Result<PipelineConfig, ApiError> {
    log::trace!("Fetching pipeline configuration");
    api_client::get("/dashboard/pipeline").await
}

impl From<ApiError> for ProviderError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Decode(_) => ProviderError::InvalidPayload(err.to_string()),
            ApiError::Network(_) | ApiError::Status { .. } => {
                ProviderError::Unavailable(err.to_string())
            }
        }
    }
}

/// Forecast provider backed by `GET /api/v1/dashboard`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HttpForecastProvider;

#[async_trait(?Send)]
impl ForecastProvider for HttpForecastProvider {
    async fn fetch_dashboard_data(&self) -> Result<DashboardData, ProviderError> {
        Ok(get_dashboard().await?)
    }
}
