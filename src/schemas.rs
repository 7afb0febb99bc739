use std::sync::Arc;

use common::{
    ApiResponse, DashboardData, ErrorResponse, ForecastPoint, PipelineConfig, RiskLevel,
    StageConfig,
};
use dashboard::StubForecastProvider;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Source of dashboard data
    pub provider: Arc<StubForecastProvider>,
    /// Stage labels and timing served to the frontend
    pub pipeline: PipelineConfig,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Forecast provider status
    pub provider: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::dashboard::get_pipeline,
    ),
    components(
        schemas(
            ApiResponse<DashboardData>,
            ApiResponse<PipelineConfig>,
            ErrorResponse,
            HealthResponse,
            DashboardData,
            ForecastPoint,
            RiskLevel,
            PipelineConfig,
            StageConfig,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Forecast dashboard endpoints"),
    ),
    info(
        title = "Fincast API",
        description = "Financial forecast dashboard API",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
