use crate::schemas::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use common::{ApiResponse, DashboardData, ErrorResponse, PipelineConfig};
use dashboard::ProviderError;
use tracing::{debug, error, info, instrument, trace};

/// Get the forecast dashboard data
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard data retrieved successfully", body = ApiResponse<DashboardData>),
        (status = 503, description = "Forecast provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardData>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_dashboard function");

    match state.provider.snapshot() {
        Ok(data) => {
            info!(
                "Dashboard data served: {} periods, {} risk ({})",
                data.series.len(),
                data.risk_level,
                data.risk_score
            );
            Ok(Json(ApiResponse::ok(
                data,
                "Dashboard data retrieved successfully",
            )))
        }
        Err(err) => {
            error!("Failed to fetch dashboard data: {}", err);
            let code = match err {
                ProviderError::Unavailable(_) => "PROVIDER_UNAVAILABLE",
                ProviderError::InvalidPayload(_) => "INVALID_PAYLOAD",
            };
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(err.to_string(), code)),
            ))
        }
    }
}

/// Get the readiness pipeline stages and timing
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/pipeline",
    tag = "dashboard",
    responses(
        (status = 200, description = "Pipeline configuration retrieved successfully", body = ApiResponse<PipelineConfig>)
    )
)]
#[instrument(skip(state))]
pub async fn get_pipeline(State(state): State<AppState>) -> Json<ApiResponse<PipelineConfig>> {
    debug!("Serving pipeline with {} stages", state.pipeline.stages.len());
    Json(ApiResponse::ok(
        state.pipeline.clone(),
        "Pipeline configuration retrieved successfully",
    ))
}
