pub mod dashboard;

use common::{ApiResponse, ErrorResponse};
use gloo_net::http::Request;
use serde::Deserialize;
use crate::settings;

fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// Failure of an API call, split by whether the backend answered.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    Network(String),
    /// The backend answered with a non-OK status
    Status { status: u16, message: String },
    /// The body could not be decoded
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Request failed: {}", msg),
            ApiError::Status { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::Decode(msg) => write!(f, "Failed to parse response: {}", msg),
        }
    }
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| {
            log::error!("GET {} - Request failed: {}", endpoint, e);
            ApiError::Network(e.to_string())
        })?;

    if !response.ok() {
        let status = response.status();
        log::warn!("GET {} - Non-OK response: {}", endpoint, status);
        let error_response: Result<ErrorResponse, _> = response.json().await;
        let message = match error_response {
            Ok(err) => {
                log::error!("GET {} - API error: {}", endpoint, err.error);
                err.error
            }
            Err(_) => response.status_text(),
        };
        return Err(ApiError::Status { status, message });
    }

    log::trace!("GET {} - Response received, parsing JSON", endpoint);
    let api_response: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| {
            log::error!("GET {} - Failed to parse response: {}", endpoint, e);
            ApiError::Decode(e.to_string())
        })?;

    log::info!("GET {} - Success", endpoint);
    Ok(api_response.data)
}
