//! Error types for the HTTP layer
//!
//! Failures that reach the caller as a non-success status. Recoverable model
//! failures (chat answers, timetables) never get here; they are answered with
//! a fallback payload instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::extract::ExtractionError;
use crate::gateway::GatewayError;
use crate::models::ErrorResponse;

// == Api Error ==
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed caller input
    #[error("{0}")]
    Validation(String),

    /// The model did not answer within its time budget
    #[error("API request timed out after {0}ms")]
    UpstreamTimeout(u64),

    /// The model call failed
    #[error("{0}")]
    UpstreamFailure(String),

    /// The model answered but the output could not be used
    #[error("{source}")]
    Extraction {
        message: &'static str,
        source: ExtractionError,
    },

    /// The service is missing configuration needed to reach the model
    #[error("{0}")]
    Configuration(String),
}

impl ApiError {
    /// Maps a gateway failure for an endpoint that has no fallback.
    pub fn from_gateway(err: GatewayError) -> Self {
        match err {
            GatewayError::TimedOut { after_ms } => ApiError::UpstreamTimeout(after_ms),
            GatewayError::CallFailed(reason) => ApiError::UpstreamFailure(reason),
            GatewayError::NotConfigured => {
                ApiError::Configuration("API configuration error".to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::Extraction { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::UpstreamTimeout(_) | ApiError::UpstreamFailure(_) => {
                "Failed to communicate with AI service".to_string()
            }
            ApiError::Extraction { message, .. } => message.to_string(),
            ApiError::Configuration(msg) => msg.clone(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::new(self.message(), self.to_string());
        if let ApiError::Extraction { source, .. } = &self {
            body = body.with_raw_response(source.sample());
        }

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
