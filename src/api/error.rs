//! HTTP error responses
//!
//! Every failure leaves the service as `{"error": message}`; the gene delete
//! guard adds `variants_count`.

use crate::domain::GenoSentinelError;
use crate::log_error_with_context;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants_count: Option<i64>,
}

/// Handler error wrapping [`GenoSentinelError`]
#[derive(Debug)]
pub struct ApiError(pub GenoSentinelError);

impl From<GenoSentinelError> for ApiError {
    fn from(err: GenoSentinelError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(GenoSentinelError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(GenoSentinelError::Validation(format!(
            "Invalid query string: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            log_error_with_context!(&self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        let variants_count = match &self.0 {
            GenoSentinelError::DependencyConflict { variants_count, .. } => Some(*variants_count),
            _ => None,
        };
        let body = ErrorBody {
            error: self.0.client_message(),
            variants_count,
        };
        (status, Json(body)).into_response()
    }
}
