//! Request handlers, one module per resource

pub mod genes;
pub mod health;
pub mod reports;
pub mod variants;

use super::error::ApiError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

/// Unwraps a JSON body, turning extractor rejections into 400s
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    Ok(payload?.0)
}

/// Unwraps query parameters, turning extractor rejections into 400s
pub(crate) fn params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    Ok(query?.0)
}
