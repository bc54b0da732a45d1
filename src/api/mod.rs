//! HTTP surface
//!
//! Axum router, handlers and the mapping from [`crate::domain::GenoSentinelError`]
//! to JSON error responses.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use server::{build_router, serve};
pub use state::AppState;
