//! Domain error types
//!
//! This module defines the error hierarchy for GenoSentinel.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main GenoSentinel error type
///
/// Every fallible operation in the catalog, the storage adapters and the
/// configuration layer reports one of these variants. The HTTP layer maps
/// each variant to a status code through [`GenoSentinelError::status_code`].
#[derive(Debug, Error)]
pub enum GenoSentinelError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input failed a validation rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness rule would be violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A gene still owns variants and cannot be removed
    #[error("{message} ({variants_count} variants)")]
    DependencyConflict {
        message: String,
        variants_count: i64,
    },

    /// Database-related errors (generic)
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl GenoSentinelError {
    /// HTTP status code for this error
    ///
    /// Validation and uniqueness problems are client errors (400), missing
    /// records are 404, and everything else is an unexpected server error.
    pub fn status_code(&self) -> u16 {
        match self {
            GenoSentinelError::Validation(_) => 400,
            GenoSentinelError::Conflict(_) => 400,
            GenoSentinelError::DependencyConflict { .. } => 400,
            GenoSentinelError::NotFound(_) => 404,
            GenoSentinelError::Configuration(_)
            | GenoSentinelError::Database(_)
            | GenoSentinelError::Serialization(_)
            | GenoSentinelError::Io(_)
            | GenoSentinelError::Other(_) => 500,
        }
    }

    /// Message shown to API clients
    ///
    /// Client errors carry their bare message; server errors keep the full
    /// display text so the cause is visible.
    pub fn client_message(&self) -> String {
        match self {
            GenoSentinelError::Validation(msg)
            | GenoSentinelError::NotFound(msg)
            | GenoSentinelError::Conflict(msg) => msg.clone(),
            GenoSentinelError::DependencyConflict { message, .. } => message.clone(),
            other => format!("Unexpected error: {other}"),
        }
    }
}

/// Clinical service errors
///
/// Failures talking to the external clinical-data service. These never
/// escape the clinical adapter, which degrades them into a `failed`
/// clinical record instead.
#[derive(Debug, Error)]
pub enum ClinicalServiceError {
    /// No clinical service is configured
    #[error("Clinical service is not configured")]
    NotConfigured,

    /// Request exceeded the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Failed to connect to the clinical service
    #[error("Failed to connect to clinical service: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status
    #[error("Unexpected status: {status} - {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// Body could not be decoded
    #[error("Invalid response from clinical service: {0}")]
    InvalidResponse(String),
}

impl From<std::io::Error> for GenoSentinelError {
    fn from(err: std::io::Error) -> Self {
        GenoSentinelError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GenoSentinelError {
    fn from(err: serde_json::Error) -> Self {
        GenoSentinelError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for GenoSentinelError {
    fn from(err: toml::de::Error) -> Self {
        GenoSentinelError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenoSentinelError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GenoSentinelError::Validation("bad".to_string()).status_code(),
            400
        );
        assert_eq!(
            GenoSentinelError::Conflict("dup".to_string()).status_code(),
            400
        );
        assert_eq!(
            GenoSentinelError::NotFound("gone".to_string()).status_code(),
            404
        );
        assert_eq!(
            GenoSentinelError::Database("down".to_string()).status_code(),
            500
        );
        let guard = GenoSentinelError::DependencyConflict {
            message: "has variants".to_string(),
            variants_count: 3,
        };
        assert_eq!(guard.status_code(), 400);
    }

    #[test]
    fn test_client_message_is_bare_for_client_errors() {
        let err = GenoSentinelError::NotFound("Gene with ID x not found".to_string());
        assert_eq!(err.client_message(), "Gene with ID x not found");
    }

    #[test]
    fn test_client_message_keeps_cause_for_server_errors() {
        let err = GenoSentinelError::Database("connection refused".to_string());
        let msg = err.client_message();
        assert!(msg.starts_with("Unexpected error"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GenoSentinelError = io_err.into();
        assert!(matches!(err, GenoSentinelError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: GenoSentinelError = json_err.into();
        assert!(matches!(err, GenoSentinelError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: GenoSentinelError = toml_err.into();
        assert!(matches!(err, GenoSentinelError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_clinical_error_implements_std_error() {
        let err = ClinicalServiceError::Timeout("5s".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
