//! Logging and observability
//!
//! Structured logging through `tracing`: a console layer, an optional JSON
//! rolling file, and a few macros that keep field names consistent across
//! the catalog services.
//!
//! # Example
//!
//! ```no_run
//! use genosentinel::logging::init_logging;
//! use genosentinel::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Service started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a created, updated or deleted catalog record
///
/// # Example
///
/// ```no_run
/// use genosentinel::log_record_change;
///
/// log_record_change!("gene", "5f0c6c9e-1d9b-4b8e-9f51-2d1c3a4b5c6d", "created");
/// ```
#[macro_export]
macro_rules! log_record_change {
    ($entity:expr, $id:expr, $action:expr) => {
        tracing::info!(
            entity = $entity,
            id = %$id,
            action = $action,
            "Catalog record changed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use genosentinel::log_error_with_context;
/// use genosentinel::domain::GenoSentinelError;
///
/// let error = GenoSentinelError::Database("pool exhausted".to_string());
/// log_error_with_context!(&error, "Failed to list genes");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a clinical lookup that fell back to a degraded record
///
/// # Example
///
/// ```no_run
/// use genosentinel::log_clinical_degraded;
///
/// log_clinical_degraded!("5f0c6c9e-1d9b-4b8e-9f51-2d1c3a4b5c6d", "connection refused");
/// ```
#[macro_export]
macro_rules! log_clinical_degraded {
    ($patient_id:expr, $reason:expr) => {
        tracing::warn!(
            patient_id = %$patient_id,
            reason = %$reason,
            "Clinical data unavailable, returning degraded record"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{GenoSentinelError, PatientId};

    #[test]
    fn test_macros_expand() {
        let id = PatientId::generate();
        let error = GenoSentinelError::Other("boom".to_string());
        log_record_change!("report", id, "deleted");
        log_error_with_context!(&error, "testing");
        log_clinical_degraded!(id, "timeout");
    }
}
