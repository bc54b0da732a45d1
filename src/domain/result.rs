//! Result type alias for GenoSentinel

use super::errors::GenoSentinelError;

/// Result type alias for GenoSentinel operations
///
/// # Examples
///
/// ```
/// use genosentinel::domain::result::Result;
/// use genosentinel::domain::errors::GenoSentinelError;
///
/// fn failing_function() -> Result<()> {
///     Err(GenoSentinelError::Validation("symbol is required".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GenoSentinelError>;
