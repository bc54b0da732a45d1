//! CLI command implementations
//!
//! Exit codes: 0 success, 2 configuration error, 4 storage connection error,
//! 5 fatal error.

pub mod init;
pub mod migrate;
pub mod serve;
pub mod validate;
