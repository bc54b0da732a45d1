//! Configuration management for GenoSentinel.
//!
//! TOML configuration with `${VAR_NAME}` substitution, defaults for every
//! optional setting, `GENOSENTINEL_<SECTION>_<KEY>` environment overrides,
//! and validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use genosentinel::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("genosentinel.toml")?;
//! println!("Listening on {}", config.server.bind_address());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! database_target = "postgresql"
//!
//! [server]
//! port = 8000
//!
//! [postgresql]
//! connection_string = "${DATABASE_URL}"
//!
//! [clinical]
//! enabled = true
//! base_url = "https://clinical.example.org"
//! api_token = "${CLINICAL_API_TOKEN}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ClinicalConfig, DatabaseTarget, Environment, GenoSentinelConfig,
    LoggingConfig, PostgreSQLConfig, ServerConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
