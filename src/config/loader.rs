//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatabaseTarget, Environment, GenoSentinelConfig, PostgreSQLConfig};
use super::secret::secret_string;
use crate::domain::errors::GenoSentinelError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

const ENV_PREFIX: &str = "GENOSENTINEL";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GenoSentinelConfig
/// 4. Applies environment variable overrides (GENOSENTINEL_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use genosentinel::config::loader::load_config;
///
/// let config = load_config("genosentinel.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GenoSentinelConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GenoSentinelError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GenoSentinelError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus file access.
pub fn parse_config(contents: &str) -> Result<GenoSentinelConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: GenoSentinelConfig = toml::from_str(&contents)
        .map_err(|e| GenoSentinelError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        GenoSentinelError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Every missing variable is reported in
/// one error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GenoSentinelError::Configuration(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GenoSentinelError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_var(section: &str, key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{section}_{key}")).ok()
}

fn parse_override<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        GenoSentinelError::Configuration(format!(
            "Environment override {ENV_PREFIX}_{name} has invalid value '{raw}'"
        ))
    })
}

/// Applies environment variable overrides using the GENOSENTINEL_* prefix
///
/// Environment variables follow the pattern: GENOSENTINEL_<SECTION>_<KEY>
/// For example: GENOSENTINEL_SERVER_PORT, GENOSENTINEL_CLINICAL_API_TOKEN
fn apply_env_overrides(config: &mut GenoSentinelConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_var("APPLICATION", "LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_ENVIRONMENT")) {
        config.environment = match val.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            _ => return Err(GenoSentinelError::Configuration(format!(
                "Environment override {ENV_PREFIX}_ENVIRONMENT has invalid value '{val}'"
            ))),
        };
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_DATABASE_TARGET")) {
        config.database_target = match val.to_lowercase().as_str() {
            "postgresql" => DatabaseTarget::PostgreSQL,
            "memory" => DatabaseTarget::Memory,
            _ => return Err(GenoSentinelError::Configuration(format!(
                "Environment override {ENV_PREFIX}_DATABASE_TARGET has invalid value '{val}'"
            ))),
        };
    }

    // Server overrides
    if let Some(val) = env_var("SERVER", "HOST") {
        config.server.host = val;
    }
    if let Some(val) = env_var("SERVER", "PORT") {
        config.server.port = parse_override("SERVER_PORT", &val)?;
    }
    if let Some(val) = env_var("SERVER", "REQUEST_TIMEOUT_SECONDS") {
        config.server.request_timeout_seconds =
            parse_override("SERVER_REQUEST_TIMEOUT_SECONDS", &val)?;
    }

    // PostgreSQL overrides; a connection string alone is enough to create the section
    if let Some(val) = env_var("POSTGRESQL", "CONNECTION_STRING") {
        match config.postgresql {
            Some(ref mut pg) => pg.connection_string = secret_string(val),
            None => {
                config.postgresql = Some(PostgreSQLConfig {
                    connection_string: secret_string(val),
                    max_connections: 10,
                    connection_timeout_seconds: 30,
                    statement_timeout_seconds: 60,
                    ssl_mode: "prefer".to_string(),
                })
            }
        }
    }
    if let Some(ref mut pg) = config.postgresql {
        if let Some(val) = env_var("POSTGRESQL", "MAX_CONNECTIONS") {
            pg.max_connections = parse_override("POSTGRESQL_MAX_CONNECTIONS", &val)?;
        }
        if let Some(val) = env_var("POSTGRESQL", "STATEMENT_TIMEOUT_SECONDS") {
            pg.statement_timeout_seconds =
                parse_override("POSTGRESQL_STATEMENT_TIMEOUT_SECONDS", &val)?;
        }
        if let Some(val) = env_var("POSTGRESQL", "SSL_MODE") {
            pg.ssl_mode = val;
        }
    }

    // Clinical overrides
    if let Some(val) = env_var("CLINICAL", "ENABLED") {
        config.clinical.enabled = parse_override("CLINICAL_ENABLED", &val)?;
    }
    if let Some(val) = env_var("CLINICAL", "BASE_URL") {
        config.clinical.base_url = val;
    }
    if let Some(val) = env_var("CLINICAL", "API_TOKEN") {
        config.clinical.api_token = Some(secret_string(val));
    }
    if let Some(val) = env_var("CLINICAL", "TIMEOUT_SECONDS") {
        config.clinical.timeout_seconds = parse_override("CLINICAL_TIMEOUT_SECONDS", &val)?;
    }

    // Logging overrides
    if let Some(val) = env_var("LOGGING", "LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_var("LOGGING", "LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_var("LOGGING", "LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GS_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${GS_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("GS_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_reports_all_missing() {
        std::env::remove_var("GS_MISSING_ONE");
        std::env::remove_var("GS_MISSING_TWO");
        let input = "a = \"${GS_MISSING_ONE}\"\nb = \"${GS_MISSING_TWO}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("GS_MISSING_ONE"));
        assert!(err.contains("GS_MISSING_TWO"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("GS_COMMENTED_OUT");
        let input = "# token = \"${GS_COMMENTED_OUT}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
database_target = "memory"

[application]
log_level = "debug"

[server]
port = 8080

[logging]
local_enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database_target, DatabaseTarget::Memory);
        assert!(!config.clinical.enabled);
    }
}
