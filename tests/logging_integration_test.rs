//! Integration tests for logging functionality
//!
//! A process can install only one global subscriber, so file logging is
//! exercised by a single test.

use genosentinel::config::LoggingConfig;
use genosentinel::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let config = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };
    assert!(init_logging("loud", &config).is_err());
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).expect("logging should initialize");
    assert!(log_path.exists());

    tracing::info!(target: "genosentinel", gene = "TP53", "gene created");
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("genosentinel.log")).unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("gene created"))
        .expect("event should be written");
    let json: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(json["fields"]["gene"], "TP53");
}
