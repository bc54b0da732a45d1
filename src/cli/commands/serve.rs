//! Serve command implementation
//!
//! Loads configuration, connects the catalog store and runs the HTTP
//! service until a shutdown signal arrives.

use crate::adapters::clinical::ClinicalDataAdapter;
use crate::adapters::database::create_catalog_store;
use crate::api::{serve, AppState};
use crate::config::{load_config, DatabaseTarget};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Apply the database schema before accepting requests
    #[arg(long)]
    pub migrate: bool,

    /// Override the bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting serve command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(2);
        }

        let store = match create_catalog_store(&config).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create catalog store");
                eprintln!("❌ Failed to connect to storage: {e}");
                return Ok(4);
            }
        };

        if let Err(e) = store.test_connection().await {
            tracing::error!(error = %e, "Storage connection test failed");
            eprintln!("❌ Storage connection test failed: {e}");
            return Ok(4);
        }

        if self.migrate || config.database_target == DatabaseTarget::Memory {
            store.ensure_schema().await?;
            tracing::info!(storage = store.backend_name(), "Schema ready");
        }

        let clinical = match ClinicalDataAdapter::from_config(&config.clinical) {
            Ok(adapter) => adapter,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build clinical client");
                eprintln!("❌ Failed to build clinical client: {e}");
                return Ok(2);
            }
        };

        println!(
            "🚀 GenoSentinel listening on http://{} ({} storage)",
            config.server.bind_address(),
            store.backend_name()
        );

        let state = AppState::new(store, clinical);
        serve(&config.server, state, shutdown_signal).await?;

        println!("👋 GenoSentinel stopped");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_config_is_config_error() {
        let args = ServeArgs {
            migrate: false,
            host: None,
            port: None,
        };
        let (_tx, rx) = watch::channel(false);
        let code = args
            .execute("/nonexistent/genosentinel.toml", rx)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
