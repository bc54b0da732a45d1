//! Migrate command implementation
//!
//! Applies the catalog schema to the configured storage backend.

use crate::adapters::database::create_catalog_store;
use crate::config::load_config;
use clap::Args;

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {}

impl MigrateArgs {
    /// Execute the migrate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Applying database schema");

        println!("🗄️  Applying GenoSentinel schema");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            return Ok(2);
        }

        let store = match create_catalog_store(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to database");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        match store.ensure_schema().await {
            Ok(()) => {
                println!("✅ Schema applied ({})", store.backend_name());
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Schema migration failed");
                println!("❌ Schema migration failed");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}
