//! Storage backend factory
//!
//! This module creates the catalog store selected by configuration.

use crate::adapters::database::traits::CatalogStore;
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::adapter::PostgreSQLStore;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{DatabaseTarget, GenoSentinelConfig};
use crate::domain::{GenoSentinelError, Result};
use std::sync::Arc;

/// Create the catalog store based on the configuration
///
/// This factory function examines `database_target` and builds the
/// matching backend.
///
/// # Errors
///
/// Returns an error if the PostgreSQL section is missing or the pool cannot be created.
pub async fn create_catalog_store(
    config: &GenoSentinelConfig,
) -> Result<Arc<dyn CatalogStore + Send + Sync>> {
    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                GenoSentinelError::Configuration(
                    "postgresql configuration is required when database_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL catalog store");
            let client = PostgreSQLClient::new(pg_config.clone()).await?;
            tracing::info!(target_db = %client.connection_string_safe(), "PostgreSQL pool ready");

            Ok(Arc::new(PostgreSQLStore::new(client)) as Arc<dyn CatalogStore + Send + Sync>)
        }
        DatabaseTarget::Memory => {
            tracing::warn!("Using in-memory catalog store; data is lost on shutdown");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn CatalogStore + Send + Sync>)
        }
    }
}
