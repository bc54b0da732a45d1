//! Catalog services
//!
//! - [`genes`]: gene catalog with the delete guard
//! - [`variants`]: variants owned by genes
//! - [`reports`]: patient detections, enriched with clinical data
//!
//! Services validate through the DTO constructors, talk to a
//! [`CatalogStore`](crate::adapters::database::CatalogStore) and return
//! response DTOs ready for serialization.
//!
//! # Example
//!
//! ```rust,no_run
//! use genosentinel::adapters::memory::MemoryStore;
//! use genosentinel::core::GeneCatalog;
//! use genosentinel::dto::GenePayload;
//! use std::sync::Arc;
//!
//! # async fn example() -> genosentinel::domain::Result<()> {
//! let catalog = GeneCatalog::new(Arc::new(MemoryStore::new()));
//! let gene = catalog
//!     .create(GenePayload {
//!         symbol: Some("BRCA1".to_string()),
//!         full_name: Some("BRCA1 DNA repair associated".to_string()),
//!         function_summary: Some("Tumour suppressor".to_string()),
//!     })
//!     .await?;
//! println!("created {}", gene.id);
//! # Ok(())
//! # }
//! ```

pub mod genes;
pub mod reports;
pub mod variants;

pub use genes::GeneCatalog;
pub use reports::ReportLedger;
pub use variants::VariantCatalog;
