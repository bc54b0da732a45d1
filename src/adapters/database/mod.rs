//! Storage abstraction layer
//!
//! This module provides a trait-based abstraction for catalog persistence,
//! allowing GenoSentinel to run against PostgreSQL or an in-process store.

pub mod conflicts;
pub mod factory;
pub mod traits;

pub use factory::create_catalog_store;
pub use traits::{CatalogStore, GeneRepository, ReportRepository, VariantRepository};
