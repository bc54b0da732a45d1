//! Shared handler state

use crate::adapters::clinical::ClinicalDataAdapter;
use crate::adapters::database::CatalogStore;
use crate::core::{GeneCatalog, ReportLedger, VariantCatalog};
use std::sync::Arc;

/// Services shared by every handler; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub genes: GeneCatalog,
    pub variants: VariantCatalog,
    pub reports: ReportLedger,
    pub store: Arc<dyn CatalogStore + Send + Sync>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore + Send + Sync>, clinical: ClinicalDataAdapter) -> Self {
        Self {
            genes: GeneCatalog::new(store.clone()),
            variants: VariantCatalog::new(store.clone()),
            reports: ReportLedger::new(store.clone(), clinical),
            store,
        }
    }
}
