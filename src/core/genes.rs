//! Gene catalog service

use crate::adapters::database::conflicts;
use crate::adapters::database::CatalogStore;
use crate::domain::{GeneDeletion, GeneId, GeneStatistics, GenoSentinelError, Result};
use crate::dto::{
    non_blank, GeneCreate, GeneDto, GeneListItem, GenePayload, GeneSearchResult, GeneUpdate,
    GeneUpdatePayload, ListResponse,
};
use crate::log_record_change;
use crate::mappers::gene as mapper;
use chrono::Utc;
use std::sync::Arc;

/// Message returned when a gene still owns variants
pub const GENE_HAS_VARIANTS: &str =
    "Cannot delete gene because it has associated genetic variants";

/// Operations on the gene catalog
#[derive(Clone)]
pub struct GeneCatalog {
    store: Arc<dyn CatalogStore + Send + Sync>,
}

impl GeneCatalog {
    pub fn new(store: Arc<dyn CatalogStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Genes ordered by symbol, optionally filtered by symbol substring
    pub async fn list(&self, symbol: Option<String>) -> Result<ListResponse<GeneListItem>> {
        let filter = non_blank(symbol);
        let rows = self.store.list_genes(filter.as_deref()).await?;
        Ok(rows.iter().map(mapper::to_list_item).collect::<Vec<_>>().into())
    }

    /// Validates and stores a new gene
    ///
    /// # Errors
    ///
    /// `Validation` for rule violations, `Conflict` for a taken symbol.
    pub async fn create(&self, payload: GenePayload) -> Result<GeneDto> {
        let dto = GeneCreate::new(payload)?;

        // Friendly early answer; the store re-checks under its own lock
        if self.store.find_gene_by_symbol(dto.symbol()).await?.is_some() {
            return Err(conflicts::duplicate_symbol(dto.symbol()));
        }

        let gene = mapper::to_new_record(&dto, Utc::now());
        self.store.insert_gene(&gene).await?;
        log_record_change!("gene", gene.id, "created");
        Ok(mapper::to_dto(&gene))
    }

    pub async fn retrieve(&self, id: GeneId) -> Result<GeneDto> {
        self.store
            .get_gene(id)
            .await?
            .map(|gene| mapper::to_dto(&gene))
            .ok_or_else(|| conflicts::gene_not_found(id))
    }

    /// Partial update of full name and function summary; the symbol never changes
    pub async fn update(&self, id: GeneId, payload: GeneUpdatePayload) -> Result<GeneDto> {
        let update = GeneUpdate::new(payload)?;
        let mut gene = self
            .store
            .get_gene(id)
            .await?
            .ok_or_else(|| conflicts::gene_not_found(id))?;

        mapper::apply_update(&mut gene, &update, Utc::now());
        self.store.update_gene(&gene).await?;
        log_record_change!("gene", id, "updated");
        Ok(mapper::to_dto(&gene))
    }

    /// Removes a gene that owns no variants
    ///
    /// # Errors
    ///
    /// `DependencyConflict` carrying the variant count when the gene is still referenced.
    pub async fn delete(&self, id: GeneId) -> Result<()> {
        match self.store.delete_gene(id).await? {
            GeneDeletion::Deleted => {
                log_record_change!("gene", id, "deleted");
                Ok(())
            }
            GeneDeletion::Missing => Err(conflicts::gene_not_found(id)),
            GeneDeletion::Referenced { variants_count } => {
                Err(GenoSentinelError::DependencyConflict {
                    message: GENE_HAS_VARIANTS.to_string(),
                    variants_count,
                })
            }
        }
    }

    /// Case-insensitive symbol search; `q` is required
    pub async fn search(&self, query: Option<String>) -> Result<GeneSearchResult> {
        let query = non_blank(query).ok_or_else(|| {
            GenoSentinelError::Validation("Parameter \"q\" is required for search".to_string())
        })?;

        let rows = self.store.list_genes(Some(&query)).await?;
        let results: Vec<GeneListItem> = rows.iter().map(mapper::to_list_item).collect();
        Ok(GeneSearchResult {
            query,
            count: results.len(),
            results,
        })
    }

    pub async fn statistics(&self) -> Result<GeneStatistics> {
        self.store.gene_statistics().await
    }
}
