//! Genetic variant catalog service

use crate::adapters::database::conflicts;
use crate::adapters::database::CatalogStore;
use crate::domain::statistics::TOP_N;
use crate::domain::{
    GenoSentinelError, Result, VariantDetail, VariantFilter, VariantId, VariantStatistics,
};
use crate::dto::{
    non_blank, ListResponse, VariantCreate, VariantDto, VariantListItem, VariantPayload,
    VariantQuery, VariantUpdate, VariantUpdatePayload, VariantsByChromosome, VariantsByGene,
};
use crate::log_record_change;
use crate::mappers::variant as mapper;
use chrono::Utc;
use std::sync::Arc;

fn required(value: Option<String>, name: &str) -> Result<String> {
    non_blank(value).ok_or_else(|| {
        GenoSentinelError::Validation(format!("Parameter \"{name}\" is required"))
    })
}

/// Operations on genetic variants
#[derive(Clone)]
pub struct VariantCatalog {
    store: Arc<dyn CatalogStore + Send + Sync>,
}

impl VariantCatalog {
    pub fn new(store: Arc<dyn CatalogStore + Send + Sync>) -> Self {
        Self { store }
    }

    async fn list_items(&self, filter: &VariantFilter) -> Result<Vec<VariantListItem>> {
        let rows = self.store.list_variants(filter).await?;
        Ok(rows.iter().map(mapper::to_list_item).collect())
    }

    /// Variants ordered by chromosome and position
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed `gene_id` or unknown `impact` filter.
    pub async fn list(&self, query: VariantQuery) -> Result<ListResponse<VariantListItem>> {
        let filter = query.into_filter()?;
        Ok(self.list_items(&filter).await?.into())
    }

    /// Validates and stores a new variant under an existing gene
    pub async fn create(&self, payload: VariantPayload) -> Result<VariantDto> {
        let dto = VariantCreate::new(payload)?;
        let gene = self
            .store
            .get_gene(dto.gene_id())
            .await?
            .ok_or_else(|| conflicts::gene_not_found(dto.gene_id()))?;

        let variant = mapper::to_new_record(&dto, Utc::now());
        self.store.insert_variant(&variant).await?;
        log_record_change!("variant", variant.id, "created");

        Ok(mapper::to_dto(&VariantDetail {
            variant,
            gene_symbol: gene.symbol,
            gene_full_name: gene.full_name,
        }))
    }

    pub async fn retrieve(&self, id: VariantId) -> Result<VariantDto> {
        self.store
            .get_variant(id)
            .await?
            .map(|detail| mapper::to_dto(&detail))
            .ok_or_else(|| conflicts::variant_not_found(id))
    }

    /// Partial update of impact and bases
    ///
    /// # Errors
    ///
    /// `Conflict` if the new bases collide with another variant of the same locus.
    pub async fn update(&self, id: VariantId, payload: VariantUpdatePayload) -> Result<VariantDto> {
        let update = VariantUpdate::new(payload)?;
        let mut detail = self
            .store
            .get_variant(id)
            .await?
            .ok_or_else(|| conflicts::variant_not_found(id))?;

        mapper::apply_update(&mut detail.variant, &update, Utc::now());
        self.store.update_variant(&detail.variant).await?;
        log_record_change!("variant", id, "updated");
        Ok(mapper::to_dto(&detail))
    }

    /// Removes a variant together with every report that references it
    pub async fn delete(&self, id: VariantId) -> Result<()> {
        match self.store.delete_variant(id).await? {
            None => Err(conflicts::variant_not_found(id)),
            Some(cascaded) => {
                if cascaded > 0 {
                    tracing::warn!(
                        variant_id = %id,
                        cascaded_reports = cascaded,
                        "Variant deletion removed patient reports"
                    );
                }
                log_record_change!("variant", id, "deleted");
                Ok(())
            }
        }
    }

    /// Variants of the gene with this symbol; the symbol is uppercased first
    pub async fn by_gene(&self, gene_symbol: Option<String>) -> Result<VariantsByGene> {
        let symbol = required(gene_symbol, "gene_symbol")?.to_uppercase();
        let gene = self
            .store
            .find_gene_by_symbol(&symbol)
            .await?
            .ok_or_else(|| {
                GenoSentinelError::NotFound(format!("Gene with symbol '{symbol}' not found"))
            })?;

        let variants = self
            .list_items(&VariantFilter {
                gene_id: Some(gene.id),
                ..VariantFilter::default()
            })
            .await?;

        Ok(VariantsByGene {
            gene_symbol: gene.symbol,
            gene_name: gene.full_name,
            total_variants: variants.len(),
            variants,
        })
    }

    pub async fn by_chromosome(&self, chr: Option<String>) -> Result<VariantsByChromosome> {
        let chromosome = required(chr, "chr")?;
        let variants = self
            .list_items(&VariantFilter {
                chromosome: Some(chromosome.clone()),
                ..VariantFilter::default()
            })
            .await?;

        Ok(VariantsByChromosome {
            chromosome,
            total_variants: variants.len(),
            variants,
        })
    }

    pub async fn statistics(&self) -> Result<VariantStatistics> {
        self.store.variant_statistics(TOP_N).await
    }
}
