//! Storage abstraction traits
//!
//! This module defines the traits that storage backends must implement to
//! hold the catalog. Each write method runs as a single transaction in the
//! backend and enforces the uniqueness rules itself, so concurrent callers
//! cannot slip duplicates past a separate existence check.

use crate::domain::{
    Gene, GeneDeletion, GeneId, GeneStatistics, GeneWithCount, GeneticVariant, PatientVariantReport,
    ReportDetail, ReportFilter, ReportId, ReportTotals, Result, VariantDetail, VariantFilter,
    VariantId, VariantStatistics,
};
use async_trait::async_trait;

/// Gene persistence
#[async_trait]
pub trait GeneRepository: Send + Sync {
    /// Lists genes ordered by symbol, with their variant counts
    ///
    /// `symbol_contains` is a case-insensitive substring filter.
    async fn list_genes(&self, symbol_contains: Option<&str>) -> Result<Vec<GeneWithCount>>;

    /// Fetches a gene by identifier
    async fn get_gene(&self, id: GeneId) -> Result<Option<Gene>>;

    /// Fetches a gene by exact symbol
    async fn find_gene_by_symbol(&self, symbol: &str) -> Result<Option<Gene>>;

    /// Inserts a new gene
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the symbol is already taken.
    async fn insert_gene(&self, gene: &Gene) -> Result<()>;

    /// Persists the mutable fields of an existing gene
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the gene no longer exists.
    async fn update_gene(&self, gene: &Gene) -> Result<()>;

    /// Removes a gene unless it still owns variants
    ///
    /// The variant count check and the delete happen atomically.
    async fn delete_gene(&self, id: GeneId) -> Result<GeneDeletion>;

    /// Totals for the gene statistics endpoint
    async fn gene_statistics(&self) -> Result<GeneStatistics>;
}

/// Genetic variant persistence
#[async_trait]
pub trait VariantRepository: Send + Sync {
    /// Lists variants ordered by chromosome then position
    async fn list_variants(&self, filter: &VariantFilter) -> Result<Vec<VariantDetail>>;

    /// Fetches a variant with its gene context
    async fn get_variant(&self, id: VariantId) -> Result<Option<VariantDetail>>;

    /// Inserts a new variant
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the owning gene is gone and `Conflict` on a
    /// duplicate (gene, chromosome, position, ref, alt) tuple.
    async fn insert_variant(&self, variant: &GeneticVariant) -> Result<()>;

    /// Persists the mutable fields of an existing variant
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the variant is gone and `Conflict` if the new
    /// bases collide with another variant.
    async fn update_variant(&self, variant: &GeneticVariant) -> Result<()>;

    /// Removes a variant and its reports
    ///
    /// Returns the number of cascaded reports, or `None` if no variant matched.
    async fn delete_variant(&self, id: VariantId) -> Result<Option<u64>>;

    /// Totals, per-impact counts and the busiest chromosomes
    async fn variant_statistics(&self, top_chromosomes: usize) -> Result<VariantStatistics>;
}

/// Patient report persistence
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Lists reports, newest detection first
    async fn list_reports(&self, filter: &ReportFilter) -> Result<Vec<ReportDetail>>;

    /// Fetches a report with its variant and gene context
    async fn get_report(&self, id: ReportId) -> Result<Option<ReportDetail>>;

    /// Inserts a new report
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the variant is gone and `Conflict` on a
    /// duplicate (patient, variant, detection_date) tuple.
    async fn insert_report(&self, report: &PatientVariantReport) -> Result<()>;

    /// Persists the mutable fields of an existing report
    async fn update_report(&self, report: &PatientVariantReport) -> Result<()>;

    /// Removes a report; returns false if none matched
    async fn delete_report(&self, id: ReportId) -> Result<bool>;

    /// Report and distinct patient counts
    async fn report_totals(&self) -> Result<ReportTotals>;
}

/// Complete catalog storage backend
#[async_trait]
pub trait CatalogStore: GeneRepository + VariantRepository + ReportRepository {
    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Checks that the backend is reachable
    async fn test_connection(&self) -> Result<()>;

    /// Creates tables and constraints if they don't exist
    async fn ensure_schema(&self) -> Result<()>;
}
