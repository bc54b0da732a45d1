//! In-process catalog store
//!
//! Holds every table in one `RwLock`. Each write takes the lock once for
//! its uniqueness check and mutation, which gives the same atomicity the
//! PostgreSQL backend gets from transactions.

use crate::adapters::database::conflicts;
use crate::adapters::database::traits::{
    CatalogStore, GeneRepository, ReportRepository, VariantRepository,
};
use crate::domain::statistics::{rank_counts, ChromosomeCount, ImpactCount};
use crate::domain::{
    Gene, GeneDeletion, GeneId, GeneStatistics, GeneWithCount, GeneticVariant, ImpactType,
    PatientVariantReport, ReportDetail, ReportFilter, ReportId, ReportTotals, Result,
    VariantDetail, VariantFilter, VariantId, VariantStatistics,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    genes: HashMap<GeneId, Gene>,
    variants: HashMap<VariantId, GeneticVariant>,
    reports: HashMap<ReportId, PatientVariantReport>,
}

impl Tables {
    fn variants_of(&self, gene_id: GeneId) -> i64 {
        self.variants
            .values()
            .filter(|v| v.gene_id == gene_id)
            .count() as i64
    }

    fn variant_detail(&self, variant: &GeneticVariant) -> Option<VariantDetail> {
        self.genes.get(&variant.gene_id).map(|gene| VariantDetail {
            variant: variant.clone(),
            gene_symbol: gene.symbol.clone(),
            gene_full_name: gene.full_name.clone(),
        })
    }

    fn report_detail(&self, report: &PatientVariantReport) -> Option<ReportDetail> {
        let variant = self.variants.get(&report.variant_id)?;
        let gene = self.genes.get(&variant.gene_id)?;
        Some(ReportDetail {
            report: report.clone(),
            variant: variant.clone(),
            gene_symbol: gene.symbol.clone(),
            gene_full_name: gene.full_name.clone(),
        })
    }
}

/// Catalog store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GeneRepository for MemoryStore {
    async fn list_genes(&self, symbol_contains: Option<&str>) -> Result<Vec<GeneWithCount>> {
        let tables = self.tables.read().await;
        let needle = symbol_contains.map(str::to_lowercase);

        let mut rows: Vec<GeneWithCount> = tables
            .genes
            .values()
            .filter(|g| {
                needle
                    .as_deref()
                    .map_or(true, |n| g.symbol.to_lowercase().contains(n))
            })
            .map(|g| GeneWithCount {
                gene: g.clone(),
                variants_count: tables.variants_of(g.id),
            })
            .collect();
        rows.sort_by(|a, b| a.gene.symbol.cmp(&b.gene.symbol));
        Ok(rows)
    }

    async fn get_gene(&self, id: GeneId) -> Result<Option<Gene>> {
        Ok(self.tables.read().await.genes.get(&id).cloned())
    }

    async fn find_gene_by_symbol(&self, symbol: &str) -> Result<Option<Gene>> {
        let tables = self.tables.read().await;
        Ok(tables.genes.values().find(|g| g.symbol == symbol).cloned())
    }

    async fn insert_gene(&self, gene: &Gene) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.genes.values().any(|g| g.symbol == gene.symbol) {
            return Err(conflicts::duplicate_symbol(&gene.symbol));
        }
        tables.genes.insert(gene.id, gene.clone());
        Ok(())
    }

    async fn update_gene(&self, gene: &Gene) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.genes.get_mut(&gene.id) {
            Some(existing) => {
                existing.full_name = gene.full_name.clone();
                existing.function_summary = gene.function_summary.clone();
                existing.updated_at = gene.updated_at;
                Ok(())
            }
            None => Err(conflicts::gene_not_found(gene.id)),
        }
    }

    async fn delete_gene(&self, id: GeneId) -> Result<GeneDeletion> {
        let mut tables = self.tables.write().await;
        if !tables.genes.contains_key(&id) {
            return Ok(GeneDeletion::Missing);
        }
        let variants_count = tables.variants_of(id);
        if variants_count > 0 {
            return Ok(GeneDeletion::Referenced { variants_count });
        }
        tables.genes.remove(&id);
        Ok(GeneDeletion::Deleted)
    }

    async fn gene_statistics(&self) -> Result<GeneStatistics> {
        let tables = self.tables.read().await;
        let total_genes = tables.genes.len() as i64;
        let with_variants: HashSet<GeneId> = tables.variants.values().map(|v| v.gene_id).collect();
        let genes_with_variants = with_variants.len() as i64;
        Ok(GeneStatistics {
            total_genes,
            genes_with_variants,
            genes_without_variants: total_genes - genes_with_variants,
        })
    }
}

#[async_trait]
impl VariantRepository for MemoryStore {
    async fn list_variants(&self, filter: &VariantFilter) -> Result<Vec<VariantDetail>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<VariantDetail> = tables
            .variants
            .values()
            .filter_map(|v| tables.variant_detail(v))
            .filter(|d| filter.matches(d))
            .collect();
        rows.sort_by(|a, b| {
            a.variant
                .chromosome
                .cmp(&b.variant.chromosome)
                .then(a.variant.position.cmp(&b.variant.position))
        });
        Ok(rows)
    }

    async fn get_variant(&self, id: VariantId) -> Result<Option<VariantDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .variants
            .get(&id)
            .and_then(|v| tables.variant_detail(v)))
    }

    async fn insert_variant(&self, variant: &GeneticVariant) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.genes.contains_key(&variant.gene_id) {
            return Err(conflicts::gene_not_found(variant.gene_id));
        }
        if tables
            .variants
            .values()
            .any(|v| v.same_locus_and_change(variant))
        {
            return Err(conflicts::duplicate_variant(variant));
        }
        tables.variants.insert(variant.id, variant.clone());
        Ok(())
    }

    async fn update_variant(&self, variant: &GeneticVariant) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.variants.contains_key(&variant.id) {
            return Err(conflicts::variant_not_found(variant.id));
        }
        if tables
            .variants
            .values()
            .any(|v| v.id != variant.id && v.same_locus_and_change(variant))
        {
            return Err(conflicts::duplicate_variant(variant));
        }
        if let Some(existing) = tables.variants.get_mut(&variant.id) {
            existing.impact = variant.impact;
            existing.reference_base = variant.reference_base.clone();
            existing.alternate_base = variant.alternate_base.clone();
            existing.updated_at = variant.updated_at;
        }
        Ok(())
    }

    async fn delete_variant(&self, id: VariantId) -> Result<Option<u64>> {
        let mut tables = self.tables.write().await;
        if tables.variants.remove(&id).is_none() {
            return Ok(None);
        }
        let before = tables.reports.len();
        tables.reports.retain(|_, r| r.variant_id != id);
        Ok(Some((before - tables.reports.len()) as u64))
    }

    async fn variant_statistics(&self, top_chromosomes: usize) -> Result<VariantStatistics> {
        let tables = self.tables.read().await;

        let mut by_impact: BTreeMap<ImpactType, i64> = BTreeMap::new();
        let mut by_chromosome: HashMap<String, i64> = HashMap::new();
        for v in tables.variants.values() {
            *by_impact.entry(v.impact).or_default() += 1;
            *by_chromosome.entry(v.chromosome.clone()).or_default() += 1;
        }

        Ok(VariantStatistics {
            total_variants: tables.variants.len() as i64,
            by_impact: by_impact
                .into_iter()
                .map(|(impact, count)| ImpactCount { impact, count })
                .collect(),
            top_chromosomes: rank_counts(by_chromosome.into_iter().collect(), top_chromosomes)
                .into_iter()
                .map(|(chromosome, count)| ChromosomeCount { chromosome, count })
                .collect(),
        })
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn list_reports(&self, filter: &ReportFilter) -> Result<Vec<ReportDetail>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<ReportDetail> = tables
            .reports
            .values()
            .filter_map(|r| tables.report_detail(r))
            .filter(|d| filter.matches(d))
            .collect();
        rows.sort_by(|a, b| {
            b.report
                .detection_date
                .cmp(&a.report.detection_date)
                .then(b.report.created_at.cmp(&a.report.created_at))
        });
        Ok(rows)
    }

    async fn get_report(&self, id: ReportId) -> Result<Option<ReportDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reports
            .get(&id)
            .and_then(|r| tables.report_detail(r)))
    }

    async fn insert_report(&self, report: &PatientVariantReport) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.variants.contains_key(&report.variant_id) {
            return Err(conflicts::variant_not_found(report.variant_id));
        }
        if tables.reports.values().any(|r| r.same_detection(report)) {
            return Err(conflicts::duplicate_report(report));
        }
        tables.reports.insert(report.id, report.clone());
        Ok(())
    }

    async fn update_report(&self, report: &PatientVariantReport) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.reports.contains_key(&report.id) {
            return Err(conflicts::report_not_found(report.id));
        }
        if tables
            .reports
            .values()
            .any(|r| r.id != report.id && r.same_detection(report))
        {
            return Err(conflicts::duplicate_report(report));
        }
        if let Some(existing) = tables.reports.get_mut(&report.id) {
            existing.detection_date = report.detection_date;
            existing.allele_frequency = report.allele_frequency;
            existing.updated_at = report.updated_at;
        }
        Ok(())
    }

    async fn delete_report(&self, id: ReportId) -> Result<bool> {
        Ok(self.tables.write().await.reports.remove(&id).is_some())
    }

    async fn report_totals(&self) -> Result<ReportTotals> {
        let tables = self.tables.read().await;
        let patients: HashSet<_> = tables.reports.values().map(|r| r.patient_id).collect();
        Ok(ReportTotals {
            total_reports: tables.reports.len() as i64,
            distinct_patients: patients.len() as i64,
        })
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }
}
