//! PostgreSQL catalog store
//!
//! Implements the repository traits on top of [`PostgreSQLClient`].
//! Uniqueness and foreign keys are enforced by the schema; violations are
//! mapped back to the same `Conflict` and `NotFound` errors the in-memory
//! backend produces.

use crate::adapters::database::conflicts;
use crate::adapters::database::traits::{
    CatalogStore, GeneRepository, ReportRepository, VariantRepository,
};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    escape_like, gene_from_row, gene_with_count_from_row, impact_from_text,
    report_detail_from_row, variant_detail_from_row, GENE_COLUMNS, REPORT_DETAIL_COLUMNS,
    VARIANT_DETAIL_COLUMNS,
};
use crate::domain::statistics::{ChromosomeCount, ImpactCount};
use crate::domain::{
    Gene, GeneDeletion, GeneId, GeneStatistics, GeneWithCount, GeneticVariant, GenoSentinelError,
    PatientVariantReport, ReportDetail, ReportFilter, ReportId, ReportTotals, Result,
    VariantDetail, VariantFilter, VariantId, VariantStatistics,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::error::SqlState;

/// PostgreSQL implementation of [`CatalogStore`]
pub struct PostgreSQLStore {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLStore {
    /// Create a new store around a pooled client
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn database_error(context: &str, e: tokio_postgres::Error) -> GenoSentinelError {
    GenoSentinelError::Database(format!("{context}: {e}"))
}

/// Maps constraint violations to domain errors, everything else to `Database`
fn write_error(
    context: &str,
    e: tokio_postgres::Error,
    on_unique: impl FnOnce() -> GenoSentinelError,
    on_missing_parent: impl FnOnce() -> GenoSentinelError,
) -> GenoSentinelError {
    match e.code() {
        Some(code) if *code == SqlState::UNIQUE_VIOLATION => on_unique(),
        Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => on_missing_parent(),
        _ => database_error(context, e),
    }
}

fn variant_detail_query(filter_clause: &str) -> String {
    format!(
        "SELECT {VARIANT_DETAIL_COLUMNS} FROM genetic_variants v \
         JOIN genes g ON g.id = v.gene_id {filter_clause} \
         ORDER BY v.chromosome, v.position"
    )
}

fn report_detail_query(filter_clause: &str) -> String {
    format!(
        "SELECT {REPORT_DETAIL_COLUMNS}, {VARIANT_DETAIL_COLUMNS} \
         FROM patient_variant_reports r \
         JOIN genetic_variants v ON v.id = r.variant_id \
         JOIN genes g ON g.id = v.gene_id {filter_clause} \
         ORDER BY r.detection_date DESC, r.created_at DESC"
    )
}

#[async_trait]
impl GeneRepository for PostgreSQLStore {
    async fn list_genes(&self, symbol_contains: Option<&str>) -> Result<Vec<GeneWithCount>> {
        let pattern = symbol_contains.map(|s| format!("%{}%", escape_like(s)));
        let sql = format!(
            "SELECT {GENE_COLUMNS}, COUNT(v.id) AS variants_count \
             FROM genes g LEFT JOIN genetic_variants v ON v.gene_id = g.id \
             WHERE ($1::text IS NULL OR g.symbol ILIKE $1) \
             GROUP BY g.id ORDER BY g.symbol"
        );
        let rows = self.client.query(&sql, &[&pattern]).await?;
        rows.iter().map(gene_with_count_from_row).collect()
    }

    async fn get_gene(&self, id: GeneId) -> Result<Option<Gene>> {
        let sql = format!("SELECT {GENE_COLUMNS} FROM genes g WHERE g.id = $1");
        self.client
            .query_opt(&sql, &[id.as_uuid()])
            .await?
            .as_ref()
            .map(gene_from_row)
            .transpose()
    }

    async fn find_gene_by_symbol(&self, symbol: &str) -> Result<Option<Gene>> {
        let sql = format!("SELECT {GENE_COLUMNS} FROM genes g WHERE g.symbol = $1");
        self.client
            .query_opt(&sql, &[&symbol])
            .await?
            .as_ref()
            .map(gene_from_row)
            .transpose()
    }

    async fn insert_gene(&self, gene: &Gene) -> Result<()> {
        let conn = self.client.get_connection().await?;
        conn.execute(
            "INSERT INTO genes (id, symbol, full_name, function_summary, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                gene.id.as_uuid(),
                &gene.symbol,
                &gene.full_name,
                &gene.function_summary,
                &gene.created_at,
                &gene.updated_at,
            ],
        )
        .await
        .map_err(|e| {
            write_error(
                "Failed to insert gene",
                e,
                || conflicts::duplicate_symbol(&gene.symbol),
                || conflicts::gene_not_found(gene.id),
            )
        })?;
        Ok(())
    }

    async fn update_gene(&self, gene: &Gene) -> Result<()> {
        let conn = self.client.get_connection().await?;
        let updated = conn
            .execute(
                "UPDATE genes SET full_name = $2, function_summary = $3, updated_at = $4 \
                 WHERE id = $1",
                &[
                    gene.id.as_uuid(),
                    &gene.full_name,
                    &gene.function_summary,
                    &gene.updated_at,
                ],
            )
            .await
            .map_err(|e| database_error("Failed to update gene", e))?;

        if updated == 0 {
            return Err(conflicts::gene_not_found(gene.id));
        }
        Ok(())
    }

    async fn delete_gene(&self, id: GeneId) -> Result<GeneDeletion> {
        let mut conn = self.client.get_connection().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| database_error("Failed to start transaction", e))?;

        // Row lock blocks concurrent variant inserts until the decision commits
        let locked = tx
            .query_opt("SELECT id FROM genes WHERE id = $1 FOR UPDATE", &[id.as_uuid()])
            .await
            .map_err(|e| database_error("Failed to lock gene", e))?;
        if locked.is_none() {
            return Ok(GeneDeletion::Missing);
        }

        let variants_count: i64 = tx
            .query_one(
                "SELECT COUNT(*) FROM genetic_variants WHERE gene_id = $1",
                &[id.as_uuid()],
            )
            .await
            .map_err(|e| database_error("Failed to count variants", e))?
            .get(0);
        if variants_count > 0 {
            return Ok(GeneDeletion::Referenced { variants_count });
        }

        tx.execute("DELETE FROM genes WHERE id = $1", &[id.as_uuid()])
            .await
            .map_err(|e| database_error("Failed to delete gene", e))?;
        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit gene deletion", e))?;
        Ok(GeneDeletion::Deleted)
    }

    async fn gene_statistics(&self) -> Result<GeneStatistics> {
        let rows = self
            .client
            .query(
                "SELECT (SELECT COUNT(*) FROM genes) AS total_genes, \
                 (SELECT COUNT(DISTINCT gene_id) FROM genetic_variants) AS genes_with_variants",
                &[],
            )
            .await?;
        let row = rows
            .first()
            .ok_or_else(|| GenoSentinelError::Database("Gene statistics returned no row".into()))?;

        let total_genes: i64 = row.get("total_genes");
        let genes_with_variants: i64 = row.get("genes_with_variants");
        Ok(GeneStatistics {
            total_genes,
            genes_with_variants,
            genes_without_variants: total_genes - genes_with_variants,
        })
    }
}

#[async_trait]
impl VariantRepository for PostgreSQLStore {
    async fn list_variants(&self, filter: &VariantFilter) -> Result<Vec<VariantDetail>> {
        let sql = variant_detail_query(
            "WHERE ($1::uuid IS NULL OR v.gene_id = $1) \
             AND ($2::text IS NULL OR v.chromosome = $2) \
             AND ($3::text IS NULL OR v.impact = $3)",
        );
        let gene_id = filter.gene_id.map(GeneId::into_inner);
        let impact = filter.impact.map(|i| i.as_str());
        let rows = self
            .client
            .query(&sql, &[&gene_id, &filter.chromosome, &impact])
            .await?;
        rows.iter().map(variant_detail_from_row).collect()
    }

    async fn get_variant(&self, id: VariantId) -> Result<Option<VariantDetail>> {
        let sql = variant_detail_query("WHERE v.id = $1");
        self.client
            .query_opt(&sql, &[id.as_uuid()])
            .await?
            .as_ref()
            .map(variant_detail_from_row)
            .transpose()
    }

    async fn insert_variant(&self, variant: &GeneticVariant) -> Result<()> {
        let conn = self.client.get_connection().await?;
        conn.execute(
            "INSERT INTO genetic_variants \
             (id, gene_id, chromosome, position, reference_base, alternate_base, impact, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            &[
                variant.id.as_uuid(),
                variant.gene_id.as_uuid(),
                &variant.chromosome,
                &variant.position,
                &variant.reference_base,
                &variant.alternate_base,
                &variant.impact.as_str(),
                &variant.created_at,
                &variant.updated_at,
            ],
        )
        .await
        .map_err(|e| {
            write_error(
                "Failed to insert variant",
                e,
                || conflicts::duplicate_variant(variant),
                || conflicts::gene_not_found(variant.gene_id),
            )
        })?;
        Ok(())
    }

    async fn update_variant(&self, variant: &GeneticVariant) -> Result<()> {
        let conn = self.client.get_connection().await?;
        let updated = conn
            .execute(
                "UPDATE genetic_variants \
                 SET impact = $2, reference_base = $3, alternate_base = $4, updated_at = $5 \
                 WHERE id = $1",
                &[
                    variant.id.as_uuid(),
                    &variant.impact.as_str(),
                    &variant.reference_base,
                    &variant.alternate_base,
                    &variant.updated_at,
                ],
            )
            .await
            .map_err(|e| {
                write_error(
                    "Failed to update variant",
                    e,
                    || conflicts::duplicate_variant(variant),
                    || conflicts::gene_not_found(variant.gene_id),
                )
            })?;

        if updated == 0 {
            return Err(conflicts::variant_not_found(variant.id));
        }
        Ok(())
    }

    async fn delete_variant(&self, id: VariantId) -> Result<Option<u64>> {
        let mut conn = self.client.get_connection().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| database_error("Failed to start transaction", e))?;

        let reports: i64 = tx
            .query_one(
                "SELECT COUNT(*) FROM patient_variant_reports WHERE variant_id = $1",
                &[id.as_uuid()],
            )
            .await
            .map_err(|e| database_error("Failed to count reports", e))?
            .get(0);

        // Reports go with the variant through ON DELETE CASCADE
        let deleted = tx
            .execute("DELETE FROM genetic_variants WHERE id = $1", &[id.as_uuid()])
            .await
            .map_err(|e| database_error("Failed to delete variant", e))?;
        if deleted == 0 {
            return Ok(None);
        }

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit variant deletion", e))?;
        Ok(Some(reports as u64))
    }

    async fn variant_statistics(&self, top_chromosomes: usize) -> Result<VariantStatistics> {
        let total: i64 = self
            .client
            .query("SELECT COUNT(*) FROM genetic_variants", &[])
            .await?
            .first()
            .map(|row| row.get(0))
            .unwrap_or(0);

        let mut by_impact = self
            .client
            .query(
                "SELECT impact, COUNT(*) AS count FROM genetic_variants GROUP BY impact",
                &[],
            )
            .await?
            .iter()
            .map(|row| {
                Ok(ImpactCount {
                    impact: impact_from_text(row.get("impact"))?,
                    count: row.get("count"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        by_impact.sort_by_key(|c| c.impact);

        let limit = top_chromosomes as i64;
        let top_chromosomes = self
            .client
            .query(
                "SELECT chromosome, COUNT(*) AS count FROM genetic_variants \
                 GROUP BY chromosome ORDER BY count DESC, chromosome ASC LIMIT $1",
                &[&limit],
            )
            .await?
            .iter()
            .map(|row| ChromosomeCount {
                chromosome: row.get("chromosome"),
                count: row.get("count"),
            })
            .collect();

        Ok(VariantStatistics {
            total_variants: total,
            by_impact,
            top_chromosomes,
        })
    }
}

#[async_trait]
impl ReportRepository for PostgreSQLStore {
    async fn list_reports(&self, filter: &ReportFilter) -> Result<Vec<ReportDetail>> {
        let sql = report_detail_query(
            "WHERE ($1::uuid IS NULL OR r.patient_id = $1) \
             AND ($2::text IS NULL OR g.symbol = $2)",
        );
        let patient_id = filter.patient_id.map(|p| p.into_inner());
        let rows = self
            .client
            .query(&sql, &[&patient_id, &filter.gene_symbol])
            .await?;
        rows.iter().map(report_detail_from_row).collect()
    }

    async fn get_report(&self, id: ReportId) -> Result<Option<ReportDetail>> {
        let sql = report_detail_query("WHERE r.id = $1");
        self.client
            .query_opt(&sql, &[id.as_uuid()])
            .await?
            .as_ref()
            .map(report_detail_from_row)
            .transpose()
    }

    async fn insert_report(&self, report: &PatientVariantReport) -> Result<()> {
        let conn = self.client.get_connection().await?;
        conn.execute(
            "INSERT INTO patient_variant_reports \
             (id, patient_id, variant_id, detection_date, allele_frequency, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
            &[
                report.id.as_uuid(),
                report.patient_id.as_uuid(),
                report.variant_id.as_uuid(),
                &report.detection_date,
                &report.allele_frequency,
                &report.created_at,
                &report.updated_at,
            ],
        )
        .await
        .map_err(|e| {
            write_error(
                "Failed to insert report",
                e,
                || conflicts::duplicate_report(report),
                || conflicts::variant_not_found(report.variant_id),
            )
        })?;
        Ok(())
    }

    async fn update_report(&self, report: &PatientVariantReport) -> Result<()> {
        let conn = self.client.get_connection().await?;
        let updated = conn
            .execute(
                "UPDATE patient_variant_reports \
                 SET detection_date = $2, allele_frequency = $3, updated_at = $4 WHERE id = $1",
                &[
                    report.id.as_uuid(),
                    &report.detection_date,
                    &report.allele_frequency,
                    &report.updated_at,
                ],
            )
            .await
            .map_err(|e| {
                write_error(
                    "Failed to update report",
                    e,
                    || conflicts::duplicate_report(report),
                    || conflicts::variant_not_found(report.variant_id),
                )
            })?;

        if updated == 0 {
            return Err(conflicts::report_not_found(report.id));
        }
        Ok(())
    }

    async fn delete_report(&self, id: ReportId) -> Result<bool> {
        let conn = self.client.get_connection().await?;
        let deleted = conn
            .execute(
                "DELETE FROM patient_variant_reports WHERE id = $1",
                &[id.as_uuid()],
            )
            .await
            .map_err(|e| database_error("Failed to delete report", e))?;
        Ok(deleted > 0)
    }

    async fn report_totals(&self) -> Result<ReportTotals> {
        let rows = self
            .client
            .query(
                "SELECT COUNT(*) AS total_reports, COUNT(DISTINCT patient_id) AS distinct_patients \
                 FROM patient_variant_reports",
                &[],
            )
            .await?;
        Ok(rows
            .first()
            .map(|row| ReportTotals {
                total_reports: row.get("total_reports"),
                distinct_patients: row.get("distinct_patients"),
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl CatalogStore for PostgreSQLStore {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_database_exists().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_query_orders_by_locus() {
        let sql = variant_detail_query("WHERE v.id = $1");
        assert!(sql.contains("JOIN genes g ON g.id = v.gene_id WHERE v.id = $1"));
        assert!(sql.ends_with("ORDER BY v.chromosome, v.position"));
    }

    #[test]
    fn test_report_query_orders_newest_first() {
        let sql = report_detail_query("");
        assert!(sql.contains("FROM patient_variant_reports r"));
        assert!(sql.ends_with("ORDER BY r.detection_date DESC, r.created_at DESC"));
    }
}
