//! Row mapping for PostgreSQL
//!
//! Column lists and `Row` → domain conversions shared by the store queries.
//! Variant and report columns are aliased so a single joined row can be
//! decoded without name clashes.

use crate::domain::{
    Gene, GeneId, GeneWithCount, GeneticVariant, GenoSentinelError, ImpactType, PatientId,
    PatientVariantReport, ReportDetail, ReportId, Result, VariantDetail, VariantId,
};
use tokio_postgres::Row;

pub const GENE_COLUMNS: &str =
    "g.id, g.symbol, g.full_name, g.function_summary, g.created_at, g.updated_at";

pub const VARIANT_DETAIL_COLUMNS: &str = "v.id AS variant_id, v.gene_id, v.chromosome, \
     v.position, v.reference_base, v.alternate_base, v.impact, \
     v.created_at AS variant_created_at, v.updated_at AS variant_updated_at, \
     g.symbol AS gene_symbol, g.full_name AS gene_full_name";

pub const REPORT_DETAIL_COLUMNS: &str = "r.id AS report_id, r.patient_id, \
     r.detection_date, r.allele_frequency, \
     r.created_at AS report_created_at, r.updated_at AS report_updated_at";

fn column<'a, T>(row: &'a Row, name: &str) -> Result<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(name)
        .map_err(|e| GenoSentinelError::Database(format!("Failed to read column {name}: {e}")))
}

pub fn gene_from_row(row: &Row) -> Result<Gene> {
    Ok(Gene {
        id: GeneId::from_uuid(column(row, "id")?),
        symbol: column(row, "symbol")?,
        full_name: column(row, "full_name")?,
        function_summary: column(row, "function_summary")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

/// Expects [`GENE_COLUMNS`] plus a `variants_count` bigint
pub fn gene_with_count_from_row(row: &Row) -> Result<GeneWithCount> {
    Ok(GeneWithCount {
        gene: gene_from_row(row)?,
        variants_count: column(row, "variants_count")?,
    })
}

pub fn impact_from_text(raw: &str) -> Result<ImpactType> {
    raw.parse()
        .map_err(|e| GenoSentinelError::Database(format!("Corrupt impact value: {e}")))
}

fn variant_from_row(row: &Row) -> Result<GeneticVariant> {
    let impact: String = column(row, "impact")?;
    Ok(GeneticVariant {
        id: VariantId::from_uuid(column(row, "variant_id")?),
        gene_id: GeneId::from_uuid(column(row, "gene_id")?),
        chromosome: column(row, "chromosome")?,
        position: column(row, "position")?,
        reference_base: column(row, "reference_base")?,
        alternate_base: column(row, "alternate_base")?,
        impact: impact_from_text(&impact)?,
        created_at: column(row, "variant_created_at")?,
        updated_at: column(row, "variant_updated_at")?,
    })
}

/// Expects [`VARIANT_DETAIL_COLUMNS`]
pub fn variant_detail_from_row(row: &Row) -> Result<VariantDetail> {
    Ok(VariantDetail {
        variant: variant_from_row(row)?,
        gene_symbol: column(row, "gene_symbol")?,
        gene_full_name: column(row, "gene_full_name")?,
    })
}

/// Expects [`REPORT_DETAIL_COLUMNS`] together with [`VARIANT_DETAIL_COLUMNS`]
pub fn report_detail_from_row(row: &Row) -> Result<ReportDetail> {
    let variant = variant_from_row(row)?;
    let report = PatientVariantReport {
        id: ReportId::from_uuid(column(row, "report_id")?),
        patient_id: PatientId::from_uuid(column(row, "patient_id")?),
        variant_id: variant.id,
        detection_date: column(row, "detection_date")?,
        allele_frequency: column(row, "allele_frequency")?,
        created_at: column(row, "report_created_at")?,
        updated_at: column(row, "report_updated_at")?,
    };
    Ok(ReportDetail {
        report,
        variant,
        gene_symbol: column(row, "gene_symbol")?,
        gene_full_name: column(row, "gene_full_name")?,
    })
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
