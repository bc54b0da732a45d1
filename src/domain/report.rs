//! Patient variant report domain model

use super::ids::{PatientId, ReportId, VariantId};
use super::variant::GeneticVariant;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of fractional digits kept for allele frequencies
pub const ALLELE_FREQUENCY_SCALE: u32 = 4;

/// Persisted report linking an external patient to a catalogued variant
///
/// Unique on (patient_id, variant_id, detection_date). The allele frequency
/// is always within [0, 1] with exactly four fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientVariantReport {
    pub id: ReportId,
    pub patient_id: PatientId,
    pub variant_id: VariantId,
    pub detection_date: NaiveDate,
    pub allele_frequency: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatientVariantReport {
    /// True when both reports describe the same patient, variant and day
    pub fn same_detection(&self, other: &PatientVariantReport) -> bool {
        self.patient_id == other.patient_id
            && self.variant_id == other.variant_id
            && self.detection_date == other.detection_date
    }
}

/// Report joined with its variant and gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDetail {
    pub report: PatientVariantReport,
    pub variant: GeneticVariant,
    pub gene_symbol: String,
    pub gene_full_name: String,
}

/// Optional list filters, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub patient_id: Option<PatientId>,
    pub gene_symbol: Option<String>,
}

impl ReportFilter {
    /// Filter selecting every report of one patient
    pub fn for_patient(patient_id: PatientId) -> Self {
        Self {
            patient_id: Some(patient_id),
            gene_symbol: None,
        }
    }

    /// Returns true if the detail passes every set filter
    pub fn matches(&self, detail: &ReportDetail) -> bool {
        self.patient_id
            .map_or(true, |p| detail.report.patient_id == p)
            && self
                .gene_symbol
                .as_deref()
                .map_or(true, |s| detail.gene_symbol == s)
    }
}

/// Headline counts across every report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportTotals {
    pub total_reports: i64,
    pub distinct_patients: i64,
}
