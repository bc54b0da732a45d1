//! Error constructors shared by every storage backend
//!
//! Keeps the wording of uniqueness and missing-parent errors identical
//! whichever backend raised them.

use crate::domain::{
    GeneId, GeneticVariant, GenoSentinelError, PatientVariantReport, ReportId, VariantId,
};

pub fn duplicate_symbol(symbol: &str) -> GenoSentinelError {
    GenoSentinelError::Conflict(format!("Gene with symbol '{symbol}' already exists"))
}

pub fn duplicate_variant(variant: &GeneticVariant) -> GenoSentinelError {
    GenoSentinelError::Conflict(format!(
        "Variant {}:{} {} already exists for this gene",
        variant.chromosome,
        variant.position,
        variant.mutation()
    ))
}

pub fn duplicate_report(report: &PatientVariantReport) -> GenoSentinelError {
    GenoSentinelError::Conflict(format!(
        "A report for patient {} and variant {} on {} already exists",
        report.patient_id, report.variant_id, report.detection_date
    ))
}

pub fn gene_not_found(id: GeneId) -> GenoSentinelError {
    GenoSentinelError::NotFound(format!("Gene with ID {id} not found"))
}

pub fn variant_not_found(id: VariantId) -> GenoSentinelError {
    GenoSentinelError::NotFound(format!("Variant with ID {id} not found"))
}

pub fn report_not_found(id: ReportId) -> GenoSentinelError {
    GenoSentinelError::NotFound(format!("Report with ID {id} not found"))
}
