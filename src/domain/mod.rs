//! Domain models and types for GenoSentinel.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`GeneId`], [`VariantId`], [`ReportId`], [`PatientId`])
//! - **Persisted models** ([`Gene`], [`GeneticVariant`], [`PatientVariantReport`])
//! - **Clinical data** attached to reports at read time ([`ClinicalData`])
//! - **Error types** ([`GenoSentinelError`], [`ClinicalServiceError`])
//! - **Result type alias** ([`Result`])
//!
//! Ownership runs Gene → GeneticVariant → PatientVariantReport. Patients are
//! external and referenced only by identifier.

pub mod clinical;
pub mod errors;
pub mod gene;
pub mod ids;
pub mod impact;
pub mod report;
pub mod result;
pub mod statistics;
pub mod variant;

pub use clinical::{ClinicalData, IntegrationStatus};
pub use errors::{ClinicalServiceError, GenoSentinelError};
pub use gene::{Gene, GeneDeletion, GeneWithCount};
pub use ids::{GeneId, PatientId, ReportId, VariantId};
pub use impact::ImpactType;
pub use report::{PatientVariantReport, ReportDetail, ReportFilter, ReportTotals};
pub use result::Result;
pub use statistics::{
    ChromosomeCount, GeneCount, GeneStatistics, GeneralStatistics, ImpactCount,
    PatientStatistics, VariantStatistics,
};
pub use variant::{GeneticVariant, VariantDetail, VariantFilter};
