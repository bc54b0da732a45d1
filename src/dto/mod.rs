//! Transfer objects exchanged over the HTTP surface
//!
//! Request payloads arrive with every field optional so that missing values
//! are reported as validation errors rather than deserialization failures.
//! Each validated DTO is built by a single constructor that checks every
//! rule and reports all violations together. Response DTOs are plain
//! serializable structs produced by [`crate::mappers`].

pub mod gene;
pub mod report;
pub mod variant;

use crate::domain::{GenoSentinelError, Result};
use serde::Serialize;

pub use gene::{
    GeneCreate, GeneDto, GeneListItem, GenePayload, GeneSearchResult, GeneUpdate,
    GeneUpdatePayload,
};
pub use report::{
    PatientReportsSummary, ReportCreate, ReportDto, ReportListItem, ReportPayload, ReportQuery,
    ReportUpdate, ReportUpdatePayload,
};
pub use variant::{
    VariantCreate, VariantDto, VariantListItem, VariantPayload, VariantQuery, VariantUpdate,
    VariantUpdatePayload, VariantsByChromosome, VariantsByGene,
};

/// `{count, results}` envelope used by every list endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Accumulates rule violations so a payload is rejected with every problem at once
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<String>);

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Records `message` when `ok` is false
    pub(crate) fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.push(message);
        }
    }

    /// Takes a required field, recording a violation when it is absent
    pub(crate) fn require<T>(&mut self, value: Option<T>, field: &str) -> Option<T> {
        if value.is_none() {
            self.push(format!("{field} is required"));
        }
        value
    }

    pub(crate) fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(GenoSentinelError::Validation(self.0.join("; ")))
        }
    }
}

/// Trims a free-text field, treating blank strings as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
