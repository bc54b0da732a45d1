//! Clinical data attached to patient reports at read time
//!
//! Records come from the external clinical-data service. The record is
//! never persisted; it is rebuilt for each response that embeds it.

use super::ids::PatientId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Message used when no clinical service is wired in
pub const PENDING_MESSAGE: &str = "Clinical service integration pending";

/// How the clinical record was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    /// Patient data was fetched from the clinical service
    Success,
    /// Integration is not configured
    Pending,
    /// The clinical service could not be reached or answered badly
    Failed,
}

/// Patient demographics as seen by the genomics service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalData {
    pub patient_id: PatientId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub integration_status: IntegrationStatus,
    pub message: Option<String>,
}

impl ClinicalData {
    /// Record for a patient whose data could not be looked up yet
    pub fn pending(patient_id: PatientId) -> Self {
        Self::degraded(patient_id, IntegrationStatus::Pending, PENDING_MESSAGE)
    }

    /// Record for a lookup that failed
    pub fn failed(patient_id: PatientId, message: impl Into<String>) -> Self {
        Self::degraded(patient_id, IntegrationStatus::Failed, message)
    }

    fn degraded(
        patient_id: PatientId,
        integration_status: IntegrationStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            first_name: None,
            last_name: None,
            birth_date: None,
            gender: None,
            status: None,
            integration_status,
            message: Some(message.into()),
        }
    }
}
