//! Clinical-data integration
//!
//! Reports embed patient demographics fetched from an external clinical
//! service. Lookups must never break the genomic response, so
//! [`ClinicalDataAdapter`] turns every provider failure into a degraded
//! [`ClinicalData`] record instead of an error.

pub mod client;
pub mod models;

pub use client::HttpClinicalProvider;
pub use models::ClinicalPatient;

use crate::config::ClinicalConfig;
use crate::domain::{ClinicalData, ClinicalServiceError, PatientId, Result};
use crate::log_clinical_degraded;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of patient demographics
#[async_trait]
pub trait ClinicalDataProvider: Send + Sync {
    /// Fetches one patient
    async fn fetch_patient(
        &self,
        patient_id: PatientId,
    ) -> std::result::Result<ClinicalPatient, ClinicalServiceError>;
}

/// Provider used while no clinical service is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingClinicalProvider;

#[async_trait]
impl ClinicalDataProvider for PendingClinicalProvider {
    async fn fetch_patient(
        &self,
        _patient_id: PatientId,
    ) -> std::result::Result<ClinicalPatient, ClinicalServiceError> {
        Err(ClinicalServiceError::NotConfigured)
    }
}

/// Infallible facade over a [`ClinicalDataProvider`]
#[derive(Clone)]
pub struct ClinicalDataAdapter {
    provider: Arc<dyn ClinicalDataProvider>,
}

impl ClinicalDataAdapter {
    pub fn new(provider: Arc<dyn ClinicalDataProvider>) -> Self {
        Self { provider }
    }

    /// Adapter that always answers `pending`
    pub fn pending() -> Self {
        Self::new(Arc::new(PendingClinicalProvider))
    }

    /// Builds the adapter described by configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &ClinicalConfig) -> Result<Self> {
        if !config.enabled {
            tracing::info!("Clinical integration disabled; reports will carry pending clinical data");
            return Ok(Self::pending());
        }

        tracing::info!(base_url = %config.base_url, "Clinical integration enabled");
        Ok(Self::new(Arc::new(HttpClinicalProvider::new(config)?)))
    }

    /// Clinical record for a patient; never fails
    pub async fn clinical_data_for(&self, patient_id: PatientId) -> ClinicalData {
        match self.provider.fetch_patient(patient_id).await {
            Ok(patient) => patient.into_clinical_data(patient_id),
            Err(ClinicalServiceError::NotConfigured) => ClinicalData::pending(patient_id),
            Err(e) => {
                log_clinical_degraded!(patient_id, e);
                ClinicalData::failed(patient_id, format!("Clinical data unavailable: {e}"))
            }
        }
    }
}

impl std::fmt::Debug for ClinicalDataAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClinicalDataAdapter").finish_non_exhaustive()
    }
}
