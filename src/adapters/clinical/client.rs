//! HTTP client for the clinical-data service

use super::models::ClinicalPatient;
use super::ClinicalDataProvider;
use crate::config::{ClinicalConfig, SecretString};
use crate::domain::{ClinicalServiceError, GenoSentinelError, PatientId, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Fetches patient demographics over HTTP
///
/// # Example
///
/// ```no_run
/// use genosentinel::adapters::clinical::HttpClinicalProvider;
/// use genosentinel::config::{secret_string, ClinicalConfig};
///
/// # fn example() -> genosentinel::domain::Result<()> {
/// let config = ClinicalConfig {
///     enabled: true,
///     base_url: "https://clinical.example.org".to_string(),
///     api_token: Some(secret_string("token".to_string())),
///     ..ClinicalConfig::default()
/// };
/// let provider = HttpClinicalProvider::new(&config)?;
/// # Ok(())
/// # }
/// ```
pub struct HttpClinicalProvider {
    base_url: String,
    client: Client,
    api_token: Option<SecretString>,
}

impl HttpClinicalProvider {
    /// Build the provider from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ClinicalConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| {
                GenoSentinelError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            api_token: config.api_token.clone(),
        })
    }

    fn patient_url(&self, patient_id: PatientId) -> String {
        format!("{}/api/patients/{}", self.base_url, patient_id)
    }
}

fn request_error(e: reqwest::Error) -> ClinicalServiceError {
    if e.is_timeout() {
        ClinicalServiceError::Timeout(e.to_string())
    } else {
        ClinicalServiceError::ConnectionFailed(e.to_string())
    }
}

#[async_trait]
impl ClinicalDataProvider for HttpClinicalProvider {
    async fn fetch_patient(
        &self,
        patient_id: PatientId,
    ) -> std::result::Result<ClinicalPatient, ClinicalServiceError> {
        let mut request = self
            .client
            .get(self.patient_url(patient_id))
            .header("Accept", "application/json");
        if let Some(ref token) = self.api_token {
            let token: &str = token.expose_secret().as_ref();
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(request_error)?;

        match resp.status() {
            status if status.is_success() => {
                resp.json::<ClinicalPatient>().await.map_err(|e| {
                    if e.is_timeout() {
                        ClinicalServiceError::Timeout(e.to_string())
                    } else {
                        ClinicalServiceError::InvalidResponse(e.to_string())
                    }
                })
            }
            StatusCode::NOT_FOUND => Err(ClinicalServiceError::UnexpectedStatus {
                status: 404,
                message: format!("Patient {patient_id} not found in clinical service"),
            }),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(ClinicalServiceError::UnexpectedStatus {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}
