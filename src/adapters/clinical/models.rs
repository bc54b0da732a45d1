//! Wire types for the clinical-data service

use crate::domain::{ClinicalData, IntegrationStatus, PatientId};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Patient as returned by `GET /api/patients/{id}`
///
/// The service answers in camelCase; snake_case is accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClinicalPatient {
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,

    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,

    #[serde(default, alias = "birthDate", deserialize_with = "lenient_date")]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

impl ClinicalPatient {
    /// Successful clinical record for the requested patient
    pub fn into_clinical_data(self, patient_id: PatientId) -> ClinicalData {
        ClinicalData {
            patient_id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            gender: self.gender,
            status: self.status,
            integration_status: IntegrationStatus::Success,
            message: None,
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; keeps the date part
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("unrecognised birth date '{raw}'")))
}
