//! Patient variant report transfer objects

use super::{non_blank, Violations};
use crate::domain::report::ALLELE_FREQUENCY_SCALE;
use crate::domain::{
    ClinicalData, GenoSentinelError, ImpactType, PatientId, ReportFilter, ReportId, Result,
    VariantId,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Raw body of `POST /patient-reports/`
///
/// `allele_frequency` may be sent as a JSON string or number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportPayload {
    pub patient_id: Option<String>,
    pub variant_id: Option<String>,
    pub detection_date: Option<String>,
    pub allele_frequency: Option<Value>,
}

/// Raw body of `PUT`/`PATCH /patient-reports/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportUpdatePayload {
    pub detection_date: Option<String>,
    pub allele_frequency: Option<Value>,
}

/// Validated report creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCreate {
    patient_id: PatientId,
    variant_id: VariantId,
    detection_date: NaiveDate,
    allele_frequency: Decimal,
}

impl ReportCreate {
    /// Validates a creation payload against the calendar date `today`
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error listing every violated rule.
    pub fn new(payload: ReportPayload, today: NaiveDate) -> Result<Self> {
        let mut v = Violations::new();

        let patient_id = v
            .require(non_blank(payload.patient_id), "patient_id")
            .and_then(|raw| PatientId::parse(&raw).map_err(|e| v.push(e)).ok());
        let variant_id = v
            .require(non_blank(payload.variant_id), "variant_id")
            .and_then(|raw| VariantId::parse(&raw).map_err(|e| v.push(e)).ok());
        let detection_date = v
            .require(non_blank(payload.detection_date), "detection_date")
            .and_then(|raw| parse_detection_date(&raw, today, &mut v));
        let allele_frequency = v
            .require(payload.allele_frequency.filter(|f| !f.is_null()), "allele_frequency")
            .and_then(|raw| parse_allele_frequency(&raw, &mut v));

        v.into_result()?;

        let (Some(patient_id), Some(variant_id), Some(detection_date), Some(allele_frequency)) =
            (patient_id, variant_id, detection_date, allele_frequency)
        else {
            return Err(GenoSentinelError::Validation(
                "report payload is incomplete".to_string(),
            ));
        };

        Ok(Self {
            patient_id,
            variant_id,
            detection_date,
            allele_frequency,
        })
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn variant_id(&self) -> VariantId {
        self.variant_id
    }

    pub fn detection_date(&self) -> NaiveDate {
        self.detection_date
    }

    pub fn allele_frequency(&self) -> Decimal {
        self.allele_frequency
    }
}

/// Validated partial report update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportUpdate {
    detection_date: Option<NaiveDate>,
    allele_frequency: Option<Decimal>,
}

impl ReportUpdate {
    /// Validates the fields present in an update payload
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if a provided field breaks a creation rule.
    pub fn new(payload: ReportUpdatePayload, today: NaiveDate) -> Result<Self> {
        let mut v = Violations::new();

        let detection_date = payload
            .detection_date
            .and_then(|raw| parse_detection_date(raw.trim(), today, &mut v));
        let allele_frequency = payload
            .allele_frequency
            .filter(|f| !f.is_null())
            .and_then(|raw| parse_allele_frequency(&raw, &mut v));

        v.into_result()?;
        Ok(Self {
            detection_date,
            allele_frequency,
        })
    }

    pub fn detection_date(&self) -> Option<NaiveDate> {
        self.detection_date
    }

    pub fn allele_frequency(&self) -> Option<Decimal> {
        self.allele_frequency
    }
}

/// Query string of `GET /patient-reports/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub patient_id: Option<String>,
    pub gene_symbol: Option<String>,
}

impl ReportQuery {
    /// Converts the raw query into a typed filter
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for a malformed `patient_id`.
    pub fn into_filter(self) -> Result<ReportFilter> {
        let patient_id = non_blank(self.patient_id)
            .map(|raw| PatientId::parse(&raw).map_err(GenoSentinelError::Validation))
            .transpose()?;
        Ok(ReportFilter {
            patient_id,
            gene_symbol: non_blank(self.gene_symbol).map(|s| s.to_uppercase()),
        })
    }
}

fn parse_detection_date(raw: &str, today: NaiveDate, v: &mut Violations) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) if date > today => {
            v.push("detection_date cannot be in the future");
            None
        }
        Ok(date) => Some(date),
        Err(_) => {
            v.push(format!(
                "detection_date '{raw}' is not a valid date (expected YYYY-MM-DD)"
            ));
            None
        }
    }
}

/// Parses an allele frequency and brings it to four fractional digits
///
/// Values outside [0, 1] or carrying more than four significant
/// fractional digits are rejected.
fn parse_allele_frequency(raw: &Value, v: &mut Violations) -> Option<Decimal> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => {
            v.push("allele_frequency must be a decimal number");
            return None;
        }
    };

    let value = match parse_exact_decimal(&text) {
        Some(value) => value,
        // Representable only after rounding
        None if Decimal::from_str(&text).is_ok() => {
            v.push(scale_violation());
            return None;
        }
        None => {
            v.push(format!("allele_frequency '{text}' is not a valid decimal"));
            return None;
        }
    };

    let mut value = value.normalize();
    if value < Decimal::ZERO || value > Decimal::ONE {
        v.push("allele_frequency must be between 0 and 1");
        return None;
    }
    if value.scale() > ALLELE_FREQUENCY_SCALE {
        v.push(scale_violation());
        return None;
    }
    value.rescale(ALLELE_FREQUENCY_SCALE);
    Some(value)
}

/// Parses plain or scientific notation, refusing anything `Decimal` would
/// have to round to hold.
fn parse_exact_decimal(text: &str) -> Option<Decimal> {
    match text.split_once(|c| c == 'e' || c == 'E') {
        None => Decimal::from_str_exact(text).ok(),
        Some((mantissa, _)) => {
            Decimal::from_str_exact(mantissa).ok()?;
            Decimal::from_scientific(text).ok()
        }
    }
}

fn scale_violation() -> String {
    format!("allele_frequency must have at most {ALLELE_FREQUENCY_SCALE} decimal places")
}

/// Full report representation with variant context and clinical data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDto {
    pub id: ReportId,
    pub patient_id: PatientId,
    pub variant_id: VariantId,
    pub gene_symbol: String,
    pub gene_full_name: String,
    pub chromosome: String,
    pub position: i64,
    pub reference_base: String,
    pub alternate_base: String,
    pub impact: ImpactType,
    pub detection_date: NaiveDate,
    pub allele_frequency: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub clinical_data: ClinicalData,
}

/// Report row in list results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportListItem {
    pub id: ReportId,
    pub patient_id: PatientId,
    pub gene_symbol: String,
    pub chromosome: String,
    pub impact: ImpactType,
    pub detection_date: NaiveDate,
    pub allele_frequency: Decimal,
}

/// Body of `GET /patient-reports/patient/{patient_id}`
#[derive(Debug, Clone, Serialize)]
pub struct PatientReportsSummary {
    pub patient_id: PatientId,
    pub total_variants: usize,
    pub clinical_summary: ClinicalData,
    pub reports: Vec<ReportListItem>,
}
