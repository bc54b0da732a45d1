//! Patient variant report mappers

use crate::domain::{ClinicalData, PatientVariantReport, ReportDetail, ReportId};
use crate::dto::{ReportCreate, ReportDto, ReportListItem, ReportUpdate};
use chrono::{DateTime, Utc};

/// Full representation, with the clinical record looked up for this response
pub fn to_dto(detail: &ReportDetail, clinical_data: ClinicalData) -> ReportDto {
    let r = &detail.report;
    let v = &detail.variant;
    ReportDto {
        id: r.id,
        patient_id: r.patient_id,
        variant_id: r.variant_id,
        gene_symbol: detail.gene_symbol.clone(),
        gene_full_name: detail.gene_full_name.clone(),
        chromosome: v.chromosome.clone(),
        position: v.position,
        reference_base: v.reference_base.clone(),
        alternate_base: v.alternate_base.clone(),
        impact: v.impact,
        detection_date: r.detection_date,
        allele_frequency: r.allele_frequency,
        created_at: r.created_at,
        updated_at: r.updated_at,
        clinical_data,
    }
}

pub fn to_list_item(detail: &ReportDetail) -> ReportListItem {
    let r = &detail.report;
    ReportListItem {
        id: r.id,
        patient_id: r.patient_id,
        gene_symbol: detail.gene_symbol.clone(),
        chromosome: detail.variant.chromosome.clone(),
        impact: detail.variant.impact,
        detection_date: r.detection_date,
        allele_frequency: r.allele_frequency,
    }
}

pub fn to_new_record(dto: &ReportCreate, now: DateTime<Utc>) -> PatientVariantReport {
    PatientVariantReport {
        id: ReportId::generate(),
        patient_id: dto.patient_id(),
        variant_id: dto.variant_id(),
        detection_date: dto.detection_date(),
        allele_frequency: dto.allele_frequency(),
        created_at: now,
        updated_at: now,
    }
}

pub fn apply_update(report: &mut PatientVariantReport, update: &ReportUpdate, now: DateTime<Utc>) {
    if let Some(date) = update.detection_date() {
        report.detection_date = date;
    }
    if let Some(frequency) = update.allele_frequency() {
        report.allele_frequency = frequency;
    }
    report.updated_at = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeneId, GeneticVariant, ImpactType, VariantId};
    use crate::dto::report::ReportPayload;
    use chrono::NaiveDate;
    use serde_json::json;

    fn detail() -> ReportDetail {
        let now = Utc::now();
        let variant = GeneticVariant {
            id: VariantId::generate(),
            gene_id: GeneId::generate(),
            chromosome: "chr7".to_string(),
            position: 55249071,
            reference_base: "C".to_string(),
            alternate_base: "T".to_string(),
            impact: ImpactType::Missense,
            created_at: now,
            updated_at: now,
        };
        let dto = ReportCreate::new(
            ReportPayload {
                patient_id: Some("0b0a6b57-7a36-4b2c-9d4f-2a8a3c1e9f10".to_string()),
                variant_id: Some(variant.id.to_string()),
                detection_date: Some("2024-03-10".to_string()),
                allele_frequency: Some(json!("0.37")),
            },
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap();
        ReportDetail {
            report: to_new_record(&dto, now),
            variant,
            gene_symbol: "EGFR".to_string(),
            gene_full_name: "Epidermal growth factor receptor".to_string(),
        }
    }

    #[test]
    fn test_dto_embeds_variant_and_clinical_data() {
        let d = detail();
        let clinical = ClinicalData::pending(d.report.patient_id);
        let dto = to_dto(&d, clinical.clone());

        assert_eq!(dto.variant_id, d.variant.id);
        assert_eq!(dto.chromosome, "chr7");
        assert_eq!(dto.reference_base, "C");
        assert_eq!(dto.clinical_data, clinical);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["allele_frequency"], "0.3700");
        assert_eq!(json["detection_date"], "2024-03-10");
        assert_eq!(json["clinical_data"]["integration_status"], "pending");
    }

    #[test]
    fn test_list_item_fields() {
        let item = to_list_item(&detail());
        assert_eq!(item.gene_symbol, "EGFR");
        assert_eq!(item.impact, ImpactType::Missense);
    }
}
