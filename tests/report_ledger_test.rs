//! Report ledger tests with a scripted clinical provider

use async_trait::async_trait;
use genosentinel::adapters::clinical::{
    ClinicalDataAdapter, ClinicalDataProvider, ClinicalPatient,
};
use genosentinel::adapters::database::CatalogStore;
use genosentinel::adapters::memory::MemoryStore;
use genosentinel::core::{GeneCatalog, ReportLedger, VariantCatalog};
use genosentinel::domain::{
    ClinicalServiceError, GenoSentinelError, IntegrationStatus, PatientId,
};
use genosentinel::dto::{GenePayload, ReportPayload, ReportQuery, ReportUpdatePayload, VariantPayload};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Answers every lookup with the same patient and counts calls
#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl ClinicalDataProvider for CountingProvider {
    async fn fetch_patient(
        &self,
        _patient_id: PatientId,
    ) -> Result<ClinicalPatient, ClinicalServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ClinicalPatient {
            first_name: Some("Luis".to_string()),
            last_name: Some("Pérez".to_string()),
            ..ClinicalPatient::default()
        })
    }
}

struct TimeoutProvider;

#[async_trait]
impl ClinicalDataProvider for TimeoutProvider {
    async fn fetch_patient(
        &self,
        _patient_id: PatientId,
    ) -> Result<ClinicalPatient, ClinicalServiceError> {
        Err(ClinicalServiceError::Timeout("deadline elapsed".to_string()))
    }
}

struct Fixture {
    ledger: ReportLedger,
    variant_ids: Vec<String>,
}

async fn fixture(clinical: ClinicalDataAdapter) -> Fixture {
    let store: Arc<dyn CatalogStore + Send + Sync> = Arc::new(MemoryStore::new());
    let genes = GeneCatalog::new(store.clone());
    let variants = VariantCatalog::new(store.clone());

    let mut variant_ids = Vec::new();
    for (symbol, chromosome) in [("TP53", "chr17"), ("BRCA2", "chr13")] {
        let gene = genes
            .create(GenePayload {
                symbol: Some(symbol.to_string()),
                full_name: Some(format!("{symbol} gene")),
                function_summary: Some("Tumor suppressor".to_string()),
            })
            .await
            .unwrap();
        let variant = variants
            .create(VariantPayload {
                gene_id: Some(gene.id.to_string()),
                chromosome: Some(chromosome.to_string()),
                position: Some(1_000),
                reference_base: Some("C".to_string()),
                alternate_base: Some("T".to_string()),
                impact: Some("NONSENSE".to_string()),
            })
            .await
            .unwrap();
        variant_ids.push(variant.id.to_string());
    }

    Fixture {
        ledger: ReportLedger::new(store, clinical),
        variant_ids,
    }
}

fn report(patient: PatientId, variant_id: &str, date: &str, frequency: &str) -> ReportPayload {
    ReportPayload {
        patient_id: Some(patient.to_string()),
        variant_id: Some(variant_id.to_string()),
        detection_date: Some(date.to_string()),
        allele_frequency: Some(json!(frequency)),
    }
}

#[tokio::test]
async fn test_by_patient_looks_up_clinical_data_once() {
    let provider = Arc::new(CountingProvider::default());
    let f = fixture(ClinicalDataAdapter::new(provider.clone())).await;
    let patient = PatientId::generate();

    for (variant_id, date) in f.variant_ids.iter().zip(["2024-01-10", "2024-02-20"]) {
        f.ledger.create(report(patient, variant_id, date, "0.25")).await.unwrap();
    }
    let after_creates = provider.calls.load(Ordering::SeqCst);

    let summary = f.ledger.by_patient(patient).await.unwrap();
    assert_eq!(summary.total_variants, 2);
    assert_eq!(summary.clinical_summary.integration_status, IntegrationStatus::Success);
    assert_eq!(summary.clinical_summary.first_name.as_deref(), Some("Luis"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), after_creates + 1);

    // Newest detection first
    assert_eq!(summary.reports[0].gene_symbol, "BRCA2");
}

#[tokio::test]
async fn test_clinical_timeout_never_fails_request() {
    let f = fixture(ClinicalDataAdapter::new(Arc::new(TimeoutProvider))).await;
    let patient = PatientId::generate();

    let created = f
        .ledger
        .create(report(patient, &f.variant_ids[0], "2024-05-01", "0.5"))
        .await
        .unwrap();
    assert_eq!(created.clinical_data.integration_status, IntegrationStatus::Failed);
    assert!(created.clinical_data.message.unwrap().contains("deadline elapsed"));
}

#[tokio::test]
async fn test_update_and_filters() {
    let f = fixture(ClinicalDataAdapter::pending()).await;
    let patient = PatientId::generate();
    let other = PatientId::generate();

    let created = f
        .ledger
        .create(report(patient, &f.variant_ids[0], "2024-03-01", "0.1"))
        .await
        .unwrap();
    f.ledger
        .create(report(other, &f.variant_ids[1], "2024-03-02", "0.9"))
        .await
        .unwrap();

    let updated = f
        .ledger
        .update(
            created.id,
            ReportUpdatePayload {
                detection_date: None,
                allele_frequency: Some(json!(0.125)),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.allele_frequency.to_string(), "0.1250");
    assert_eq!(updated.detection_date, created.detection_date);

    let by_gene = f
        .ledger
        .list(ReportQuery {
            patient_id: None,
            gene_symbol: Some("brca2".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(by_gene.count, 1);
    assert_eq!(by_gene.results[0].patient_id, other);

    let by_patient = f
        .ledger
        .list(ReportQuery {
            patient_id: Some(patient.to_string()),
            gene_symbol: None,
        })
        .await
        .unwrap();
    assert_eq!(by_patient.count, 1);
}

#[tokio::test]
async fn test_statistics() {
    let f = fixture(ClinicalDataAdapter::pending()).await;
    let patient = PatientId::generate();
    let other = PatientId::generate();

    f.ledger.create(report(patient, &f.variant_ids[0], "2024-01-01", "0.3")).await.unwrap();
    f.ledger.create(report(patient, &f.variant_ids[1], "2024-01-02", "0.4")).await.unwrap();
    f.ledger.create(report(other, &f.variant_ids[0], "2024-01-03", "0.5")).await.unwrap();

    let stats = f
        .ledger
        .patient_statistics(Some(patient.to_string()))
        .await
        .unwrap();
    assert_eq!(stats.total_variants, 2);
    assert_eq!(stats.average_allele_frequency.unwrap().to_string(), "0.3500");

    let general = f.ledger.general_statistics().await.unwrap();
    assert_eq!(general.total_reports, 3);
    assert_eq!(general.total_patients_with_reports, 2);
    assert!((general.average_variants_per_patient - 1.5).abs() < f64::EPSILON);

    let err = f.ledger.patient_statistics(None).await.unwrap_err();
    assert!(matches!(err, GenoSentinelError::Validation(_)));

    let err = f
        .ledger
        .patient_statistics(Some("nope".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, GenoSentinelError::Validation(_)));
}

#[tokio::test]
async fn test_report_for_unknown_variant() {
    let f = fixture(ClinicalDataAdapter::pending()).await;
    let err = f
        .ledger
        .create(report(
            PatientId::generate(),
            "00000000-0000-4000-8000-000000000000",
            "2024-01-01",
            "0.3",
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, GenoSentinelError::NotFound(_)));
}
