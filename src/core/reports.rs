//! Patient variant report ledger
//!
//! Every full report representation embeds the patient's clinical record,
//! looked up through the [`ClinicalDataAdapter`] at read time. The lookup
//! degrades instead of failing, so it never affects the status code.

use crate::adapters::clinical::ClinicalDataAdapter;
use crate::adapters::database::conflicts;
use crate::adapters::database::CatalogStore;
use crate::domain::report::ALLELE_FREQUENCY_SCALE;
use crate::domain::statistics::{rank_counts, GeneCount, ImpactCount, TOP_N};
use crate::domain::{
    GeneralStatistics, GenoSentinelError, ImpactType, PatientId, PatientStatistics, ReportDetail,
    ReportFilter, ReportId, Result,
};
use crate::dto::{
    non_blank, ListResponse, PatientReportsSummary, ReportCreate, ReportDto, ReportListItem,
    ReportPayload, ReportQuery, ReportUpdate, ReportUpdatePayload,
};
use crate::log_record_change;
use crate::mappers::report as mapper;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

fn no_reports_for(patient_id: PatientId) -> GenoSentinelError {
    GenoSentinelError::NotFound(format!("No reports found for patient {patient_id}"))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Operations on patient variant reports
#[derive(Clone)]
pub struct ReportLedger {
    store: Arc<dyn CatalogStore + Send + Sync>,
    clinical: ClinicalDataAdapter,
}

impl ReportLedger {
    pub fn new(store: Arc<dyn CatalogStore + Send + Sync>, clinical: ClinicalDataAdapter) -> Self {
        Self { store, clinical }
    }

    async fn compose(&self, detail: &ReportDetail) -> ReportDto {
        let clinical_data = self
            .clinical
            .clinical_data_for(detail.report.patient_id)
            .await;
        mapper::to_dto(detail, clinical_data)
    }

    /// Reports, newest detection first
    pub async fn list(&self, query: ReportQuery) -> Result<ListResponse<ReportListItem>> {
        let filter = query.into_filter()?;
        let rows = self.store.list_reports(&filter).await?;
        Ok(rows.iter().map(mapper::to_list_item).collect::<Vec<_>>().into())
    }

    /// Validates and records a detection
    ///
    /// # Errors
    ///
    /// `Validation` for bad input, `NotFound` for an unknown variant and
    /// `Conflict` for a repeated (patient, variant, date) detection.
    pub async fn create(&self, payload: ReportPayload) -> Result<ReportDto> {
        let dto = ReportCreate::new(payload, today())?;
        let variant = self
            .store
            .get_variant(dto.variant_id())
            .await?
            .ok_or_else(|| conflicts::variant_not_found(dto.variant_id()))?;

        let report = mapper::to_new_record(&dto, Utc::now());
        self.store.insert_report(&report).await?;
        log_record_change!("report", report.id, "created");

        let detail = ReportDetail {
            report,
            variant: variant.variant,
            gene_symbol: variant.gene_symbol,
            gene_full_name: variant.gene_full_name,
        };
        Ok(self.compose(&detail).await)
    }

    pub async fn retrieve(&self, id: ReportId) -> Result<ReportDto> {
        let detail = self
            .store
            .get_report(id)
            .await?
            .ok_or_else(|| conflicts::report_not_found(id))?;
        Ok(self.compose(&detail).await)
    }

    /// Partial update of detection date and allele frequency
    pub async fn update(&self, id: ReportId, payload: ReportUpdatePayload) -> Result<ReportDto> {
        let update = ReportUpdate::new(payload, today())?;
        let mut detail = self
            .store
            .get_report(id)
            .await?
            .ok_or_else(|| conflicts::report_not_found(id))?;

        mapper::apply_update(&mut detail.report, &update, Utc::now());
        self.store.update_report(&detail.report).await?;
        log_record_change!("report", id, "updated");
        Ok(self.compose(&detail).await)
    }

    pub async fn delete(&self, id: ReportId) -> Result<()> {
        if !self.store.delete_report(id).await? {
            return Err(conflicts::report_not_found(id));
        }
        log_record_change!("report", id, "deleted");
        Ok(())
    }

    /// All reports of one patient with a single clinical lookup
    pub async fn by_patient(&self, patient_id: PatientId) -> Result<PatientReportsSummary> {
        let rows = self
            .store
            .list_reports(&ReportFilter::for_patient(patient_id))
            .await?;
        if rows.is_empty() {
            return Err(no_reports_for(patient_id));
        }

        let reports: Vec<ReportListItem> = rows.iter().map(mapper::to_list_item).collect();
        Ok(PatientReportsSummary {
            patient_id,
            total_variants: reports.len(),
            clinical_summary: self.clinical.clinical_data_for(patient_id).await,
            reports,
        })
    }

    /// Per-patient aggregates; `patient_id` is required
    pub async fn patient_statistics(&self, patient_id: Option<String>) -> Result<PatientStatistics> {
        let raw = non_blank(patient_id).ok_or_else(|| {
            GenoSentinelError::Validation("Parameter \"patient_id\" is required".to_string())
        })?;
        let patient_id = PatientId::parse(&raw).map_err(GenoSentinelError::Validation)?;

        let rows = self
            .store
            .list_reports(&ReportFilter::for_patient(patient_id))
            .await?;
        if rows.is_empty() {
            return Err(no_reports_for(patient_id));
        }

        Ok(summarize_patient(patient_id, &rows))
    }

    /// Ledger-wide totals
    pub async fn general_statistics(&self) -> Result<GeneralStatistics> {
        let totals = self.store.report_totals().await?;
        let average = if totals.distinct_patients == 0 {
            0.0
        } else {
            let raw = totals.total_reports as f64 / totals.distinct_patients as f64;
            (raw * 100.0).round() / 100.0
        };

        Ok(GeneralStatistics {
            total_reports: totals.total_reports,
            total_patients_with_reports: totals.distinct_patients,
            average_variants_per_patient: average,
        })
    }
}

fn summarize_patient(patient_id: PatientId, rows: &[ReportDetail]) -> PatientStatistics {
    let average_allele_frequency = if rows.is_empty() {
        None
    } else {
        let sum: Decimal = rows.iter().map(|d| d.report.allele_frequency).sum();
        let mut average = (sum / Decimal::from(rows.len() as i64)).round_dp(ALLELE_FREQUENCY_SCALE);
        average.rescale(ALLELE_FREQUENCY_SCALE);
        Some(average)
    };

    let mut by_impact: BTreeMap<ImpactType, i64> = BTreeMap::new();
    let mut by_gene: HashMap<String, i64> = HashMap::new();
    for d in rows {
        *by_impact.entry(d.variant.impact).or_default() += 1;
        *by_gene.entry(d.gene_symbol.clone()).or_default() += 1;
    }

    PatientStatistics {
        patient_id,
        total_variants: rows.len() as i64,
        average_allele_frequency,
        variants_by_impact: by_impact
            .into_iter()
            .map(|(impact, count)| ImpactCount { impact, count })
            .collect(),
        top_affected_genes: rank_counts(by_gene.into_iter().collect(), TOP_N)
            .into_iter()
            .map(|(gene_symbol, count)| GeneCount { gene_symbol, count })
            .collect(),
    }
}
