//! Aggregate views over the catalog

use super::ids::PatientId;
use super::impact::ImpactType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum entries in "top N" rankings
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneStatistics {
    pub total_genes: i64,
    pub genes_with_variants: i64,
    pub genes_without_variants: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactCount {
    pub impact: ImpactType,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromosomeCount {
    pub chromosome: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneCount {
    pub gene_symbol: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantStatistics {
    pub total_variants: i64,
    pub by_impact: Vec<ImpactCount>,
    pub top_chromosomes: Vec<ChromosomeCount>,
}

/// Per-patient summary of detected variants
///
/// `average_allele_frequency` is rendered as a decimal string with four
/// fractional digits, or null when the patient has no reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientStatistics {
    pub patient_id: PatientId,
    pub total_variants: i64,
    pub average_allele_frequency: Option<Decimal>,
    pub variants_by_impact: Vec<ImpactCount>,
    pub top_affected_genes: Vec<GeneCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneralStatistics {
    pub total_reports: i64,
    pub total_patients_with_reports: i64,
    pub average_variants_per_patient: f64,
}

/// Sorts counts descending, ties broken by key ascending, and keeps the first `limit`
pub fn rank_counts<K: Ord + Clone>(mut counts: Vec<(K, i64)>, limit: usize) -> Vec<(K, i64)> {
    counts.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_counts_orders_and_truncates() {
        let ranked = rank_counts(
            vec![
                ("chr2".to_string(), 1),
                ("chr17".to_string(), 4),
                ("chr1".to_string(), 4),
                ("chr3".to_string(), 2),
            ],
            3,
        );
        let keys: Vec<_> = ranked.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["chr1", "chr17", "chr3"]);
    }

    #[test]
    fn test_average_serializes_as_string() {
        let stats = PatientStatistics {
            patient_id: PatientId::generate(),
            total_variants: 2,
            average_allele_frequency: Some(Decimal::new(4250, 4)),
            variants_by_impact: vec![],
            top_affected_genes: vec![],
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["average_allele_frequency"], "0.4250");
    }
}
