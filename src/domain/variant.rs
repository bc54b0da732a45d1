//! Genetic variant domain model

use super::ids::{GeneId, VariantId};
use super::impact::ImpactType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum stored length of a chromosome label
pub const CHROMOSOME_MAX_LEN: usize = 10;

/// Maximum stored length of a reference or alternate base sequence
pub const BASES_MAX_LEN: usize = 100;

/// Persisted genetic variant
///
/// Unique on (gene, chromosome, position, reference_base, alternate_base).
/// Bases are stored uppercase and contain only A, T, C and G.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneticVariant {
    pub id: VariantId,
    pub gene_id: GeneId,
    pub chromosome: String,
    pub position: i64,
    pub reference_base: String,
    pub alternate_base: String,
    pub impact: ImpactType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GeneticVariant {
    /// Compact `REF>ALT` notation
    pub fn mutation(&self) -> String {
        format!("{}>{}", self.reference_base, self.alternate_base)
    }

    /// True when both records describe the same genomic change on the same gene
    pub fn same_locus_and_change(&self, other: &GeneticVariant) -> bool {
        self.gene_id == other.gene_id
            && self.chromosome == other.chromosome
            && self.position == other.position
            && self.reference_base == other.reference_base
            && self.alternate_base == other.alternate_base
    }
}

/// Variant joined with its owning gene's descriptive fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDetail {
    pub variant: GeneticVariant,
    pub gene_symbol: String,
    pub gene_full_name: String,
}

/// Optional list filters, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFilter {
    pub gene_id: Option<GeneId>,
    pub chromosome: Option<String>,
    pub impact: Option<ImpactType>,
}

impl VariantFilter {
    /// Returns true if the detail passes every set filter
    pub fn matches(&self, detail: &VariantDetail) -> bool {
        let v = &detail.variant;
        self.gene_id.map_or(true, |id| v.gene_id == id)
            && self
                .chromosome
                .as_deref()
                .map_or(true, |chr| v.chromosome == chr)
            && self.impact.map_or(true, |impact| v.impact == impact)
    }
}
