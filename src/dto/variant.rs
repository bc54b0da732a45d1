//! Genetic variant transfer objects

use super::{non_blank, Violations};
use crate::domain::variant::{BASES_MAX_LEN, CHROMOSOME_MAX_LEN};
use crate::domain::{
    GeneId, GenoSentinelError, ImpactType, Result, VariantFilter, VariantId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw body of `POST /variants/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantPayload {
    pub gene_id: Option<String>,
    pub chromosome: Option<String>,
    pub position: Option<i64>,
    pub reference_base: Option<String>,
    pub alternate_base: Option<String>,
    pub impact: Option<String>,
}

/// Raw body of `PUT`/`PATCH /variants/{id}`
///
/// Gene, chromosome and position are fixed once a variant exists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantUpdatePayload {
    pub impact: Option<String>,
    pub reference_base: Option<String>,
    pub alternate_base: Option<String>,
}

/// Validated variant creation request
///
/// Bases are normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCreate {
    gene_id: GeneId,
    chromosome: String,
    position: i64,
    reference_base: String,
    alternate_base: String,
    impact: ImpactType,
}

impl VariantCreate {
    /// Validates a creation payload
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error listing every violated rule.
    pub fn new(payload: VariantPayload) -> Result<Self> {
        let mut v = Violations::new();

        let gene_id = v
            .require(non_blank(payload.gene_id), "gene_id")
            .and_then(|raw| GeneId::parse(&raw).map_err(|e| v.push(e)).ok());

        let chromosome = v.require(non_blank(payload.chromosome), "chromosome");
        if let Some(ref chr) = chromosome {
            check_chromosome(chr, &mut v);
        }

        let position = v.require(payload.position, "position");
        if let Some(pos) = position {
            v.check(pos > 0, "position must be a positive integer");
        }

        let reference_base = v
            .require(non_blank(payload.reference_base), "reference_base")
            .and_then(|b| normalize_bases(&b, "reference_base", &mut v));
        let alternate_base = v
            .require(non_blank(payload.alternate_base), "alternate_base")
            .and_then(|b| normalize_bases(&b, "alternate_base", &mut v));

        let impact = v
            .require(non_blank(payload.impact), "impact")
            .and_then(|raw| raw.parse::<ImpactType>().map_err(|e| v.push(e)).ok());

        v.into_result()?;

        let (
            Some(gene_id),
            Some(chromosome),
            Some(position),
            Some(reference_base),
            Some(alternate_base),
            Some(impact),
        ) = (
            gene_id,
            chromosome,
            position,
            reference_base,
            alternate_base,
            impact,
        )
        else {
            return Err(GenoSentinelError::Validation(
                "variant payload is incomplete".to_string(),
            ));
        };

        Ok(Self {
            gene_id,
            chromosome,
            position,
            reference_base,
            alternate_base,
            impact,
        })
    }

    pub fn gene_id(&self) -> GeneId {
        self.gene_id
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn reference_base(&self) -> &str {
        &self.reference_base
    }

    pub fn alternate_base(&self) -> &str {
        &self.alternate_base
    }

    pub fn impact(&self) -> ImpactType {
        self.impact
    }
}

/// Validated partial variant update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantUpdate {
    impact: Option<ImpactType>,
    reference_base: Option<String>,
    alternate_base: Option<String>,
}

impl VariantUpdate {
    /// Validates the fields present in an update payload
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if a provided field breaks a creation rule.
    pub fn new(payload: VariantUpdatePayload) -> Result<Self> {
        let mut v = Violations::new();

        let impact = payload
            .impact
            .and_then(|raw| raw.parse::<ImpactType>().map_err(|e| v.push(e)).ok());
        let reference_base = payload
            .reference_base
            .and_then(|b| normalize_bases(b.trim(), "reference_base", &mut v));
        let alternate_base = payload
            .alternate_base
            .and_then(|b| normalize_bases(b.trim(), "alternate_base", &mut v));

        v.into_result()?;
        Ok(Self {
            impact,
            reference_base,
            alternate_base,
        })
    }

    pub fn impact(&self) -> Option<ImpactType> {
        self.impact
    }

    pub fn reference_base(&self) -> Option<&str> {
        self.reference_base.as_deref()
    }

    pub fn alternate_base(&self) -> Option<&str> {
        self.alternate_base.as_deref()
    }
}

/// Query string of `GET /variants/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantQuery {
    pub gene_id: Option<String>,
    pub chromosome: Option<String>,
    pub impact: Option<String>,
}

impl VariantQuery {
    /// Converts the raw query into a typed filter
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for a malformed `gene_id` or an unknown `impact`.
    pub fn into_filter(self) -> Result<VariantFilter> {
        let mut v = Violations::new();
        let gene_id = non_blank(self.gene_id)
            .and_then(|raw| GeneId::parse(&raw).map_err(|e| v.push(e)).ok());
        let impact = non_blank(self.impact)
            .and_then(|raw| raw.parse::<ImpactType>().map_err(|e| v.push(e)).ok());
        v.into_result()?;

        Ok(VariantFilter {
            gene_id,
            chromosome: non_blank(self.chromosome),
            impact,
        })
    }
}

fn check_chromosome(chr: &str, v: &mut Violations) {
    v.check(
        chr.starts_with("chr"),
        "chromosome must start with 'chr' (e.g. chr17)",
    );
    v.check(
        chr.chars().count() <= CHROMOSOME_MAX_LEN,
        format!("chromosome must be at most {CHROMOSOME_MAX_LEN} characters"),
    );
}

/// Uppercases a base sequence and checks it against the nucleotide alphabet
fn normalize_bases(raw: &str, field: &str, v: &mut Violations) -> Option<String> {
    let bases = raw.to_ascii_uppercase();
    let mut ok = true;
    if bases.is_empty() {
        v.push(format!("{field} cannot be empty"));
        ok = false;
    }
    if !bases.chars().all(|c| matches!(c, 'A' | 'T' | 'C' | 'G')) {
        v.push(format!("{field} must contain only A, T, C, G"));
        ok = false;
    }
    if bases.len() > BASES_MAX_LEN {
        v.push(format!("{field} must be at most {BASES_MAX_LEN} bases"));
        ok = false;
    }
    ok.then_some(bases)
}

/// Full variant representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantDto {
    pub id: VariantId,
    pub gene_id: GeneId,
    pub gene_symbol: String,
    pub gene_full_name: String,
    pub chromosome: String,
    pub position: i64,
    pub reference_base: String,
    pub alternate_base: String,
    pub impact: ImpactType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Variant row in list results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantListItem {
    pub id: VariantId,
    pub gene_symbol: String,
    pub chromosome: String,
    pub position: i64,
    pub mutation: String,
    pub impact: ImpactType,
}

/// Body of `GET /variants/by_gene`
#[derive(Debug, Clone, Serialize)]
pub struct VariantsByGene {
    pub gene_symbol: String,
    pub gene_name: String,
    pub total_variants: usize,
    pub variants: Vec<VariantListItem>,
}

/// Body of `GET /variants/by_chromosome`
#[derive(Debug, Clone, Serialize)]
pub struct VariantsByChromosome {
    pub chromosome: String,
    pub total_variants: usize,
    pub variants: Vec<VariantListItem>,
}
