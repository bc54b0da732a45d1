//! Genetic variant mappers

use crate::domain::{GeneticVariant, VariantDetail, VariantId};
use crate::dto::{VariantCreate, VariantDto, VariantListItem, VariantUpdate};
use chrono::{DateTime, Utc};

pub fn to_dto(detail: &VariantDetail) -> VariantDto {
    let v = &detail.variant;
    VariantDto {
        id: v.id,
        gene_id: v.gene_id,
        gene_symbol: detail.gene_symbol.clone(),
        gene_full_name: detail.gene_full_name.clone(),
        chromosome: v.chromosome.clone(),
        position: v.position,
        reference_base: v.reference_base.clone(),
        alternate_base: v.alternate_base.clone(),
        impact: v.impact,
        created_at: v.created_at,
        updated_at: v.updated_at,
    }
}

pub fn to_list_item(detail: &VariantDetail) -> VariantListItem {
    let v = &detail.variant;
    VariantListItem {
        id: v.id,
        gene_symbol: detail.gene_symbol.clone(),
        chromosome: v.chromosome.clone(),
        position: v.position,
        mutation: v.mutation(),
        impact: v.impact,
    }
}

pub fn to_new_record(dto: &VariantCreate, now: DateTime<Utc>) -> GeneticVariant {
    GeneticVariant {
        id: VariantId::generate(),
        gene_id: dto.gene_id(),
        chromosome: dto.chromosome().to_string(),
        position: dto.position(),
        reference_base: dto.reference_base().to_string(),
        alternate_base: dto.alternate_base().to_string(),
        impact: dto.impact(),
        created_at: now,
        updated_at: now,
    }
}

/// Applies impact and base changes; gene, chromosome and position stay fixed
pub fn apply_update(variant: &mut GeneticVariant, update: &VariantUpdate, now: DateTime<Utc>) {
    if let Some(impact) = update.impact() {
        variant.impact = impact;
    }
    if let Some(bases) = update.reference_base() {
        variant.reference_base = bases.to_string();
    }
    if let Some(bases) = update.alternate_base() {
        variant.alternate_base = bases.to_string();
    }
    variant.updated_at = now;
}
