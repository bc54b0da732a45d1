//! Gene mappers

use crate::domain::{Gene, GeneId, GeneWithCount};
use crate::dto::{GeneCreate, GeneDto, GeneListItem, GeneUpdate};
use chrono::{DateTime, Utc};

pub fn to_dto(gene: &Gene) -> GeneDto {
    GeneDto {
        id: gene.id,
        symbol: gene.symbol.clone(),
        full_name: gene.full_name.clone(),
        function_summary: gene.function_summary.clone(),
        created_at: gene.created_at,
        updated_at: gene.updated_at,
    }
}

pub fn to_list_item(row: &GeneWithCount) -> GeneListItem {
    GeneListItem {
        id: row.gene.id,
        symbol: row.gene.symbol.clone(),
        full_name: row.gene.full_name.clone(),
        variants_count: row.variants_count,
    }
}

/// Builds a new gene record with a fresh identifier
pub fn to_new_record(dto: &GeneCreate, now: DateTime<Utc>) -> Gene {
    Gene {
        id: GeneId::generate(),
        symbol: dto.symbol().to_string(),
        full_name: dto.full_name().to_string(),
        function_summary: dto.function_summary().to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Applies the provided fields of an update; the symbol is left untouched
pub fn apply_update(gene: &mut Gene, update: &GeneUpdate, now: DateTime<Utc>) {
    if let Some(full_name) = update.full_name() {
        gene.full_name = full_name.to_string();
    }
    if let Some(summary) = update.function_summary() {
        gene.function_summary = summary.to_string();
    }
    gene.updated_at = now;
}
