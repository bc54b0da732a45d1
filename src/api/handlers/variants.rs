//! `/variants` endpoints

use super::{body, params};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::{GenoSentinelError, VariantId, VariantStatistics};
use crate::dto::{
    ListResponse, VariantDto, VariantListItem, VariantPayload, VariantQuery, VariantUpdatePayload,
    VariantsByChromosome, VariantsByGene,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ByGeneParams {
    pub gene_symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ByChromosomeParams {
    pub chr: Option<String>,
}

fn variant_id(raw: &str) -> Result<VariantId, ApiError> {
    Ok(VariantId::parse(raw).map_err(GenoSentinelError::Validation)?)
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<VariantQuery>, QueryRejection>,
) -> Result<Json<ListResponse<VariantListItem>>, ApiError> {
    Ok(Json(state.variants.list(params(query)?).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<VariantPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<VariantDto>), ApiError> {
    let variant = state.variants.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(variant)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VariantDto>, ApiError> {
    Ok(Json(state.variants.retrieve(variant_id(&id)?).await?))
}

/// Serves both PUT and PATCH
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VariantUpdatePayload>, JsonRejection>,
) -> Result<Json<VariantDto>, ApiError> {
    let id = variant_id(&id)?;
    Ok(Json(state.variants.update(id, body(payload)?).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.variants.delete(variant_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_gene(
    State(state): State<AppState>,
    query: Result<Query<ByGeneParams>, QueryRejection>,
) -> Result<Json<VariantsByGene>, ApiError> {
    let query = params(query)?;
    Ok(Json(state.variants.by_gene(query.gene_symbol).await?))
}

pub async fn by_chromosome(
    State(state): State<AppState>,
    query: Result<Query<ByChromosomeParams>, QueryRejection>,
) -> Result<Json<VariantsByChromosome>, ApiError> {
    let query = params(query)?;
    Ok(Json(state.variants.by_chromosome(query.chr).await?))
}

pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<VariantStatistics>, ApiError> {
    Ok(Json(state.variants.statistics().await?))
}
