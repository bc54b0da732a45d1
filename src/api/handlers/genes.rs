//! `/genes` endpoints

use super::{body, params};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::{GeneId, GeneStatistics, GenoSentinelError};
use crate::dto::{GeneDto, GeneListItem, GenePayload, GeneSearchResult, GeneUpdatePayload, ListResponse};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

fn gene_id(raw: &str) -> Result<GeneId, ApiError> {
    Ok(GeneId::parse(raw).map_err(GenoSentinelError::Validation)?)
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse<GeneListItem>>, ApiError> {
    let query = params(query)?;
    Ok(Json(state.genes.list(query.symbol).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<GenePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<GeneDto>), ApiError> {
    let gene = state.genes.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(gene)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GeneDto>, ApiError> {
    Ok(Json(state.genes.retrieve(gene_id(&id)?).await?))
}

/// Serves both PUT and PATCH
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<GeneUpdatePayload>, JsonRejection>,
) -> Result<Json<GeneDto>, ApiError> {
    let id = gene_id(&id)?;
    Ok(Json(state.genes.update(id, body(payload)?).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.genes.delete(gene_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<GeneSearchResult>, ApiError> {
    let query = params(query)?;
    Ok(Json(state.genes.search(query.q).await?))
}

pub async fn statistics(State(state): State<AppState>) -> Result<Json<GeneStatistics>, ApiError> {
    Ok(Json(state.genes.statistics().await?))
}
