//! `/patient-reports` endpoints

use super::{body, params};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::{GeneralStatistics, GenoSentinelError, PatientId, PatientStatistics, ReportId};
use crate::dto::{
    ListResponse, PatientReportsSummary, ReportDto, ReportListItem, ReportPayload, ReportQuery,
    ReportUpdatePayload,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PatientStatisticsParams {
    pub patient_id: Option<String>,
}

fn report_id(raw: &str) -> Result<ReportId, ApiError> {
    Ok(ReportId::parse(raw).map_err(GenoSentinelError::Validation)?)
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<ListResponse<ReportListItem>>, ApiError> {
    Ok(Json(state.reports.list(params(query)?).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ReportDto>), ApiError> {
    let report = state.reports.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportDto>, ApiError> {
    Ok(Json(state.reports.retrieve(report_id(&id)?).await?))
}

/// Serves both PUT and PATCH
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReportUpdatePayload>, JsonRejection>,
) -> Result<Json<ReportDto>, ApiError> {
    let id = report_id(&id)?;
    Ok(Json(state.reports.update(id, body(payload)?).await?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.reports.delete(report_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientReportsSummary>, ApiError> {
    let patient_id = PatientId::parse(&patient_id).map_err(GenoSentinelError::Validation)?;
    Ok(Json(state.reports.by_patient(patient_id).await?))
}

pub async fn patient_statistics(
    State(state): State<AppState>,
    query: Result<Query<PatientStatisticsParams>, QueryRejection>,
) -> Result<Json<PatientStatistics>, ApiError> {
    let query = params(query)?;
    Ok(Json(state.reports.patient_statistics(query.patient_id).await?))
}

pub async fn general_statistics(
    State(state): State<AppState>,
) -> Result<Json<GeneralStatistics>, ApiError> {
    Ok(Json(state.reports.general_statistics().await?))
}
