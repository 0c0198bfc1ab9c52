//! Handlers for slots, applications and assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sirn_core::types::DbId;
use sirn_db::board;
use sirn_db::models::slot::{
    AcceptApplication, AcceptedApplication, CreateApplication, CreateSlot, ProjectSlot,
    SlotApplication,
};

use crate::error::AppResult;
use crate::middleware::caller::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/slots
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateSlot>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectSlot>>)> {
    let slot = board::create_slot(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: slot })))
}

/// POST /api/v1/slots/{id}/close
pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectSlot>>> {
    let slot = board::close_slot(&state.pool, id).await?;
    Ok(Json(DataResponse { data: slot }))
}

/// GET /api/v1/slots/{id}/applications
pub async fn list_applications(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<SlotApplication>>>> {
    let applications = board::list_applications(&state.pool, id).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// POST /api/v1/slots/{id}/applications
pub async fn apply(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(id): Path<DbId>,
    Json(input): Json<CreateApplication>,
) -> AppResult<(StatusCode, Json<DataResponse<SlotApplication>>)> {
    let application = board::apply_to_slot(&state.pool, &caller, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

/// POST /api/v1/applications/{id}/accept
///
/// Assigns the applicant and rejects the slot's other pending applications.
/// The body is optional; a bare POST accepts without a note.
pub async fn accept(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(id): Path<DbId>,
    input: Option<Json<AcceptApplication>>,
) -> AppResult<Json<DataResponse<AcceptedApplication>>> {
    let input = input.map(|Json(body)| body).unwrap_or_default();
    let accepted = board::accept_application(&state.pool, &caller, id, &input).await?;
    Ok(Json(DataResponse { data: accepted }))
}

/// POST /api/v1/applications/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SlotApplication>>> {
    let application = board::reject_application(&state.pool, &caller, id).await?;
    Ok(Json(DataResponse { data: application }))
}

/// POST /api/v1/applications/{id}/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SlotApplication>>> {
    let application = board::withdraw_application(&state.pool, id).await?;
    Ok(Json(DataResponse { data: application }))
}
