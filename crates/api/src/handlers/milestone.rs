//! Handlers for project milestones.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sirn_core::types::DbId;
use sirn_db::board;
use sirn_db::models::milestone::{CreateMilestone, ProjectMilestone, UpdateMilestone};

use crate::error::AppResult;
use crate::middleware::caller::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/milestones
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectMilestone>>)> {
    let milestone = board::create_milestone(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: milestone })))
}

/// PUT /api/v1/milestones/{id}
pub async fn update(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Json<DataResponse<ProjectMilestone>>> {
    let milestone = board::update_milestone(&state.pool, &caller, id, &input).await?;
    Ok(Json(DataResponse { data: milestone }))
}
