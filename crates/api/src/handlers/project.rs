//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sirn_core::types::DbId;
use sirn_db::board;
use sirn_db::models::project::{
    CreateProjectOwner, Project, ProjectDetailView, ProjectOwner, UpdateProject,
};
use sirn_db::models::resource::{CreateResource, ProjectResource};

use crate::error::AppResult;
use crate::middleware::caller::OptionalCaller;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /projects/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// Request body for `PUT /projects/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct SetProgressRequest {
    pub progress_pct: i32,
}

/// GET /api/v1/projects/{id}
///
/// Assignee identities are included only for admins and project owners.
pub async fn get_detail(
    State(state): State<AppState>,
    OptionalCaller(caller): OptionalCaller,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetailView>>> {
    let detail = board::get_project_detail(&state.pool, id).await?;
    let reveal = board::can_view_assignees(&state.pool, caller.as_ref(), id).await?;
    Ok(Json(DataResponse {
        data: detail.into_view(reveal),
    }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = board::update_project(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    board::delete_project(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/projects/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = board::set_project_status(&state.pool, id, &input.status).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}/progress
pub async fn set_progress(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetProgressRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = board::set_project_progress(&state.pool, id, input.progress_pct).await?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/projects/{id}/owners
pub async fn list_owners(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectOwner>>>> {
    let owners = board::list_project_owners(&state.pool, id).await?;
    Ok(Json(DataResponse { data: owners }))
}

/// POST /api/v1/projects/{id}/owners
pub async fn add_owner(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProjectOwner>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectOwner>>)> {
    let owner = board::add_project_owner(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: owner })))
}

/// POST /api/v1/projects/{id}/resources
pub async fn add_resource(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateResource>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectResource>>)> {
    let resource = board::add_resource(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: resource })))
}
