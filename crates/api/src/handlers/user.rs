//! Handlers for users, profiles and audit history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sirn_core::types::DbId;
use sirn_db::board;
use sirn_db::models::audit::AuditEvent;
use sirn_db::models::profile::{
    CreateResearcherProfile, CreateStudentProfile, ResearcherProfile, StudentProfile,
};
use sirn_db::models::user::{CreateUser, User};

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let user = board::create_user(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// POST /api/v1/users/{id}/student-profile
pub async fn create_student_profile(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<CreateStudentProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<StudentProfile>>)> {
    let profile = board::create_student_profile(&state.pool, user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// POST /api/v1/users/{id}/researcher-profile
pub async fn create_researcher_profile(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<CreateResearcherProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<ResearcherProfile>>)> {
    let profile = board::create_researcher_profile(&state.pool, user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// GET /api/v1/users/{id}/audit-events?limit=
///
/// Newest first. The page size is clamped to 1..=500 (default 50).
pub async fn list_audit_events(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<AuditEvent>>>> {
    let events = board::list_audit_events(&state.pool, user_id, params.limit).await?;
    Ok(Json(DataResponse { data: events }))
}
