//! Handlers for the `/specialties` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sirn_db::board;
use sirn_db::models::project::{CreateProject, Project, ProjectWithSlotStats};
use sirn_db::models::specialty::{CreateSpecialty, Specialty, SpecialtyWithCounts};

use crate::error::AppResult;
use crate::middleware::caller::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// A specialty together with its active projects.
#[derive(Debug, Serialize)]
pub struct SpecialtyProjects {
    pub specialty: Specialty,
    pub projects: Vec<ProjectWithSlotStats>,
}

/// GET /api/v1/specialties
///
/// Active specialties in display order with project and open-slot counts.
/// An unreachable store yields an empty list.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SpecialtyWithCounts>>>> {
    let specialties = board::list_active_specialties_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: specialties }))
}

/// POST /api/v1/specialties
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSpecialty>,
) -> AppResult<(StatusCode, Json<DataResponse<Specialty>>)> {
    let specialty = board::create_specialty(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: specialty })))
}

/// GET /api/v1/specialties/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Specialty>>> {
    let specialty = board::get_specialty_by_slug(&state.pool, &slug).await?;
    Ok(Json(DataResponse { data: specialty }))
}

/// GET /api/v1/specialties/{slug}/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<SpecialtyProjects>>> {
    let (specialty, projects) = board::list_active_projects_by_slug(&state.pool, &slug).await?;
    Ok(Json(DataResponse {
        data: SpecialtyProjects {
            specialty,
            projects,
        },
    }))
}

/// POST /api/v1/specialties/{slug}/projects
pub async fn create_project(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(slug): Path<String>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let specialty = board::get_specialty_by_slug(&state.pool, &slug).await?;
    let project = board::create_project(&state.pool, &caller, specialty.id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}
