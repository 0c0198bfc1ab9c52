//! Route definitions for the `/projects` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{milestone, project, slot};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /{id}                 -> get_detail
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
/// PUT    /{id}/status          -> set_status
/// PUT    /{id}/progress        -> set_progress
/// GET    /{id}/owners          -> list_owners
/// POST   /{id}/owners          -> add_owner
/// POST   /{id}/slots           -> slot::create
/// POST   /{id}/milestones      -> milestone::create
/// POST   /{id}/resources       -> add_resource
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(project::get_detail)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/status", put(project::set_status))
        .route("/{id}/progress", put(project::set_progress))
        .route(
            "/{id}/owners",
            get(project::list_owners).post(project::add_owner),
        )
        .route("/{id}/slots", post(slot::create))
        .route("/{id}/milestones", post(milestone::create))
        .route("/{id}/resources", post(project::add_resource))
}
