//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                          -> create
/// POST   /{id}/student-profile      -> create_student_profile
/// POST   /{id}/researcher-profile   -> create_researcher_profile
/// GET    /{id}/audit-events         -> list_audit_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create))
        .route("/{id}/student-profile", post(user::create_student_profile))
        .route(
            "/{id}/researcher-profile",
            post(user::create_researcher_profile),
        )
        .route("/{id}/audit-events", get(user::list_audit_events))
}
