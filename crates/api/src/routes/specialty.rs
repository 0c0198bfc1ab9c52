//! Route definitions for the `/specialties` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::specialty;
use crate::state::AppState;

/// Routes mounted at `/specialties`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create
/// GET    /{slug}               -> get_by_slug
/// GET    /{slug}/projects      -> list_projects
/// POST   /{slug}/projects      -> create_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(specialty::list).post(specialty::create))
        .route("/{slug}", get(specialty::get_by_slug))
        .route(
            "/{slug}/projects",
            get(specialty::list_projects).post(specialty::create_project),
        )
}
