pub mod health;
pub mod project;
pub mod slot;
pub mod specialty;
pub mod user;

use axum::routing::put;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /specialties                                  list with counts, create
/// /specialties/{slug}                           get by slug
/// /specialties/{slug}/projects                  list active, create
///
/// /projects/{id}                                detail, update, delete
/// /projects/{id}/status                         set status (PUT)
/// /projects/{id}/progress                       set progress (PUT)
/// /projects/{id}/owners                         list, add
/// /projects/{id}/slots                          create
/// /projects/{id}/milestones                     create
/// /projects/{id}/resources                      add
///
/// /slots/{id}/close                             close (POST)
/// /slots/{id}/applications                      list, apply
///
/// /applications/{id}/accept                     accept (POST)
/// /applications/{id}/reject                     reject (POST)
/// /applications/{id}/withdraw                   withdraw (POST)
///
/// /milestones/{id}                              update (PUT)
///
/// /users                                        create
/// /users/{id}/student-profile                   create
/// /users/{id}/researcher-profile                create
/// /users/{id}/audit-events                      list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/specialties", specialty::router())
        .nest("/projects", project::router())
        .nest("/slots", slot::slot_router())
        .nest("/applications", slot::application_router())
        .route("/milestones/{id}", put(handlers::milestone::update))
        .nest("/users", user::router())
}
