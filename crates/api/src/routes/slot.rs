//! Route definitions for `/slots` and `/applications`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::slot;
use crate::state::AppState;

/// Routes mounted at `/slots`.
///
/// ```text
/// POST   /{id}/close           -> close
/// GET    /{id}/applications    -> list_applications
/// POST   /{id}/applications    -> apply
/// ```
pub fn slot_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/close", post(slot::close))
        .route(
            "/{id}/applications",
            get(slot::list_applications).post(slot::apply),
        )
}

/// Routes mounted at `/applications`.
///
/// ```text
/// POST   /{id}/accept          -> accept
/// POST   /{id}/reject          -> reject
/// POST   /{id}/withdraw        -> withdraw
/// ```
pub fn application_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/accept", post(slot::accept))
        .route("/{id}/reject", post(slot::reject))
        .route("/{id}/withdraw", post(slot::withdraw))
}
