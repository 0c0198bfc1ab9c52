/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, passed explicitly into every board operation.
    pub pool: sirn_db::DbPool,
}
