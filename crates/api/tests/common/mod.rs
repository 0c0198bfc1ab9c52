#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sirn_core::types::DbId;
use sqlx::PgPool;
use tower::ServiceExt;

use sirn_api::config::ServerConfig;
use sirn_api::middleware::caller::USER_ID_HEADER;
use sirn_api::router::build_app_router;
use sirn_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        database_max_connections: 5,
    }
}

/// Build the full application router, with the production middleware stack,
/// around the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState { pool }, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    caller: Option<DbId>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = caller {
        builder = builder.header(USER_ID_HEADER, user_id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, caller: DbId) -> Response<Body> {
    send(app, Method::GET, uri, Some(caller), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_as(
    app: Router,
    uri: &str,
    caller: DbId,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(caller), Some(body)).await
}

/// POST with no body and no content type, as a bare form button would send.
pub async fn post_empty_as(app: Router, uri: &str, caller: DbId) -> Response<Body> {
    send(app, Method::POST, uri, Some(caller), None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_as(
    app: Router,
    uri: &str,
    caller: DbId,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(caller), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Parse a `data.<field>` UUID out of an enveloped response body.
pub fn data_id(json: &serde_json::Value, field: &str) -> DbId {
    json["data"][field].as_str().unwrap().parse().unwrap()
}
