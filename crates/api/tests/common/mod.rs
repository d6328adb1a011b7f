#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dna_api::config::ServerConfig;
use dna_api::router::build_app_router;
use dna_api::state::AppState;
use dna_store::MemoryStore;

pub const BOUNDARY: &str = "dna-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router against an in-memory store.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_app_with_config(store, test_config())
}

pub fn build_app_with_config(store: Arc<MemoryStore>, config: ServerConfig) -> Router {
    let state = AppState::with_store(store, config.clone());
    build_app_router(state, &config)
}

/// A fresh store with the `tags.name` unique constraint the hosted schema has.
pub fn new_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new().with_unique("tags", "name"))
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

/// Encode one multipart part named `name`.
pub fn multipart_part(name: &str, filename: Option<&str>, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut part = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"");
    if let Some(filename) = filename {
        part.push_str(&format!("; filename=\"{filename}\""));
    }
    part.push_str(&format!("\r\nContent-Type: {content_type}\r\n\r\n"));
    let mut bytes = part.into_bytes();
    bytes.extend_from_slice(data);
    bytes.extend_from_slice(b"\r\n");
    bytes
}

/// POST a multipart body made of the given encoded parts.
pub async fn post_multipart(app: Router, uri: &str, parts: Vec<Vec<u8>>) -> Response<Body> {
    let mut body: Vec<u8> = parts.into_iter().flatten().collect();
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a single `file` part.
pub async fn upload_file(
    app: Router,
    uri: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Response<Body> {
    let part = multipart_part("file", Some(filename), content_type, data);
    post_multipart(app, uri, vec![part]).await
}

/// A valid create-profile body with the given tags.
pub fn profile_body(tags: Option<Vec<&str>>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "creator_name": "Skrillex",
        "description": "Dubstep pioneer",
        "price": 49.5,
        "license": "exclusive",
        "tracks": "12",
        "become_partner": "yes",
        "dna_sensitivity": 3
    });
    if let Some(tags) = tags {
        body["tags"] = serde_json::json!(tags);
    }
    body
}
