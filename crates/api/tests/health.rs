//! Integration tests for the root and health endpoints and general HTTP
//! behaviour (request IDs, CORS, unknown routes).

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_app_with_config, build_test_app, get, new_store, test_config};
use dna_api::config::CorsOrigins;
use tower::ServiceExt;

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = build_test_app(new_store());
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Welcome to the Soundverse DNA FastAPI server!");
}

#[tokio::test]
async fn health_check_returns_ok_without_store_calls() {
    let store = new_store();
    let app = build_test_app(store.clone());
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(new_store());
    let response = get(app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app(new_store());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/profiles")
        .header("Origin", origin)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn cors_admits_any_origin_by_default() {
    let app = build_test_app(new_store());
    let response = app.oneshot(preflight("http://anything.example")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"].to_str().unwrap(),
        "http://anything.example"
    );
    assert_eq!(
        headers["access-control-allow-credentials"].to_str().unwrap(),
        "true"
    );
    assert!(headers["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .contains("POST"));
}

#[tokio::test]
async fn cors_list_rejects_unlisted_origin() {
    let mut config = test_config();
    config.cors_origins = CorsOrigins::List(vec!["http://localhost:3000".into()]);
    let app = build_app_with_config(new_store(), config);

    let response = app.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
