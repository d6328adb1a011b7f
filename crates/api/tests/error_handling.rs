//! Tests for `AppError` → envelope mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use dna_api::error::{AppError, ErrorStatus};
use dna_core::error::CoreError;
use dna_store::StoreError;
use http_body_util::BodyExt;

/// Convert an `AppError` into its status, recorded typed status and JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let ErrorStatus(typed) = *response
        .extensions()
        .get::<ErrorStatus>()
        .expect("error responses carry ErrorStatus");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, typed, json)
}

#[tokio::test]
async fn workflow_message_is_verbatim() {
    let (status, typed, json) =
        error_to_response(AppError::Workflow("No valid fields to update.")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(typed, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No valid fields to update.");
}

#[tokio::test]
async fn elapsed_timeout_maps_to_504() {
    let err = AppError::from_middleware(
        Box::new(tower::timeout::error::Elapsed::new()),
        Duration::from_secs(30),
    );
    let (status, typed, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(typed, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"], "Request timed out after 30s");
}

#[tokio::test]
async fn other_middleware_error_is_internal() {
    let err = AppError::from_middleware("layer failed".into(), Duration::from_secs(30));
    let (_, typed, json) = error_to_response(err).await;
    assert_eq!(typed, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal error: layer failed");
}

#[tokio::test]
async fn store_conflict_maps_to_409() {
    let (_, typed, json) =
        error_to_response(AppError::Store(StoreError::Conflict("dup".into()))).await;
    assert_eq!(typed, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Conflict: dup");
}

#[tokio::test]
async fn store_server_error_maps_to_502() {
    let err = AppError::Store(StoreError::Api {
        status: 503,
        body: "maintenance".into(),
    });
    let (status, typed, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(typed, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Store API error (503): maintenance");
}

#[tokio::test]
async fn store_client_error_maps_to_400() {
    let err = AppError::Store(StoreError::Api {
        status: 422,
        body: "bad".into(),
    });
    let (_, typed, _) = error_to_response(err).await;
    assert_eq!(typed, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn internal_core_error_maps_to_500() {
    let (_, typed, json) =
        error_to_response(AppError::Core(CoreError::Internal("boom".into()))).await;
    assert_eq!(typed, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal error: boom");
}
