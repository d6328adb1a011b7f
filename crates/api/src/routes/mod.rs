pub mod health;
pub mod profiles;
pub mod tags;
pub mod uploads;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::routing::get;
use axum::{BoxError, Router};
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;

use crate::error::AppError;
use crate::handlers;
use crate::state::AppState;

/// Build the public route tree.
///
/// Routes are mounted at the root, matching the paths existing clients call.
/// Everything except `/upload` runs under `request_timeout`; an elapsed
/// timeout is reported through the error envelope. Uploads stream an
/// unbounded body and are not timed.
///
/// ```text
/// /                                   welcome message
///
/// /profiles                           create (POST)
/// /profiles/{profile_id}              partial update (PATCH)
///
/// /tags                               list names (GET)
///
/// /upload/photo                       upload to `photos` (POST)
/// /upload/audio                       upload to `audio` (POST)
/// /upload/photo/{profile_id}          upload to `profilepics` (POST)
/// /upload/audio/{profile_id}          upload to `audiofiles` (POST)
/// ```
pub fn api_routes(request_timeout: Duration) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root::welcome))
        .nest("/profiles", profiles::router())
        .nest("/tags", tags::router())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    AppError::from_middleware(err, request_timeout)
                }))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .nest("/upload", uploads::router())
}
