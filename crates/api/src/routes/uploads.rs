//! Route definitions for media uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Upload routes mounted at `/upload`. Bodies are not size-limited here.
///
/// ```text
/// POST   /photo                 -> upload_photo
/// POST   /audio                 -> upload_audio
/// POST   /photo/{profile_id}    -> upload_profile_photo
/// POST   /audio/{profile_id}    -> upload_profile_audio
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/photo", post(uploads::upload_photo))
        .route("/audio", post(uploads::upload_audio))
        .route("/photo/{profile_id}", post(uploads::upload_profile_photo))
        .route("/audio/{profile_id}", post(uploads::upload_profile_audio))
        .layer(DefaultBodyLimit::disable())
}
