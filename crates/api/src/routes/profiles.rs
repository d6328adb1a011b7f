//! Route definitions for creator profiles.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Profile routes mounted at `/profiles`.
///
/// ```text
/// POST   /                  -> create_profile
/// PATCH  /{profile_id}      -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(profiles::create_profile))
        .route("/{profile_id}", patch(profiles::update_profile))
}
