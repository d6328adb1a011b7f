//! Handlers for the tag vocabulary.

use axum::extract::State;
use axum::Json;
use dna_store::repositories::TagRepo;

use crate::error::AppResult;
use crate::response::TagsResponse;
use crate::state::AppState;

/// GET /tags
///
/// Every tag name, in store order. No pagination or filtering.
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<TagsResponse>> {
    let tags = TagRepo::list_names(state.tables.as_ref()).await?;

    tracing::debug!(count = tags.len(), "Tags listed");

    Ok(Json(TagsResponse::new(tags)))
}
