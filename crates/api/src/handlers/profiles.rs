//! Handlers for creator profiles.
//!
//! Creation writes the profile row, then resolves each tag name (creating
//! missing tags) and links it to the profile. The steps are independent
//! store calls: a failure part-way leaves the earlier writes in place.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use dna_core::profile::{first_row_id, ProfileData, ProfilePatch};
use dna_core::types::Row;
use dna_store::repositories::{ProfileRepo, ProfileTagRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const INSERT_FAILED: &str = "Profile insert failed or no id returned.";
const TAG_INSERT_FAILED: &str = "Tag insert failed or no id returned.";
const NOTHING_TO_UPDATE: &str = "No valid fields to update.";

/// POST /profiles
///
/// Returns the inserted profile rows; tag associations are not echoed.
/// Repeated tag names produce repeated associations.
pub async fn create_profile(
    State(state): State<AppState>,
    payload: Result<Json<ProfileData>, JsonRejection>,
) -> AppResult<Json<DataResponse<Vec<Row>>>> {
    let Json(profile) = payload?;
    let tables = state.tables.as_ref();

    let rows = ProfileRepo::insert(tables, &profile).await?;
    let profile_id = first_row_id(&rows).ok_or(AppError::Workflow(INSERT_FAILED))?;

    let tag_names = profile.tag_names();
    for (linked, name) in tag_names.iter().enumerate() {
        if let Err(err) = link_tag(&state, &profile_id, name).await {
            tracing::warn!(
                profile_id = %profile_id,
                linked,
                total = tag_names.len(),
                "Tag linking aborted; profile kept with partial tags",
            );
            return Err(err);
        }
    }

    tracing::info!(
        profile_id = %profile_id,
        tags = tag_names.len(),
        "Profile created",
    );

    Ok(Json(DataResponse::new(rows)))
}

async fn link_tag(state: &AppState, profile_id: &serde_json::Value, name: &str) -> AppResult<()> {
    let tables = state.tables.as_ref();
    let tag_id = TagRepo::resolve_id(tables, name)
        .await?
        .ok_or(AppError::Workflow(TAG_INSERT_FAILED))?;
    ProfileTagRepo::associate(tables, profile_id, &tag_id).await?;
    Ok(())
}

/// PATCH /profiles/{profile_id}
///
/// Only `photo_url` and `audio_urls` are honoured; other keys are dropped.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<DataResponse<Vec<Row>>>> {
    let Json(body) = payload?;
    let patch = ProfilePatch::from_body(&body)?;
    if patch.is_empty() {
        return Err(AppError::Workflow(NOTHING_TO_UPDATE));
    }

    let rows = ProfileRepo::update(state.tables.as_ref(), &profile_id, patch).await?;

    tracing::info!(profile_id = %profile_id, updated = rows.len(), "Profile updated");

    Ok(Json(DataResponse::new(rows)))
}
