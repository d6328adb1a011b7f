//! Handlers for media uploads.
//!
//! Each accepts a multipart form with a `file` part, buffers it fully,
//! stores it and answers with the object's public URL. Filenames are used
//! verbatim in the object key.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use dna_core::storage::{MediaKind, UploadTarget, DEFAULT_CONTENT_TYPE};
use dna_store::repositories::MediaRepo;

use crate::error::{AppError, AppResult};
use crate::response::UrlResponse;
use crate::state::AppState;

/// A buffered `file` part.
struct UploadedFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Pull the `file` part out of the form. Other parts are ignored.
async fn read_file_field(mut multipart: Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = field.bytes().await?.to_vec();
        return Ok(UploadedFile {
            filename,
            content_type,
            bytes,
        });
    }
    Err(AppError::BadRequest("Missing required 'file' field".into()))
}

async fn store_upload(
    state: &AppState,
    target: UploadTarget,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UrlResponse>> {
    let file = read_file_field(multipart?).await?;
    let size = file.bytes.len();

    let url = MediaRepo::upload(
        state.blobs.as_ref(),
        &target,
        &file.filename,
        file.bytes,
        &file.content_type,
    )
    .await?;

    tracing::info!(
        bucket = target.bucket(),
        path = %target.object_path(&file.filename),
        size,
        "Media uploaded",
    );

    Ok(Json(UrlResponse::new(url)))
}

/// POST /upload/photo
pub async fn upload_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UrlResponse>> {
    store_upload(&state, UploadTarget::unscoped(MediaKind::Photo), multipart).await
}

/// POST /upload/audio
pub async fn upload_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UrlResponse>> {
    store_upload(&state, UploadTarget::unscoped(MediaKind::Audio), multipart).await
}

/// POST /upload/photo/{profile_id}
pub async fn upload_profile_photo(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UrlResponse>> {
    let target = UploadTarget::for_profile(MediaKind::Photo, profile_id);
    store_upload(&state, target, multipart).await
}

/// POST /upload/audio/{profile_id}
pub async fn upload_profile_audio(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UrlResponse>> {
    let target = UploadTarget::for_profile(MediaKind::Audio, profile_id);
    store_upload(&state, target, multipart).await
}
