//! Uploads media objects and hands back their public URLs.

use dna_core::storage::UploadTarget;

use crate::{BlobStore, StoreResult};

pub struct MediaRepo;

impl MediaRepo {
    /// Store `bytes` for `target` under `filename` and return the public URL.
    pub async fn upload(
        blobs: &dyn BlobStore,
        target: &UploadTarget,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<String> {
        let bucket = target.bucket();
        let path = target.object_path(filename);
        blobs.upload(bucket, &path, bytes, content_type).await?;
        Ok(blobs.public_url(bucket, &path))
    }
}
