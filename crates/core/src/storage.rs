//! Object storage layout for uploaded media.
//!
//! Unscoped uploads land in the `photos` / `audio` buckets; uploads tied to a
//! profile land in `profilepics` / `audiofiles` under a per-profile folder.

/// Fallback when a multipart part declares no content type.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Kind of media being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Audio,
}

impl MediaKind {
    /// Leading path segment of every object key for this kind.
    pub fn category(self) -> &'static str {
        match self {
            MediaKind::Photo => "photos",
            MediaKind::Audio => "audio",
        }
    }

    fn bucket(self, profile_scoped: bool) -> &'static str {
        match (self, profile_scoped) {
            (MediaKind::Photo, false) => "photos",
            (MediaKind::Audio, false) => "audio",
            (MediaKind::Photo, true) => "profilepics",
            (MediaKind::Audio, true) => "audiofiles",
        }
    }
}

/// Where an upload goes: bucket plus the key prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub kind: MediaKind,
    pub profile_id: Option<String>,
}

impl UploadTarget {
    pub fn unscoped(kind: MediaKind) -> Self {
        Self {
            kind,
            profile_id: None,
        }
    }

    pub fn for_profile(kind: MediaKind, profile_id: impl Into<String>) -> Self {
        Self {
            kind,
            profile_id: Some(profile_id.into()),
        }
    }

    pub fn bucket(&self) -> &'static str {
        self.kind.bucket(self.profile_id.is_some())
    }

    /// Object key for `filename`. The filename is used verbatim.
    pub fn object_path(&self, filename: &str) -> String {
        match &self.profile_id {
            Some(id) => format!("{}/{id}/{filename}", self.kind.category()),
            None => format!("{}/{filename}", self.kind.category()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscoped_photo_goes_to_photos_bucket() {
        let target = UploadTarget::unscoped(MediaKind::Photo);
        assert_eq!(target.bucket(), "photos");
        assert_eq!(target.object_path("cover.png"), "photos/cover.png");
    }

    #[test]
    fn scoped_photo_goes_to_profilepics() {
        let target = UploadTarget::for_profile(MediaKind::Photo, "p1");
        assert_eq!(target.bucket(), "profilepics");
        assert_eq!(target.object_path("cover.png"), "photos/p1/cover.png");
    }

    #[test]
    fn audio_buckets() {
        assert_eq!(UploadTarget::unscoped(MediaKind::Audio).bucket(), "audio");
        let scoped = UploadTarget::for_profile(MediaKind::Audio, "7");
        assert_eq!(scoped.bucket(), "audiofiles");
        assert_eq!(scoped.object_path("a_1.mp3"), "audio/7/a_1.mp3");
    }

    #[test]
    fn filename_is_not_sanitized() {
        let target = UploadTarget::unscoped(MediaKind::Audio);
        assert_eq!(target.object_path("../x.mp3"), "audio/../x.mp3");
    }
}
