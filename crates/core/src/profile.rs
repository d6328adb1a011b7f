//! Creator profile payloads and the patch rules for `PATCH /profiles/{id}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{RecordId, Row};

// ---------------------------------------------------------------------------
// Table names
// ---------------------------------------------------------------------------

pub const PROFILES_TABLE: &str = "profiles";
pub const TAGS_TABLE: &str = "tags";
pub const PROFILE_TAGS_TABLE: &str = "profile_tags";

/// Fields a profile patch may touch. Anything else in the body is ignored.
pub const PATCHABLE_FIELDS: &[&str] = &["photo_url", "audio_urls"];

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Request body for `POST /profiles`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProfileData {
    pub creator_name: String,
    pub description: String,
    pub price: f64,
    pub license: String,
    pub tracks: String,
    pub become_partner: String,
    pub dna_sensitivity: i64,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ProfileData {
    /// The row written to the profiles table. Tags are stored separately.
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("creator_name".into(), self.creator_name.clone().into());
        row.insert("description".into(), self.description.clone().into());
        row.insert("price".into(), self.price.into());
        row.insert("license".into(), self.license.clone().into());
        row.insert("tracks".into(), self.tracks.clone().into());
        row.insert("become_partner".into(), self.become_partner.clone().into());
        row.insert("dna_sensitivity".into(), self.dna_sensitivity.into());
        row
    }

    /// Tag names in request order, repeats included.
    pub fn tag_names(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// Id of the first returned row, if the store produced one.
///
/// A missing `id` key and an explicit `null` are treated the same.
pub fn first_row_id(rows: &[Row]) -> Option<RecordId> {
    rows.first()
        .and_then(|row| row.get("id"))
        .filter(|id| !id.is_null())
        .cloned()
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// The recognised subset of a profile update body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    fields: Row,
}

impl ProfilePatch {
    /// Pick the patchable keys out of an arbitrary JSON body.
    ///
    /// Key presence is what counts: `{"photo_url": null}` clears the photo.
    pub fn from_body(body: &Value) -> Result<Self, CoreError> {
        let obj = body
            .as_object()
            .ok_or_else(|| CoreError::Validation("Update body must be a JSON object".into()))?;

        let fields = PATCHABLE_FIELDS
            .iter()
            .filter_map(|key| obj.get(*key).map(|v| ((*key).to_string(), v.clone())))
            .collect();

        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_row(self) -> Row {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn sample() -> ProfileData {
        serde_json::from_value(json!({
            "creator_name": "Skrillex",
            "description": "Bass",
            "price": 10,
            "license": "cc-by",
            "tracks": "3",
            "become_partner": "yes",
            "dna_sensitivity": 7,
            "tags": ["edm", "bass"]
        }))
        .unwrap()
    }

    #[test]
    fn integer_price_is_coerced_to_float() {
        let row = sample().to_row();
        assert_eq!(row["price"], json!(10.0));
        assert!(row["price"].is_f64());
    }

    #[test]
    fn profile_row_excludes_tags() {
        let row = sample().to_row();
        assert!(!row.contains_key("tags"));
        assert_eq!(row.len(), 7);
    }

    #[test]
    fn absent_tags_yield_empty_slice() {
        let mut data = sample();
        data.tags = None;
        assert!(data.tag_names().is_empty());
    }

    #[test]
    fn first_row_id_ignores_null() {
        let mut row = Row::new();
        row.insert("id".into(), Value::Null);
        assert_eq!(first_row_id(&[row]), None);
        assert_eq!(first_row_id(&[]), None);

        let mut row = Row::new();
        row.insert("id".into(), json!(42));
        assert_eq!(first_row_id(&[row]), Some(json!(42)));
    }

    #[test]
    fn patch_keeps_only_recognised_keys() {
        let patch = ProfilePatch::from_body(&json!({
            "photo_url": "http://x",
            "creator_name": "ignored"
        }))
        .unwrap();
        let row = patch.into_row();
        assert_eq!(row.len(), 1);
        assert_eq!(row["photo_url"], "http://x");
    }

    #[test]
    fn patch_with_only_unknown_keys_is_empty() {
        let patch = ProfilePatch::from_body(&json!({"foo": "bar"})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_counts_explicit_null() {
        let patch = ProfilePatch::from_body(&json!({"photo_url": null})).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_rejects_non_object_body() {
        assert_matches!(
            ProfilePatch::from_body(&json!(["photo_url"])),
            Err(CoreError::Validation(_))
        );
    }
}
