//! Repository for the `profile_tags` junction table.

use dna_core::profile::PROFILE_TAGS_TABLE;
use dna_core::types::{RecordId, Row};

use crate::{StoreResult, TableStore};

pub struct ProfileTagRepo;

impl ProfileTagRepo {
    /// Link a profile to a tag. No duplicate check.
    pub async fn associate(
        tables: &dyn TableStore,
        profile_id: &RecordId,
        tag_id: &RecordId,
    ) -> StoreResult<Vec<Row>> {
        let mut row = Row::new();
        row.insert("profile_id".into(), profile_id.clone());
        row.insert("tag_id".into(), tag_id.clone());
        tables.insert(PROFILE_TAGS_TABLE, row).await
    }
}
