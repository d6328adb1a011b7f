//! Repository for the `profiles` table.

use dna_core::profile::{ProfileData, ProfilePatch, PROFILES_TABLE};
use dna_core::types::Row;

use crate::{Filter, StoreResult, TableStore};

/// Provides insert and partial update for creator profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a profile row (tags excluded) and return what the store echoed.
    pub async fn insert(tables: &dyn TableStore, profile: &ProfileData) -> StoreResult<Vec<Row>> {
        tables.insert(PROFILES_TABLE, profile.to_row()).await
    }

    /// Apply a patch to the profile with the given id.
    ///
    /// The id is passed through as text; the store coerces it to the
    /// column type.
    pub async fn update(
        tables: &dyn TableStore,
        profile_id: &str,
        patch: ProfilePatch,
    ) -> StoreResult<Vec<Row>> {
        tables
            .update(
                PROFILES_TABLE,
                patch.into_row(),
                &[Filter::eq("id", profile_id)],
            )
            .await
    }
}
