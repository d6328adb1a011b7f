//! Repository for the `tags` table.

use dna_core::profile::TAGS_TABLE;
use dna_core::types::{RecordId, Row};

use crate::{Filter, StoreResult, TableStore};

/// Provides lookup, lazy creation and listing of tags.
pub struct TagRepo;

impl TagRepo {
    /// Find a tag by exact name.
    pub async fn find_id_by_name(
        tables: &dyn TableStore,
        name: &str,
    ) -> StoreResult<Option<RecordId>> {
        let rows = tables
            .select(TAGS_TABLE, "id", &[Filter::eq("name", name)])
            .await?;
        Ok(dna_core::profile::first_row_id(&rows))
    }

    /// Return the id of the tag called `name`, inserting it if absent.
    ///
    /// Lookup and insert are separate calls: two concurrent requests for
    /// the same new name can both miss the lookup, and the store's unique
    /// constraint decides which insert wins. `Ok(None)` means the insert
    /// succeeded but returned no id.
    pub async fn resolve_id(tables: &dyn TableStore, name: &str) -> StoreResult<Option<RecordId>> {
        if let Some(id) = Self::find_id_by_name(tables, name).await? {
            return Ok(Some(id));
        }

        let mut row = Row::new();
        row.insert("name".into(), name.into());
        let rows = tables.insert(TAGS_TABLE, row).await?;
        tracing::debug!(tag = name, "Tag created");
        Ok(dna_core::profile::first_row_id(&rows))
    }

    /// Every tag name, in the order the store returns them.
    pub async fn list_names(tables: &dyn TableStore) -> StoreResult<Vec<String>> {
        let rows = tables.select(TAGS_TABLE, "name", &[]).await?;
        Ok(rows
            .into_iter()
            .filter_map(|mut row| match row.remove("name") {
                Some(serde_json::Value::String(name)) => Some(name),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::memory::{MemoryStore, StoreOp};

    fn named(name: &str) -> Row {
        json!({ "name": name }).as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn resolve_reuses_existing_tag() {
        let store = MemoryStore::new();
        let seeded = store.seed(TAGS_TABLE, named("edm")).unwrap();

        let id = TagRepo::resolve_id(&store, "edm").await.unwrap();
        assert_eq!(id.as_ref(), seeded.get("id"));
        assert!(store.calls_to(StoreOp::Insert, TAGS_TABLE).is_empty());
    }

    #[tokio::test]
    async fn resolve_creates_missing_tag() {
        let store = MemoryStore::new();
        let id = TagRepo::resolve_id(&store, "lofi").await.unwrap();
        assert_eq!(id, Some(json!(1)));
        assert_eq!(store.rows(TAGS_TABLE).len(), 1);
    }

    #[tokio::test]
    async fn list_names_preserves_store_order() {
        let store = MemoryStore::new();
        for name in ["zeta", "alpha", "mid"] {
            store.seed(TAGS_TABLE, named(name)).unwrap();
        }
        let names = TagRepo::list_names(&store).await.unwrap();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn list_names_skips_rows_without_string_name() {
        let store = MemoryStore::new();
        store.seed(TAGS_TABLE, named("house")).unwrap();
        for row in [json!({ "name": null }), json!({ "name": 3 }), json!({})] {
            store.seed(TAGS_TABLE, row.as_object().cloned().unwrap()).unwrap();
        }
        let names = TagRepo::list_names(&store).await.unwrap();
        assert_eq!(names, vec!["house"]);
    }
}
