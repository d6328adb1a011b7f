//! Capability interfaces over the hosted table and object storage service.
//!
//! Handlers only ever see [`TableStore`] and [`BlobStore`] trait objects.
//! [`SupabaseClient`] talks to the hosted platform over HTTP; [`MemoryStore`]
//! keeps everything in process and records each call, for tests.

pub mod config;
pub mod error;
pub mod memory;
pub mod repositories;
pub mod supabase;

use async_trait::async_trait;
use dna_core::types::Row;
use serde_json::Value;

pub use config::StoreConfig;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use supabase::SupabaseClient;

pub type StoreResult<T> = Result<T, StoreError>;

/// Row filter understood by every store implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`.
    Eq(String, Value),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(column.into(), value.into())
    }
}

/// Row-level access to named tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert one row and return the stored representation.
    async fn insert(&self, table: &str, row: Row) -> StoreResult<Vec<Row>>;

    /// Select `columns` (comma-separated, or `*`) from rows matching all filters.
    async fn select(&self, table: &str, columns: &str, filters: &[Filter])
        -> StoreResult<Vec<Row>>;

    /// Overwrite `fields` on rows matching all filters and return them.
    async fn update(&self, table: &str, fields: Row, filters: &[Filter])
        -> StoreResult<Vec<Row>>;
}

/// Bucketed object storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `bucket`/`path`, tagged with `content_type`.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()>;

    /// Public URL of an object. Pure composition, no round-trip.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
