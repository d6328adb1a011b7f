//! In-process [`TableStore`] / [`BlobStore`] implementation.
//!
//! Rows get auto-increment integer ids. Every call is recorded so tests can
//! assert on exactly which remote operations a request triggered, and a
//! one-shot failure can be armed per operation and target.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dna_core::types::Row;
use serde_json::Value;

use crate::error::StoreError;
use crate::{BlobStore, Filter, StoreResult, TableStore};

/// Operation kind, used for call records and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Insert,
    Select,
    Update,
    Upload,
}

/// One recorded call against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Insert {
        table: String,
        row: Row,
    },
    Select {
        table: String,
        columns: String,
        filters: Vec<Filter>,
    },
    Update {
        table: String,
        fields: Row,
        filters: Vec<Filter>,
    },
    Upload {
        bucket: String,
        path: String,
        content_type: String,
        size: usize,
    },
}

impl StoreCall {
    pub fn op(&self) -> StoreOp {
        match self {
            StoreCall::Insert { .. } => StoreOp::Insert,
            StoreCall::Select { .. } => StoreOp::Select,
            StoreCall::Update { .. } => StoreOp::Update,
            StoreCall::Upload { .. } => StoreOp::Upload,
        }
    }

    /// Table name, or bucket for uploads.
    pub fn target(&self) -> &str {
        match self {
            StoreCall::Insert { table, .. }
            | StoreCall::Select { table, .. }
            | StoreCall::Update { table, .. } => table,
            StoreCall::Upload { bucket, .. } => bucket,
        }
    }
}

/// An object held in a memory bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

struct ArmedFailure {
    op: StoreOp,
    target: String,
    error: StoreError,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Vec<Row>>,
    objects: HashMap<(String, String), StoredObject>,
    unique: Vec<(String, String)>,
    calls: Vec<StoreCall>,
    failures: Vec<ArmedFailure>,
    next_id: i64,
}

impl Inner {
    fn take_failure(&mut self, op: StoreOp, target: &str) -> Option<StoreError> {
        let pos = self
            .failures
            .iter()
            .position(|f| f.op == op && f.target == target)?;
        Some(self.failures.remove(pos).error)
    }

    fn insert_row(&mut self, table: &str, mut row: Row) -> StoreResult<Row> {
        for (t, column) in &self.unique {
            if t != table {
                continue;
            }
            let Some(value) = row.get(column) else { continue };
            let taken = self
                .tables
                .get(table)
                .is_some_and(|rows| rows.iter().any(|r| r.get(column) == Some(value)));
            if taken {
                return Err(StoreError::Conflict(format!(
                    "duplicate key value violates unique constraint on {table}.{column}"
                )));
            }
        }

        if !row.contains_key("id") {
            self.next_id += 1;
            row.insert("id".into(), Value::from(self.next_id));
        }
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }
}

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inserts that repeat an existing value of `table.column`.
    pub fn with_unique(self, table: &str, column: &str) -> Self {
        self.lock()
            .unique
            .push((table.to_string(), column.to_string()));
        self
    }

    /// Insert a row without recording a call. Returns the stored row.
    pub fn seed(&self, table: &str, row: Row) -> StoreResult<Row> {
        self.lock().insert_row(table, row)
    }

    /// Make the next `op` against `target` (table or bucket) fail with `error`.
    pub fn fail_next(&self, op: StoreOp, target: &str, error: StoreError) {
        self.lock().failures.push(ArmedFailure {
            op,
            target: target.to_string(),
            error,
        });
    }

    /// Snapshot of all rows in `table`, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Recorded calls of one kind against one table or bucket.
    pub fn calls_to(&self, op: StoreOp, target: &str) -> Vec<StoreCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.op() == op && c.target() == target)
            .cloned()
            .collect()
    }

    pub fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Equality that tolerates ids arriving as path strings (`"3"` vs `3`).
fn loose_eq(stored: &Value, wanted: &Value) -> bool {
    if stored == wanted {
        return true;
    }
    match (stored, wanted) {
        (Value::String(_), Value::String(_)) => false,
        (other, Value::String(s)) | (Value::String(s), other) => other.to_string() == *s,
        _ => false,
    }
}

fn matches(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| match filter {
        Filter::Eq(column, value) => row.get(column).is_some_and(|v| loose_eq(v, value)),
    })
}

fn project(row: &Row, columns: &str) -> Row {
    if columns.trim() == "*" {
        return row.clone();
    }
    columns
        .split(',')
        .map(str::trim)
        .filter_map(|c| row.get(c).map(|v| (c.to_string(), v.clone())))
        .collect()
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn insert(&self, table: &str, row: Row) -> StoreResult<Vec<Row>> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Insert {
            table: table.to_string(),
            row: row.clone(),
        });
        if let Some(err) = inner.take_failure(StoreOp::Insert, table) {
            return Err(err);
        }
        Ok(vec![inner.insert_row(table, row)?])
    }

    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Row>> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Select {
            table: table.to_string(),
            columns: columns.to_string(),
            filters: filters.to_vec(),
        });
        if let Some(err) = inner.take_failure(StoreOp::Select, table) {
            return Err(err);
        }
        Ok(inner
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| matches(r, filters))
                    .map(|r| project(r, columns))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(&self, table: &str, fields: Row, filters: &[Filter]) -> StoreResult<Vec<Row>> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Update {
            table: table.to_string(),
            fields: fields.clone(),
            filters: filters.to_vec(),
        });
        if let Some(err) = inner.take_failure(StoreOp::Update, table) {
            return Err(err);
        }
        let mut updated = Vec::new();
        if let Some(rows) = inner.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches(r, filters)) {
                for (k, v) in &fields {
                    row.insert(k.clone(), v.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Upload {
            bucket: bucket.to_string(),
            path: path.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        });
        if let Some(err) = inner.take_failure(StoreOp::Upload, bucket) {
            return Err(err);
        }
        inner.objects.insert(
            (bucket.to_string(), path.to_string()),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}
