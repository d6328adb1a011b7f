use std::sync::Arc;

use dna_store::{BlobStore, TableStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Row access to the hosted tables.
    pub tables: Arc<dyn TableStore>,
    /// Object storage for uploaded media.
    pub blobs: Arc<dyn BlobStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state where one store value serves both tables and blobs.
    pub fn with_store<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: TableStore + BlobStore + 'static,
    {
        Self {
            tables: store.clone(),
            blobs: store,
            config: Arc::new(config),
        }
    }
}
