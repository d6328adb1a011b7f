//! HTTP client for the hosted platform's table (PostgREST) and storage APIs.
//!
//! Tables live under `{base}/rest/v1/{table}`, objects under
//! `{base}/storage/v1/object/{bucket}/{path}`.

use async_trait::async_trait;
use dna_core::types::Row;
use serde_json::Value;

use reqwest::Url;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::{BlobStore, Filter, StoreResult, TableStore};

/// Client for one hosted project. Cheap to share behind an `Arc`.
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl SupabaseClient {
    /// Create a client from connection settings.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Self::with_client(client, config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &StoreConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::Config(format!("SUPABASE_URL is not a valid URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "SUPABASE_URL cannot be used as a base URL: {base_url}"
            )));
        }
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL extended with `segments`, each percent-encoded on its own.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn table_url(&self, table: &str) -> Url {
        self.endpoint(["rest", "v1", table])
    }

    /// Object keys keep their `/` separators; everything else in a
    /// segment (`#`, `?`, spaces) is encoded.
    fn object_url(&self, bucket: &str, path: &str) -> Url {
        self.endpoint(["storage", "v1", "object", bucket].into_iter().chain(path.split('/')))
    }

    /// Attach the project key and ask for the written rows back.
    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. 409 becomes
    /// [`StoreError::Conflict`]; other failures keep status and body.
    async fn ensure_success(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        if status == reqwest::StatusCode::CONFLICT {
            return Err(StoreError::Conflict(body));
        }
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_rows(response: reqwest::Response) -> StoreResult<Vec<Row>> {
        let response = Self::ensure_success(response).await?;
        let value: Value = response.json().await?;
        rows_from_value(value)
    }
}

/// Timeouts and refused connections mean the store is unreachable.
fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() || err.is_connect() {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Request(err)
    }
}

/// Query pairs for a filter list, in PostgREST's `column=eq.value` form.
pub fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| match filter {
            Filter::Eq(column, value) => (column.clone(), format!("eq.{}", value_text(value))),
        })
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Accept either a JSON array of objects or a single object.
fn rows_from_value(value: Value) -> StoreResult<Vec<Row>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                other => Err(StoreError::Decode(format!("expected row object, got {other}"))),
            })
            .collect(),
        Value::Object(row) => Ok(vec![row]),
        Value::Null => Ok(Vec::new()),
        other => Err(StoreError::Decode(format!("expected row array, got {other}"))),
    }
}

#[async_trait]
impl TableStore for SupabaseClient {
    async fn insert(&self, table: &str, row: Row) -> StoreResult<Vec<Row>> {
        tracing::debug!(table, "Table insert");
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .json(&row)
            .send()
            .await
            .map_err(transport_error)?;
        Self::parse_rows(response).await
    }

    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Row>> {
        tracing::debug!(table, columns, filters = filters.len(), "Table select");
        let response = self
            .authed(self.client.get(self.table_url(table)))
            .query(&[("select", columns)])
            .query(&filter_params(filters))
            .send()
            .await
            .map_err(transport_error)?;
        Self::parse_rows(response).await
    }

    async fn update(&self, table: &str, fields: Row, filters: &[Filter]) -> StoreResult<Vec<Row>> {
        tracing::debug!(table, filters = filters.len(), "Table update");
        let response = self
            .authed(self.client.patch(self.table_url(table)))
            .query(&filter_params(filters))
            .json(&fields)
            .send()
            .await
            .map_err(transport_error)?;
        Self::parse_rows(response).await
    }
}

#[async_trait]
impl BlobStore for SupabaseClient {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()> {
        tracing::debug!(bucket, path, size = bytes.len(), "Object upload");
        let response = self
            .client
            .post(self.object_url(bucket, path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(transport_error)?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(
            ["storage", "v1", "object", "public", bucket]
                .into_iter()
                .chain(path.split('/')),
        )
        .to_string()
    }
}
