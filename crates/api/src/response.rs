//! Response envelope types for API handlers.
//!
//! Every response carries a `success` flag next to its payload:
//! `{ "success": true, "data": ... }`, `{ "success": true, "tags": [...] }`,
//! `{ "success": true, "url": "..." }` or `{ "success": false, "error": "..." }`.

use serde::Serialize;

/// `{ "success": true, "data": T }` — rows returned by the table store.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "success": true, "tags": [...] }`.
#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub success: bool,
    pub tags: Vec<String>,
}

impl TagsResponse {
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            success: true,
            tags,
        }
    }
}

/// `{ "success": true, "url": "..." }` — public URL of an uploaded object.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub success: bool,
    pub url: String,
}

impl UrlResponse {
    pub fn new(url: String) -> Self {
        Self { success: true, url }
    }
}

/// `{ "success": false, "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

/// `{ "message": "..." }` for the root endpoint.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
