/// A row as exchanged with the table API: column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Store-assigned identifiers are opaque JSON values (integers or uuid strings).
pub type RecordId = serde_json::Value;
