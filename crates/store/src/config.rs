use std::time::Duration;

use crate::error::StoreError;

/// Connection settings for the hosted platform.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, without trailing slash.
    pub base_url: String,
    /// Service or anon key sent on every request.
    pub api_key: String,
    /// TCP connect timeout for outbound requests.
    pub connect_timeout: Duration,
}

impl StoreConfig {
    /// Load from the environment.
    ///
    /// | Env Var                    | Default  |
    /// |----------------------------|----------|
    /// | `SUPABASE_URL`             | required |
    /// | `SUPABASE_KEY`             | required |
    /// | `STORE_CONNECT_TIMEOUT_SECS` | `10`   |
    pub fn from_env() -> Result<Self, StoreError> {
        let connect_timeout_secs = match std::env::var("STORE_CONNECT_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                StoreError::Config("STORE_CONNECT_TIMEOUT_SECS must be a valid u64".into())
            })?,
            Err(_) => 10,
        };

        let mut config = Self::from_parts(
            std::env::var("SUPABASE_URL").ok(),
            std::env::var("SUPABASE_KEY").ok(),
        )?;
        config.connect_timeout = Duration::from_secs(connect_timeout_secs);
        Ok(config)
    }

    /// Build from optional raw values, rejecting missing or blank ones.
    pub fn from_parts(url: Option<String>, key: Option<String>) -> Result<Self, StoreError> {
        let base_url = required("SUPABASE_URL", url)?;
        let api_key = required("SUPABASE_KEY", key)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            connect_timeout: Duration::from_secs(10),
        })
    }
}

fn required(name: &str, value: Option<String>) -> Result<String, StoreError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StoreError::Config(format!("{name} must be set")))
}
