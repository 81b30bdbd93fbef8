//! Client configuration model.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";
pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the people directory API.
///
/// Every field has a default so a partial `config.toml` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address; endpoints are resolved as `{base_url}/users...`
    pub base_url: String,
    /// Name of the credential header
    pub api_key_header: String,
    /// Value of the credential header
    pub api_key: String,
    /// Page size used by list loads
    pub page_size: u32,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Overrides the base address after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub api: ApiConfig,
}
