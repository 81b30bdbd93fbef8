//! Opt-in credential header injection.

use crate::pipeline::{Interceptor, Next};
use crate::request::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use people_core::config::{ApiConfig, DEFAULT_API_KEY, DEFAULT_API_KEY_HEADER};
use people_core::{DirectoryError, Result};
use reqwest::header::{HeaderName, HeaderValue};

/// Adds the credential header to requests whose context asked for it.
///
/// Requests without the `use_api_key` flag pass through untouched, and an
/// existing header of the same name is never overwritten.
#[derive(Debug, Clone)]
pub struct ApiKeyInterceptor {
    header: HeaderName,
    value: HeaderValue,
}

impl ApiKeyInterceptor {
    /// Creates an interceptor for the given header name and value.
    pub fn new(header: &str, value: &str) -> Result<Self> {
        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|e| DirectoryError::config(format!("Invalid API key header name: {}", e)))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| DirectoryError::config(format!("Invalid API key value: {}", e)))?;
        value.set_sensitive(true);
        Ok(Self { header, value })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.api_key_header, &config.api_key)
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }
}

impl Default for ApiKeyInterceptor {
    fn default() -> Self {
        let mut value = HeaderValue::from_static(DEFAULT_API_KEY);
        value.set_sensitive(true);
        Self {
            header: HeaderName::from_static(DEFAULT_API_KEY_HEADER),
            value,
        }
    }
}

#[async_trait]
impl Interceptor for ApiKeyInterceptor {
    async fn intercept(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse> {
        if !request.context().use_api_key() || request.headers().contains_key(&self.header) {
            return next.run(request).await;
        }

        let with_key = request.with_header(self.header.clone(), self.value.clone());
        next.run(with_key).await
    }
}
