//! Terminal stage of the pipeline: puts a request on the wire.

use crate::request::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use people_core::{DirectoryError, Result};
use reqwest::Client;
use std::time::Duration;

/// Sends a fully prepared request and returns the response.
///
/// Implementations return `DirectoryError::Status` for any non-2xx answer and
/// `DirectoryError::Network` when no status could be obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            DirectoryError::network(format!(
                "{} {} failed: {}",
                request.method(),
                request.url(),
                err
            ))
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|err| {
            DirectoryError::network(format!("Failed to read response body: {}", err))
        })?;

        if !status.is_success() {
            return Err(DirectoryError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                String::from_utf8_lossy(&body),
            ));
        }

        Ok(ApiResponse::new(status, body.to_vec()).with_headers(headers))
    }
}
