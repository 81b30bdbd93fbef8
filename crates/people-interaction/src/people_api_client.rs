//! PeopleApiClient - REST client for the people directory.
//!
//! Every request opts into credential injection and carries an operation
//! label for failure diagnostics. List items are normalized into
//! [`Person`] records; failures are returned exactly as the pipeline
//! produced them.

use crate::context::RequestContext;
use crate::error_sink::ErrorSink;
use crate::interceptors::ApiKeyInterceptor;
use crate::pipeline::HttpPipeline;
use crate::request::ApiRequest;
use crate::transport::ReqwestTransport;
use async_trait::async_trait;
use people_core::config::ApiConfig;
use people_core::person::{
    CreatedPerson, ListResponse, PeopleRepository, Person, PersonCreateDto, PersonUpdateDto,
    UpdatedPerson, normalize_person,
};
use people_core::{DirectoryError, Result};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

pub const LABEL_LIST: &str = "people-list";
pub const LABEL_CREATE: &str = "people-create";
pub const LABEL_UPDATE: &str = "people-update";
pub const LABEL_DELETE: &str = "people-delete";

/// Directory client issuing `/users` requests through an [`HttpPipeline`].
#[derive(Clone)]
pub struct PeopleApiClient {
    pipeline: HttpPipeline,
    /// Validated base address without trailing slash
    base_url: String,
}

impl PeopleApiClient {
    /// Creates a client sending through `pipeline` against `base_url`.
    ///
    /// Returns `DirectoryError::Config` if `base_url` is not an absolute URL.
    pub fn new(pipeline: HttpPipeline, base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| DirectoryError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(DirectoryError::config(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }

        Ok(Self {
            pipeline,
            base_url: trimmed.to_string(),
        })
    }

    /// Builds the standard stack from configuration: reqwest transport,
    /// credential injection, then failure reporting to `sink`.
    pub fn from_config(config: &ApiConfig, sink: Arc<dyn ErrorSink>) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(config.timeout_secs))?;
        let pipeline = HttpPipeline::standard(
            Arc::new(transport),
            ApiKeyInterceptor::from_config(config)?,
            sink,
        );
        Self::new(pipeline, &config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pipeline(&self) -> &HttpPipeline {
        &self.pipeline
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| DirectoryError::config(format!("Invalid URL '{}': {}", raw, e)))
    }

    fn context(label: &str) -> RequestContext {
        RequestContext::new().with_api_key().with_log_label(label)
    }
}

#[async_trait]
impl PeopleRepository for PeopleApiClient {
    async fn list(&self, page: u32, per_page: u32) -> Result<Vec<Person>> {
        let request = ApiRequest::get(self.endpoint("users")?)
            .with_query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .with_context(Self::context(LABEL_LIST));

        let response = self.pipeline.send(request).await?;
        let envelope: ListResponse<serde_json::Value> = response.json()?;

        Ok(envelope.data.iter().map(normalize_person).collect())
    }

    async fn create(&self, dto: &PersonCreateDto) -> Result<CreatedPerson> {
        let request = ApiRequest::post(self.endpoint("users")?)
            .with_json(serde_json::to_value(dto)?)
            .with_context(Self::context(LABEL_CREATE));

        let response = self.pipeline.send(request).await?;
        response.json_or_default()
    }

    async fn update(&self, id: u64, dto: &PersonUpdateDto) -> Result<UpdatedPerson> {
        let request = ApiRequest::put(self.endpoint(&format!("users/{}", id))?)
            .with_json(serde_json::to_value(dto)?)
            .with_context(Self::context(LABEL_UPDATE));

        let response = self.pipeline.send(request).await?;
        response.json_or_default()
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let request = ApiRequest::delete(self.endpoint(&format!("users/{}", id))?)
            .with_context(Self::context(LABEL_DELETE));

        self.pipeline.send(request).await?;
        Ok(())
    }
}
