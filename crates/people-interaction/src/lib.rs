//! HTTP side of the people directory client.
//!
//! - [`RequestContext`]: per-request flags (credential opt-in, log suppression, log label)
//! - [`HttpPipeline`]: ordered interceptor chain in front of a [`Transport`]
//! - [`interceptors`]: credential injection and failure reporting
//! - [`PeopleApiClient`]: the `/users` REST client implementing `PeopleRepository`

pub mod context;
pub mod error_sink;
pub mod interceptors;
pub mod people_api_client;
pub mod pipeline;
pub mod request;
pub mod transport;

pub use context::RequestContext;
pub use error_sink::{ErrorReport, ErrorSink, MemoryErrorSink, TracingErrorSink};
pub use people_api_client::PeopleApiClient;
pub use pipeline::{HttpPipeline, HttpPipelineBuilder, Interceptor, Next};
pub use request::{ApiRequest, ApiResponse};
pub use transport::{ReqwestTransport, Transport};
