//! Ordered interceptor chain in front of a [`Transport`].
//!
//! Interceptors run in the order they were added. Each one receives the
//! request plus a [`Next`] handle for the rest of the chain, so it can
//! rewrite the request before forwarding it and observe the result after.
//!
//! ```text
//! request ─▶ ApiKeyInterceptor ─▶ ErrorLogInterceptor ─▶ Transport
//! result  ◀─────────────────────────────(logs failures)◀──┘
//! ```

use crate::error_sink::ErrorSink;
use crate::interceptors::{ApiKeyInterceptor, ErrorLogInterceptor};
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::Transport;
use async_trait::async_trait;
use people_core::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A stage of the request pipeline.
#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn intercept(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse>;
}

/// The remainder of the chain after the current interceptor.
pub struct Next<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Forwards `request` to the next interceptor, or to the transport at the end.
    pub fn run(self, request: ApiRequest) -> BoxFuture<'a, Result<ApiResponse>> {
        match self.interceptors.split_first() {
            Some((head, rest)) => {
                let next = Next {
                    interceptors: rest,
                    transport: self.transport,
                };
                head.intercept(request, next)
            }
            None => self.transport.send(request),
        }
    }
}

/// Interceptors plus the transport they wrap.
#[derive(Clone)]
pub struct HttpPipeline {
    interceptors: Vec<Arc<dyn Interceptor>>,
    transport: Arc<dyn Transport>,
}

impl HttpPipeline {
    pub fn builder(transport: Arc<dyn Transport>) -> HttpPipelineBuilder {
        HttpPipelineBuilder {
            interceptors: Vec::new(),
            transport,
        }
    }

    /// The standard chain: credential injection first, then failure logging.
    ///
    /// Diagnostics therefore describe the request as it went out, credential
    /// header included.
    pub fn standard(
        transport: Arc<dyn Transport>,
        api_key: ApiKeyInterceptor,
        sink: Arc<dyn ErrorSink>,
    ) -> Self {
        Self::builder(transport)
            .with(api_key)
            .with(ErrorLogInterceptor::new(sink))
            .build()
    }

    /// Sends `request` through every interceptor and the transport.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        tracing::debug!(method = %request.method(), url = %request.url(), "dispatching request");
        Next {
            interceptors: &self.interceptors,
            transport: self.transport.as_ref(),
        }
        .run(request)
        .await
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

/// Builder for [`HttpPipeline`].
pub struct HttpPipelineBuilder {
    interceptors: Vec<Arc<dyn Interceptor>>,
    transport: Arc<dyn Transport>,
}

impl HttpPipelineBuilder {
    /// Appends an interceptor to the end of the chain.
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Appends an already shared interceptor.
    pub fn with_arc(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> HttpPipeline {
        HttpPipeline {
            interceptors: self.interceptors,
            transport: self.transport,
        }
    }
}
