//! Failure observer: reports failed requests to an [`ErrorSink`].

use crate::error_sink::ErrorSink;
use crate::pipeline::{Interceptor, Next};
use crate::request::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use people_core::{DirectoryError, Result};
use reqwest::Method;
use std::sync::Arc;

/// Reports every failed request once, then returns the failure unchanged.
///
/// - never retries and never swallows the error,
/// - silenced per request with `RequestContext::with_skip_error_log`,
/// - `RequestContext::with_log_label` appends ` (label)` to the diagnostic.
#[derive(Clone)]
pub struct ErrorLogInterceptor {
    sink: Arc<dyn ErrorSink>,
}

impl ErrorLogInterceptor {
    pub fn new(sink: Arc<dyn ErrorSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Interceptor for ErrorLogInterceptor {
    async fn intercept(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse> {
        let method = request.method().clone();
        let url = request.url_with_params().to_string();
        let context = request.context().clone();

        let result = next.run(request).await;

        if let Err(err) = &result
            && !context.skip_error_log()
        {
            self.sink
                .handle_error(&describe_failure(&method, &url, context.log_label(), err));
        }

        result
    }
}

/// Builds the one-line diagnostic for a failed request.
///
/// ```
/// use people_core::DirectoryError;
/// use people_interaction::interceptors::describe_failure;
/// use reqwest::Method;
///
/// let err = DirectoryError::status(500, "Internal Server Error", "");
/// assert_eq!(
///     describe_failure(&Method::GET, "https://reqres.in/api/users?page=1", Some("people-list"), &err),
///     "HTTP 500 Internal Server Error: [GET] https://reqres.in/api/users?page=1 (people-list)"
/// );
/// ```
pub fn describe_failure(
    method: &Method,
    url: &str,
    label: Option<&str>,
    err: &DirectoryError,
) -> String {
    let meta = match label.filter(|l| !l.is_empty()) {
        Some(label) => format!("[{}] {} ({})", method, url, label),
        None => format!("[{}] {}", method, url),
    };

    match (err.status_code(), err.status_text()) {
        (Some(status), Some(text)) if !text.trim().is_empty() => {
            format!("HTTP {} {}: {}", status, text.trim(), meta)
        }
        (Some(status), _) => format!("HTTP {}: {}", status, meta),
        (None, _) => format!("HTTP network error: {}", meta),
    }
}
