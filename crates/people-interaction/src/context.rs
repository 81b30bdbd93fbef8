//! Per-request flags read by the interceptor chain.

/// Typed options carried by every [`ApiRequest`](crate::request::ApiRequest).
///
/// All flags default to off. The record is immutable once attached to a
/// request; deriving a request with different flags goes through
/// `ApiRequest::with_context`.
///
/// # Example
///
/// ```
/// use people_interaction::RequestContext;
///
/// let ctx = RequestContext::new().with_api_key().with_log_label("people-load");
/// assert!(ctx.use_api_key());
/// assert!(!ctx.skip_error_log());
/// assert_eq!(ctx.log_label(), Some("people-load"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    use_api_key: bool,
    skip_error_log: bool,
    log_label: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opts the request into credential header injection.
    pub fn with_api_key(mut self) -> Self {
        self.use_api_key = true;
        self
    }

    /// Silences failure reporting for the request.
    pub fn with_skip_error_log(mut self) -> Self {
        self.skip_error_log = true;
        self
    }

    /// Attaches a label appended to failure diagnostics.
    pub fn with_log_label(mut self, label: impl Into<String>) -> Self {
        self.log_label = Some(label.into());
        self
    }

    pub fn use_api_key(&self) -> bool {
        self.use_api_key
    }

    pub fn skip_error_log(&self) -> bool {
        self.skip_error_log
    }

    pub fn log_label(&self) -> Option<&str> {
        self.log_label.as_deref()
    }
}
