//! Built-in interceptors.

mod api_key;
mod error_log;

pub use api_key::ApiKeyInterceptor;
pub use error_log::{ErrorLogInterceptor, describe_failure};
