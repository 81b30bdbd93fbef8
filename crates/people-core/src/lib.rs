pub mod config;
pub mod error;
pub mod person;

// Re-export common error type
pub use error::{DirectoryError, Result};
