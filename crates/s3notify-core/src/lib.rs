//! s3notify Core Library
//!
//! Event and notification types, errors, and configuration shared by the
//! S3 upload notifier.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

#[cfg(test)]
mod fixtures;

pub use config::NotifierConfig;
pub use error::{Error, HandlerError, Result};

/// s3notify version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value returned to the runtime after an event has been forwarded
pub const SUCCESS_MESSAGE: &str = "S3 event processed successfully";

/// Environment name treated as production
pub const PRODUCTION_MARKER: &str = "prod";

/// Maximum SNS subject length
pub const MAX_SUBJECT_LENGTH: usize = 100;
