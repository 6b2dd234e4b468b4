//! Error types for s3notify

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Inbound event errors
    #[error("Malformed S3 event: {0}")]
    MalformedEvent(String),

    // Outbound errors
    #[error("Failed to publish to topic {topic_arn}: {message}")]
    Publish { topic_arn: String, message: String },

    // Startup errors
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl Error {
    pub fn publish(topic_arn: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Publish {
            topic_arn: topic_arn.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::MalformedEvent(_) => "MalformedEvent",
            Error::Publish { .. } => "PublishFailed",
            Error::Configuration(_) => "InvalidConfiguration",
        }
    }
}

/// The single failure surfaced to the invoking runtime.
///
/// The specific [`Error`] is kept as the source so the runtime's error report
/// still carries the cause.
#[derive(Error, Debug)]
#[error("Error processing S3 event")]
pub struct HandlerError {
    #[source]
    source: Error,
}

impl From<Error> for HandlerError {
    fn from(source: Error) -> Self {
        HandlerError { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::MalformedEvent("x".into()).code(), "MalformedEvent");
        assert_eq!(Error::publish("arn", "denied").code(), "PublishFailed");
        assert_eq!(
            Error::Configuration("x".into()).code(),
            "InvalidConfiguration"
        );
    }

    #[test]
    fn test_handler_error_keeps_cause() {
        let err = HandlerError::from(Error::publish("arn:aws:sns:us-east-1:1:t", "throttled"));

        assert_eq!(err.to_string(), "Error processing S3 event");
        let source = err.source().expect("source");
        assert!(source.to_string().contains("throttled"));
        assert!(matches!(
            source.downcast_ref::<Error>(),
            Some(Error::Publish { .. })
        ));
    }
}
