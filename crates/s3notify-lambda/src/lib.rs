//! s3notify Lambda
//!
//! Forwards S3 object-created notifications to an SNS topic.

pub mod forwarder;
pub mod publisher;

pub use forwarder::{ForwarderSettings, NotificationForwarder};
pub use publisher::{SnsPublisher, TopicPublisher};
