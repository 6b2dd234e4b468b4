//! Outbound notification types
//!
//! A rendered notification is derived from one [`ObjectRecord`] and the
//! static configuration; it is published once and never stored.

use super::ObjectRecord;
use crate::{utils, MAX_SUBJECT_LENGTH, PRODUCTION_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Environment label woven into notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentLabel {
    Production,
    Development,
}

impl EnvironmentLabel {
    /// Only the exact production marker counts; everything else, including
    /// an unset value, is development.
    pub fn resolve(environment: Option<&str>) -> Self {
        match environment {
            Some(PRODUCTION_MARKER) => EnvironmentLabel::Production,
            _ => EnvironmentLabel::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentLabel::Production => "production",
            EnvironmentLabel::Development => "development",
        }
    }
}

impl std::fmt::Display for EnvironmentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message ready to be published to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundNotification {
    pub topic_arn: String,
    pub subject: String,
    pub body: String,
}

/// Renders upload notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    /// Put the environment label in the subject and body
    pub include_environment: bool,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            include_environment: true,
        }
    }
}

impl MessageTemplate {
    pub fn new(include_environment: bool) -> Self {
        Self {
            include_environment,
        }
    }

    pub fn subject(&self, record: &ObjectRecord, environment: EnvironmentLabel) -> String {
        let subject = if self.include_environment {
            format!(
                "[{}] New upload to S3 bucket {}",
                environment, record.bucket_name
            )
        } else {
            format!("New upload to S3 bucket {}", record.bucket_name)
        };

        utils::sanitize_subject(&subject, MAX_SUBJECT_LENGTH).into_owned()
    }

    pub fn body(&self, record: &ObjectRecord, environment: EnvironmentLabel) -> String {
        let mut body = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(body, "A new file has been uploaded to your S3 bucket.");
        let _ = writeln!(body);
        let _ = writeln!(body, "Details:");
        let _ = writeln!(body, "Bucket: {}", record.bucket_name);
        let _ = writeln!(body, "File: {}", record.object_key);

        let decoded = record.decoded_key();
        if decoded != record.object_key {
            let _ = writeln!(body, "Decoded key: {}", decoded);
        }

        let _ = writeln!(body, "Size: {} bytes", record.size_bytes);
        let _ = writeln!(body, "Upload Time: {}", record.event_time);
        if self.include_environment {
            let _ = writeln!(body, "Environment: {}", environment);
        }
        body
    }

    pub fn render(
        &self,
        record: &ObjectRecord,
        environment: EnvironmentLabel,
        topic_arn: &str,
    ) -> OutboundNotification {
        OutboundNotification {
            topic_arn: topic_arn.to_string(),
            subject: self.subject(record, environment),
            body: self.body(record, environment),
        }
    }
}
