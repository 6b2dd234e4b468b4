//! Inbound S3 event handling
//!
//! The Lambda payload itself is `aws_lambda_events`' [`S3Event`]; this module
//! pulls out the handful of fields a notification needs.

use crate::{utils, Error, Result};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

pub use aws_lambda_events::event::s3::{S3Event, S3EventRecord};

/// The record forwarded when only one record is handled.
pub fn first_record(event: &S3Event) -> Result<&S3EventRecord> {
    event
        .records
        .first()
        .ok_or_else(|| Error::MalformedEvent("event contains no records".into()))
}

/// The fields of one S3 record that end up in a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub bucket_name: String,
    /// Object key exactly as delivered (URL-encoded by S3)
    pub object_key: String,
    pub size_bytes: u64,
    /// ISO-8601 event time
    pub event_time: String,
    pub event_name: Option<String>,
}

impl ObjectRecord {
    pub fn from_record(record: &S3EventRecord) -> Result<Self> {
        let bucket_name = record
            .s3
            .bucket
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::MalformedEvent("record has no bucket name".into()))?;

        let object_key = record
            .s3
            .object
            .key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::MalformedEvent("record has no object key".into()))?;

        let size_bytes = record
            .s3
            .object
            .size
            .and_then(|size| u64::try_from(size).ok())
            .unwrap_or(0);

        let event_time = &record.event_time;

        Ok(Self {
            bucket_name,
            object_key,
            size_bytes,
            event_time: event_time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            event_name: record.event_name.clone(),
        })
    }

    /// Object key with the notification's URL-encoding removed
    pub fn decoded_key(&self) -> String {
        utils::decode_s3_key(&self.object_key)
    }

    pub fn is_object_created(&self) -> bool {
        self.event_name.as_deref().is_some_and(|name| {
            name.strip_prefix("s3:")
                .unwrap_or(name)
                .starts_with("ObjectCreated:")
        })
    }
}
