//! Test events in the shape S3 delivers them

use crate::types::S3Event;
use serde_json::{json, Value};

pub fn record(bucket: &str, key: &str, size: i64) -> Value {
    record_at(bucket, key, size, "2024-01-15T10:30:00Z")
}

pub fn record_at(bucket: &str, key: &str, size: i64, event_time: &str) -> Value {
    json!({
        "eventVersion": "2.1",
        "eventSource": "aws:s3",
        "awsRegion": "us-east-1",
        "eventTime": event_time,
        "eventName": "ObjectCreated:Put",
        "userIdentity": { "principalId": "EXAMPLE" },
        "requestParameters": { "sourceIPAddress": "127.0.0.1" },
        "responseElements": {},
        "s3": {
            "s3SchemaVersion": "1.0",
            "configurationId": "uploads",
            "bucket": {
                "name": bucket,
                "ownerIdentity": { "principalId": "EXAMPLE" },
                "arn": format!("arn:aws:s3:::{}", bucket)
            },
            "object": {
                "key": key,
                "size": size,
                "sequencer": "0055AED6DCD90281E5"
            }
        }
    })
}

pub fn event(records: Vec<Value>) -> S3Event {
    serde_json::from_value(json!({ "Records": records })).unwrap()
}
