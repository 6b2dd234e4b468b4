//! Notification forwarder
//!
//! Turns an inbound S3 event into topic notifications. Each call is
//! independent: the publisher and settings are shared read-only, and nothing
//! is retried here. Redelivery is left to the invoking runtime.

use crate::publisher::TopicPublisher;
use s3notify_core::config::RecordMode;
use s3notify_core::types::{
    first_record, EnvironmentLabel, MessageTemplate, ObjectRecord, OutboundNotification, S3Event,
    S3EventRecord,
};
use s3notify_core::{Error, NotifierConfig, Result, SUCCESS_MESSAGE};
use tracing::{debug, error, info, warn};

/// Immutable settings resolved at startup
#[derive(Debug, Clone)]
pub struct ForwarderSettings {
    pub topic_arn: String,
    pub environment: EnvironmentLabel,
    pub template: MessageTemplate,
    pub record_mode: RecordMode,
}

impl From<&NotifierConfig> for ForwarderSettings {
    fn from(config: &NotifierConfig) -> Self {
        Self {
            topic_arn: config.topic_arn.clone(),
            environment: config.environment_label(),
            template: MessageTemplate::new(config.include_environment_in_subject),
            record_mode: config.record_mode,
        }
    }
}

pub struct NotificationForwarder<P> {
    publisher: P,
    settings: ForwarderSettings,
}

impl<P: TopicPublisher> NotificationForwarder<P> {
    pub fn new(publisher: P, settings: ForwarderSettings) -> Self {
        Self {
            publisher,
            settings,
        }
    }

    /// Render the notification for a single record
    pub fn render(&self, record: &ObjectRecord) -> OutboundNotification {
        self.settings
            .template
            .render(record, self.settings.environment, &self.settings.topic_arn)
    }

    /// Forward an event and return the confirmation string.
    ///
    /// Any failure is logged here once and returned unchanged.
    #[tracing::instrument(skip_all, fields(records = event.records.len()))]
    pub async fn handle(&self, event: &S3Event) -> Result<&'static str> {
        match self.forward(event).await {
            Ok(published) => {
                debug!(published, "event forwarded");
                Ok(SUCCESS_MESSAGE)
            }
            Err(e) => {
                error!(code = e.code(), error = %e, "Error processing S3 event");
                Err(e)
            }
        }
    }

    async fn forward(&self, event: &S3Event) -> Result<usize> {
        let records: &[S3EventRecord] = match self.settings.record_mode {
            RecordMode::FirstOnly => {
                let first = first_record(event)?;
                if event.records.len() > 1 {
                    warn!(
                        skipped = event.records.len() - 1,
                        "event carries more than one record; only the first is forwarded"
                    );
                }
                std::slice::from_ref(first)
            }
            RecordMode::All => {
                if event.records.is_empty() {
                    return Err(Error::MalformedEvent("event contains no records".into()));
                }
                &event.records
            }
        };

        for record in records {
            self.forward_record(record).await?;
        }

        Ok(records.len())
    }

    async fn forward_record(&self, record: &S3EventRecord) -> Result<()> {
        let record = ObjectRecord::from_record(record)?;
        if !record.is_object_created() {
            debug!(event = ?record.event_name, "forwarding non-create event");
        }

        let notification = self.render(&record);
        let message_id = self.publisher.publish(&notification).await?;

        info!(
            message_id = %message_id,
            bucket = %record.bucket_name,
            key = %record.object_key,
            "SNS notification sent"
        );
        Ok(())
    }
}
