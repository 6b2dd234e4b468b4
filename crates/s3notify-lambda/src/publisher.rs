//! Topic publishers

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;
use s3notify_core::config::AwsConfig;
use s3notify_core::types::OutboundNotification;
use s3notify_core::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Anything that can deliver a rendered notification to its topic
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publish the notification, returning the service's message id
    async fn publish(&self, notification: &OutboundNotification) -> Result<String>;
}

#[async_trait]
impl<P: TopicPublisher + ?Sized> TopicPublisher for Arc<P> {
    async fn publish(&self, notification: &OutboundNotification) -> Result<String> {
        (**self).publish(notification).await
    }
}

/// SNS-backed publisher
#[derive(Clone, Debug)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential and region chain,
    /// applying any overrides.
    pub async fn from_config(config: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let shared_config = loader.load().await;

        let mut builder = aws_sdk_sns::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint_url {
            debug!(endpoint = %endpoint, "using SNS endpoint override");
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(Client::from_conf(builder.build()))
    }
}

#[async_trait]
impl TopicPublisher for SnsPublisher {
    async fn publish(&self, notification: &OutboundNotification) -> Result<String> {
        let output = self
            .client
            .publish()
            .topic_arn(&notification.topic_arn)
            .subject(&notification.subject)
            .message(&notification.body)
            .send()
            .await
            .map_err(|e| {
                Error::publish(&notification.topic_arn, DisplayErrorContext(&e).to_string())
            })?;

        Ok(output.message_id().unwrap_or_default().to_string())
    }
}
