//! s3notify - S3 upload notifications over SNS
//!
//! Lambda entry point. Configuration is read once at cold start; every
//! invocation shares the same forwarder.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use s3notify_core::config::{LogFormat, LoggingConfig};
use s3notify_core::types::S3Event;
use s3notify_core::{HandlerError, NotifierConfig};
use s3notify_lambda::{ForwarderSettings, NotificationForwarder, SnsPublisher};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let config = match NotifierConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            error!(code = e.code(), error = %e, "refusing to start");
            return Err(e.into());
        }
    };
    init_tracing(&config.logging);
    if let Err(e) = config.validate() {
        error!(code = e.code(), error = %e, "refusing to start");
        return Err(e.into());
    }

    info!(
        version = s3notify_core::VERSION,
        topic_arn = %config.topic_arn,
        environment = %config.environment_label(),
        record_mode = ?config.record_mode,
        "starting s3notify"
    );

    let publisher = SnsPublisher::from_config(&config.aws).await;
    let forwarder = Arc::new(NotificationForwarder::new(
        publisher,
        ForwarderSettings::from(&config),
    ));

    let func = service_fn(move |event: LambdaEvent<S3Event>| {
        let forwarder = forwarder.clone();

        async move {
            let (payload, context) = event.into_parts();
            info!(
                request_id = %context.request_id,
                records = payload.records.len(),
                "received S3 event"
            );

            match forwarder.handle(&payload).await {
                Ok(message) => Ok(message.to_string()),
                // Already logged by the forwarder
                Err(e) => Err(Error::from(HandlerError::from(e))),
            }
        }
    });

    run(func).await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // CloudWatch stamps every line, so timestamps are left out
    let (text, json) = match logging.format {
        LogFormat::Text => (Some(fmt::layer().with_target(false).without_time()), None),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_target(false).without_time()),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}
