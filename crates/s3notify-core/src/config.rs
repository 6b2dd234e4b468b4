//! Configuration for s3notify
//!
//! Read once from the process environment when the function starts and
//! immutable afterwards.

use crate::types::EnvironmentLabel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Destination topic ARN
    pub topic_arn: String,

    /// Deployment environment name (only `prod` counts as production)
    #[serde(default)]
    pub environment: Option<String>,

    /// Prefix the subject with the environment label
    #[serde(default = "default_true")]
    pub include_environment_in_subject: bool,

    #[serde(default)]
    pub record_mode: RecordMode,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            topic_arn: String::new(),
            environment: None,
            include_environment_in_subject: true,
            record_mode: RecordMode::default(),
            aws: AwsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(arn) = lookup("SNS_TOPIC_ARN") {
            config.topic_arn = arn.trim().to_string();
        }
        config.environment = lookup("ENVIRONMENT");

        if let Some(value) = lookup("SUBJECT_INCLUDE_ENVIRONMENT") {
            config.include_environment_in_subject =
                parse_bool("SUBJECT_INCLUDE_ENVIRONMENT", &value)?;
        }
        if let Some(value) = lookup("NOTIFY_ALL_RECORDS") {
            if parse_bool("NOTIFY_ALL_RECORDS", &value)? {
                config.record_mode = RecordMode::All;
            }
        }

        config.aws.region = lookup("AWS_REGION").filter(|v| !v.is_empty());
        config.aws.endpoint_url = lookup("SNS_ENDPOINT_URL").filter(|v| !v.is_empty());

        let level = lookup("LOG_LEVEL");
        if let Some(level) = level.or_else(|| lookup("AWS_LAMBDA_LOG_LEVEL")) {
            config.logging.level = level.to_lowercase();
        }
        let format = lookup("LOG_FORMAT");
        if let Some(format) = format.or_else(|| lookup("AWS_LAMBDA_LOG_FORMAT")) {
            config.logging.format = LogFormat::parse(&format)?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.topic_arn.trim().is_empty() {
            return Err(Error::Configuration("SNS_TOPIC_ARN must be set".into()));
        }
        Ok(())
    }

    pub fn environment_label(&self) -> EnvironmentLabel {
        EnvironmentLabel::resolve(self.environment.as_deref())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(Error::Configuration(format!(
            "{} must be a boolean, got {:?}",
            name, other
        ))),
    }
}

/// How many records of a multi-record event are forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordMode {
    /// Forward the first record and log the rest as skipped
    #[default]
    FirstOnly,
    /// Forward every record in order
    All,
}

/// AWS client settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region override; the SDK's default chain applies when unset
    pub region: Option<String>,
    /// Endpoint override for SNS-compatible services
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::Configuration(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:uploads";

    #[test]
    fn test_defaults() {
        let vars = [("SNS_TOPIC_ARN", TOPIC)];
        let config = NotifierConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.topic_arn, TOPIC);
        assert!(config.environment.is_none());
        assert!(config.include_environment_in_subject);
        assert_eq!(config.record_mode, RecordMode::FirstOnly);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.environment_label(), EnvironmentLabel::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prod_environment() {
        let config = NotifierConfig::from_lookup(lookup(&[
            ("SNS_TOPIC_ARN", TOPIC),
            ("ENVIRONMENT", "prod"),
        ]))
        .unwrap();

        assert_eq!(config.environment_label(), EnvironmentLabel::Production);
    }

    #[test]
    fn test_missing_topic_is_configuration_error() {
        let config = NotifierConfig::from_lookup(lookup(&[])).unwrap();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));

        let vars = [("SNS_TOPIC_ARN", "   ")];
        let config = NotifierConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_non_arn_topic_identifier_accepted() {
        let vars = [("SNS_TOPIC_ARN", "uploads")];
        let config = NotifierConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.topic_arn, "uploads");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = NotifierConfig::from_lookup(lookup(&[
            ("SNS_TOPIC_ARN", TOPIC),
            ("SUBJECT_INCLUDE_ENVIRONMENT", "no"),
            ("NOTIFY_ALL_RECORDS", "TRUE"),
            ("SNS_ENDPOINT_URL", "http://localhost:4566"),
            ("AWS_LAMBDA_LOG_LEVEL", "DEBUG"),
            ("AWS_LAMBDA_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert!(!config.include_environment_in_subject);
        assert_eq!(config.record_mode, RecordMode::All);
        assert_eq!(
            config.aws.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert!(config.aws.region.is_none());
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_bool() {
        let result = NotifierConfig::from_lookup(lookup(&[
            ("SNS_TOPIC_ARN", TOPIC),
            ("NOTIFY_ALL_RECORDS", "sometimes"),
        ]));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_invalid_log_format() {
        let result = NotifierConfig::from_lookup(lookup(&[
            ("SNS_TOPIC_ARN", TOPIC),
            ("LOG_FORMAT", "xml"),
        ]));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
