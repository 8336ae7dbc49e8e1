use std::env;
use std::str::FromStr;

use crate::errors::NotificationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            other => Err(NotificationError::ConfigurationError(format!(
                "LOG_FORMAT: unsupported value '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_format: LogFormat,
    pub report_batch_item_failures: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            report_batch_item_failures: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, NotificationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotificationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };
        let report_batch_item_failures = match lookup("REPORT_BATCH_ITEM_FAILURES") {
            Some(value) => parse_bool("REPORT_BATCH_ITEM_FAILURES", &value)?,
            None => defaults.report_batch_item_failures,
        };

        Ok(Self {
            log_format,
            report_batch_item_failures,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, NotificationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(NotificationError::ConfigurationError(format!(
            "{key}: expected a boolean, got '{other}'"
        ))),
    }
}
