//! EC2 instance-notification consumer.
//!
//! Turns a single queue message carrying an EC2 instance state-change
//! notification into a typed event, stamps it with the time the queue
//! received it, and hands it to a pluggable [`handler::NotificationHandler`].
//! The outcome is a plain `bool` so the surrounding transport can decide
//! whether to delete, keep or redrive the message.
//!
//! # Architecture
//!
//! - [`processing::decoder`] parses the JSON body
//! - [`processing::enricher`] applies the `SentTimestamp` attribute
//! - [`processing::MessageProcessor`] dispatches to the handler and feeds the
//!   audit [`sinks`]
//! - [`transport`] adapts SQS SDK messages and Lambda SQS events
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ec2_notify::core::models::RawMessage;
//! use ec2_notify::handler::LoggingHandler;
//! use ec2_notify::processing::MessageProcessor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     ec2_notify::setup_logging();
//!
//!     let processor = MessageProcessor::builder()
//!         .handler(Arc::new(LoggingHandler))
//!         .build()?;
//!
//!     let message = RawMessage::new(
//!         r#"{"detail":{"instanceId":"i-123","state":"running"},"time":"2017-01-01T00:00:00Z"}"#,
//!     )
//!     .with_attribute("SentTimestamp", "1483228800000");
//!
//!     assert!(processor.process(&message).await);
//!     Ok(())
//! }
//! ```
pub mod core;
pub mod errors;
pub mod handler;
pub mod processing;
pub mod sinks;
pub mod transport;

pub use errors::NotificationError;

use crate::core::config::LogFormat;
use tracing_subscriber::EnvFilter;

/// Configure structured JSON logging suitable for `CloudWatch` Logs.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`.
pub fn setup_logging() {
    setup_logging_with_format(LogFormat::Json);
}

/// Configure logging with an explicit output format.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn setup_logging_with_format(format: LogFormat) {
    use tracing_subscriber::prelude::*;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        tracing::debug!("Logging already initialized: {}", e);
    }
}
