//! Observability sinks fed by the message processor.

use tracing::{info, warn};

/// Receives the serialized, enriched event for every decoded message.
pub trait EventSink: Send + Sync {
    fn record_event(&self, event_json: &str);
}

/// Receives the serialized result whenever the handler returned one.
pub trait ResultSink: Send + Sync {
    fn record_result(&self, result_json: &str);
}

/// Receives human-readable warnings about failed messages.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: &str);
}

pub const EVENT_LOG_TARGET: &str = "notification_event_log";
pub const PROCESSING_LOG_TARGET: &str = "message_processing_log";

/// Default sink that writes every record through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record_event(&self, event_json: &str) {
        info!(target: EVENT_LOG_TARGET, "{}", event_json);
    }
}

impl ResultSink for TracingSink {
    fn record_result(&self, result_json: &str) {
        info!(target: PROCESSING_LOG_TARGET, "{}", result_json);
    }
}

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}
