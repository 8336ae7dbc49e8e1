use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::info;

use super::decoder::decode_event;
use super::enricher::enrich_event;
use crate::core::models::{ProcessingResult, RawMessage};
use crate::errors::NotificationError;
use crate::handler::NotificationHandler;
use crate::sinks::{DiagnosticSink, EventSink, ResultSink, TracingSink};

/// What happened to a message that made it past decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The handler returned a verdict.
    Completed(ProcessingResult),
    /// The handler returned without a verdict.
    NoResult,
}

impl DispatchOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        match self {
            DispatchOutcome::Completed(result) => result.succeeded,
            DispatchOutcome::NoResult => false,
        }
    }
}

/// Decodes queue messages, enriches them with queue metadata and hands them
/// to a [`NotificationHandler`].
///
/// Holds no per-message state, so one instance can be shared across workers.
#[derive(Clone)]
pub struct MessageProcessor {
    handler: Arc<dyn NotificationHandler>,
    event_sink: Arc<dyn EventSink>,
    result_sink: Arc<dyn ResultSink>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for MessageProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageProcessor").finish_non_exhaustive()
    }
}

impl MessageProcessor {
    #[must_use]
    pub fn builder() -> MessageProcessorBuilder {
        MessageProcessorBuilder::default()
    }

    /// Process one message and report whether the handler succeeded.
    ///
    /// Never fails: decode errors, handler errors and handler panics are
    /// reported to the diagnostic sink and turned into `false`.
    pub async fn process(&self, message: &RawMessage) -> bool {
        match self.dispatch(message).await {
            Ok(outcome) => outcome.succeeded(),
            Err(e) => {
                self.diagnostics.warn(&format!(
                    "Error processing message{}: {}",
                    message
                        .message_id
                        .as_deref()
                        .map(|id| format!(" {id}"))
                        .unwrap_or_default(),
                    e.root_cause_message()
                ));
                false
            }
        }
    }

    /// Decode, enrich and dispatch one message, surfacing every failure.
    pub async fn dispatch(&self, message: &RawMessage) -> Result<DispatchOutcome, NotificationError> {
        let event = enrich_event(decode_event(&message.body)?, &message.attributes);

        info!(
            "Received event {} with state {} created at {}",
            event.instance_id(),
            event.state(),
            event.event_time.to_rfc3339()
        );

        let event_json = serde_json::to_string(&event).map_err(|source| {
            NotificationError::SerializationError {
                what: "notification event",
                source,
            }
        })?;
        self.event_sink.record_event(&event_json);

        let handled = AssertUnwindSafe(self.handler.process_event(&event))
            .catch_unwind()
            .await
            .map_err(|payload| {
                NotificationError::HandlerError(anyhow::anyhow!(
                    "handler panicked: {}",
                    panic_message(payload.as_ref())
                ))
            })?
            .map_err(NotificationError::HandlerError)?;

        let Some(result) = handled else {
            return Ok(DispatchOutcome::NoResult);
        };

        let result_json = serde_json::to_string(&result).map_err(|source| {
            NotificationError::SerializationError {
                what: "processing result",
                source,
            }
        })?;
        self.result_sink.record_result(&result_json);

        Ok(DispatchOutcome::Completed(result))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}

/// Builder for [`MessageProcessor`]. Sinks default to [`TracingSink`]; the
/// handler is mandatory.
#[derive(Default)]
pub struct MessageProcessorBuilder {
    handler: Option<Arc<dyn NotificationHandler>>,
    event_sink: Option<Arc<dyn EventSink>>,
    result_sink: Option<Arc<dyn ResultSink>>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl MessageProcessorBuilder {
    #[must_use]
    pub fn handler(mut self, handler: Arc<dyn NotificationHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    #[must_use]
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    #[must_use]
    pub fn result_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.result_sink = Some(sink);
        self
    }

    #[must_use]
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// # Errors
    ///
    /// Returns [`NotificationError::ConfigurationError`] when no handler was set.
    pub fn build(self) -> Result<MessageProcessor, NotificationError> {
        let handler = self.handler.ok_or_else(|| {
            NotificationError::ConfigurationError("a notification handler is required".to_string())
        })?;

        Ok(MessageProcessor {
            handler,
            event_sink: self.event_sink.unwrap_or_else(|| Arc::new(TracingSink)),
            result_sink: self.result_sink.unwrap_or_else(|| Arc::new(TracingSink)),
            diagnostics: self.diagnostics.unwrap_or_else(|| Arc::new(TracingSink)),
        })
    }
}
