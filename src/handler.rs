use async_trait::async_trait;
use tracing::info;

use crate::core::models::{NotificationEvent, ProcessingResult};

/// Business logic invoked for every decoded notification.
///
/// Returning `Ok(None)` means "no verdict" and is reported as a failure.
/// Implementations must be safe to call concurrently when the processor is
/// shared across workers.
#[async_trait]
pub trait NotificationHandler: Send + Sync {
    async fn process_event(
        &self,
        event: &NotificationEvent,
    ) -> anyhow::Result<Option<ProcessingResult>>;
}

/// Acknowledges every notification after logging it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

#[async_trait]
impl NotificationHandler for LoggingHandler {
    async fn process_event(
        &self,
        event: &NotificationEvent,
    ) -> anyhow::Result<Option<ProcessingResult>> {
        info!(
            instance_id = %event.instance_id(),
            state = %event.state(),
            "Acknowledged state change"
        );
        Ok(Some(
            ProcessingResult::success()
                .for_instance(event.instance_id())
                .with_detail("state", event.state().as_str()),
        ))
    }
}
