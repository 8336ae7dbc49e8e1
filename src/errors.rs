use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Failed to decode notification: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Notification handler failed: {0}")]
    HandlerError(#[source] anyhow::Error),

    #[error("Failed to serialize {what}: {source}")]
    SerializationError {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{failed} of {total} SQS records failed processing")]
    BatchError { failed: usize, total: usize },
}

impl NotificationError {
    /// Best-effort description of the innermost cause, e.g.
    /// `HandlerError: connection refused`.
    #[must_use]
    pub fn root_cause_message(&self) -> String {
        match self {
            NotificationError::HandlerError(inner) => {
                format!("HandlerError: {}", inner.root_cause())
            }
            NotificationError::SerializationError { source, .. } => {
                format!("SerializationError: {source}")
            }
            NotificationError::DecodeError(inner) => format!("DecodeError: {inner}"),
            NotificationError::ConfigurationError(msg) => format!("ConfigurationError: {msg}"),
            NotificationError::BatchError { .. } => format!("BatchError: {self}"),
        }
    }
}

