use crate::core::models::NotificationEvent;
use crate::errors::NotificationError;

/// Decode a queue message body into a [`NotificationEvent`].
///
/// Fails with [`NotificationError::DecodeError`] when the body is not valid
/// JSON or lacks `detail.instanceId`, `detail.state` or `time`.
pub fn decode_event(body: &str) -> Result<NotificationEvent, NotificationError> {
    Ok(serde_json::from_str(body)?)
}
