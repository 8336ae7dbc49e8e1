use aws_sdk_sqs::types::Message;

use crate::core::models::RawMessage;

/// Convert a message received through the SQS SDK.
///
/// System attributes are keyed by their wire names (`SentTimestamp`, ...).
/// A message without a body becomes an empty body, which fails decoding.
#[must_use]
pub fn raw_message_from_sdk(message: &Message) -> RawMessage {
    let attributes = message
        .attributes()
        .map(|attrs| {
            attrs
                .iter()
                .map(|(name, value)| (name.as_str().to_string(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    RawMessage {
        message_id: message.message_id().map(str::to_string),
        body: message.body().unwrap_or_default().to_string(),
        attributes,
    }
}

impl From<&Message> for RawMessage {
    fn from(message: &Message) -> Self {
        raw_message_from_sdk(message)
    }
}
