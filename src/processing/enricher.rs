use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::core::models::NotificationEvent;

/// Queue attribute carrying the enqueue time in epoch milliseconds.
pub const SENT_TIMESTAMP_ATTRIBUTE: &str = "SentTimestamp";

/// Attach the queue sent-time to a decoded event.
///
/// A missing or unparseable attribute leaves `queue_sent_time` unset.
#[must_use]
pub fn enrich_event(
    mut event: NotificationEvent,
    attributes: &HashMap<String, String>,
) -> NotificationEvent {
    if let Some(raw) = attributes.get(SENT_TIMESTAMP_ATTRIBUTE) {
        match parse_epoch_millis(raw) {
            Some(sent_time) => event.queue_sent_time = Some(sent_time),
            None => debug!(
                "Ignoring unparseable {} attribute '{}' for instance {}",
                SENT_TIMESTAMP_ATTRIBUTE,
                raw,
                event.instance_id()
            ),
        }
    }
    event
}

fn parse_epoch_millis(raw: &str) -> Option<DateTime<Utc>> {
    let millis = raw.parse::<i64>().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}
