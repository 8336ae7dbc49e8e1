use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// A single message as handed over by the queue transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    pub message_id: Option<String>,
    pub body: String,
    pub attributes: HashMap<String, String>,
}

impl RawMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            message_id: None,
            body: body.into(),
            attributes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }
}

/// EC2 instance lifecycle states as they appear in state-change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceState {
    Pending,
    Running,
    ShuttingDown,
    Stopping,
    Stopped,
    Terminated,
}

impl InstanceState {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceState::Pending => "pending",
            InstanceState::Running => "running",
            InstanceState::ShuttingDown => "shutting-down",
            InstanceState::Stopping => "stopping",
            InstanceState::Stopped => "stopped",
            InstanceState::Terminated => "terminated",
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEventDetail")]
pub struct EventDetail {
    #[serde(rename = "instanceId")]
    pub instance_id: String,
    pub state: InstanceState,
}

// Bodies may carry the camelCase key, the native EC2 key, or both.
#[derive(Deserialize)]
struct WireEventDetail {
    #[serde(rename = "instanceId")]
    instance_id: Option<String>,
    #[serde(rename = "instance-id")]
    native_instance_id: Option<String>,
    state: InstanceState,
}

impl TryFrom<WireEventDetail> for EventDetail {
    type Error = String;

    fn try_from(wire: WireEventDetail) -> Result<Self, Self::Error> {
        let instance_id = wire
            .instance_id
            .or(wire.native_instance_id)
            .ok_or_else(|| "missing field `instanceId`".to_string())?;
        Ok(Self {
            instance_id,
            state: wire.state,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTime {
    EpochMillis(i64),
    Text(String),
}

/// Accepts RFC 3339, ISO-8601 with a `+hhmm` offset or no offset (read as
/// UTC), and integer epoch milliseconds.
fn deserialize_event_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match WireTime::deserialize(deserializer)? {
        WireTime::EpochMillis(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| de::Error::custom(format!("epoch millis out of range: {millis}"))),
        WireTime::Text(text) => parse_iso_time(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid event time: '{text}'"))),
    }
}

fn parse_iso_time(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// An EC2 instance state-change notification decoded from a queue message body.
///
/// Only `detail` and `time` are required; the remaining envelope fields are
/// carried through to the audit record when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        rename = "detail-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detail_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    pub detail: EventDetail,
    #[serde(rename = "time", deserialize_with = "deserialize_event_time")]
    pub event_time: DateTime<Utc>,
    // Only ever set from the queue's SentTimestamp attribute, never from the body.
    #[serde(
        rename = "queueSentTime",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub queue_sent_time: Option<DateTime<Utc>>,
}

impl NotificationEvent {
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.detail.instance_id
    }

    #[must_use]
    pub fn state(&self) -> InstanceState {
        self.detail.state
    }
}

/// A handler's verdict on one notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub succeeded: bool,
    #[serde(rename = "instanceId", default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

impl ProcessingResult {
    #[must_use]
    pub fn success() -> Self {
        Self {
            succeeded: true,
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_instance(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}
