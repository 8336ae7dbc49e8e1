use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use ec2_notify::NotificationError;
use ec2_notify::core::models::InstanceState;
use ec2_notify::processing::decoder::decode_event;
use ec2_notify::processing::enricher::{SENT_TIMESTAMP_ATTRIBUTE, enrich_event};

const FULL_BODY: &str = r#"{
    "version": "0",
    "id": "7bf73129-1428-4cd3-a780-95db273d1602",
    "detail-type": "EC2 Instance State-change Notification",
    "source": "aws.ec2",
    "account": "123456789012",
    "time": "2015-11-11T21:29:54Z",
    "region": "us-east-1",
    "resources": ["arn:aws:ec2:us-east-1:123456789012:instance/i-abcd1111"],
    "detail": {"instance-id": "i-abcd1111", "state": "shutting-down"}
}"#;

fn attributes(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_decode_minimal_body() {
    let event = decode_event(
        r#"{"detail":{"instanceId":"i-123","state":"running"},"time":"2017-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    assert_eq!(event.instance_id(), "i-123");
    assert_eq!(event.state(), InstanceState::Running);
    assert_eq!(
        event.event_time,
        Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap()
    );
    assert!(event.queue_sent_time.is_none());
    assert!(event.id.is_none());
}

#[test]
fn test_decode_native_ec2_envelope() {
    let event = decode_event(FULL_BODY).unwrap();

    assert_eq!(event.instance_id(), "i-abcd1111");
    assert_eq!(event.state(), InstanceState::ShuttingDown);
    assert_eq!(event.source.as_deref(), Some("aws.ec2"));
    assert_eq!(
        event.detail_type.as_deref(),
        Some("EC2 Instance State-change Notification")
    );
    assert_eq!(event.region.as_deref(), Some("us-east-1"));
    assert_eq!(event.resources.len(), 1);
}

#[test]
fn test_body_cannot_set_queue_sent_time() {
    let event = decode_event(
        r#"{"detail":{"instanceId":"i-1","state":"stopped"},"time":"2017-01-01T00:00:00Z","queueSentTime":"2017-01-01T00:00:00Z"}"#,
    )
    .unwrap();
    assert!(event.queue_sent_time.is_none());
}

#[test]
fn test_decode_accepts_iso_and_epoch_event_times() {
    let expected = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    for time in [
        r#""2017-01-01T00:00:00Z""#,
        r#""2017-01-01T00:00:00.000+0000""#,
        r#""2017-01-01T01:00:00+01:00""#,
        r#""2017-01-01T00:00:00""#,
        r#""2017-01-01T00:00:00.000""#,
        "1483228800000",
    ] {
        let body = format!(
            r#"{{"detail":{{"instanceId":"i-1","state":"pending"}},"time":{time}}}"#
        );
        let event = decode_event(&body).unwrap_or_else(|e| panic!("{time}: {e}"));
        assert_eq!(event.event_time, expected, "{time}");
    }
}

#[test]
fn test_decode_rejects_unusable_event_times() {
    for time in [r#""2017-01-01""#, r#""tomorrow""#, "true", "null"] {
        let body = format!(
            r#"{{"detail":{{"instanceId":"i-1","state":"pending"}},"time":{time}}}"#
        );
        assert!(decode_event(&body).is_err(), "{time}");
    }
}

#[test]
fn test_decode_prefers_camel_case_instance_id() {
    let event = decode_event(
        r#"{"detail":{"instance-id":"i-native","instanceId":"i-camel","state":"stopping"},"time":"2017-01-01T00:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(event.instance_id(), "i-camel");

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["detail"]["instanceId"], "i-camel");
    assert!(json["detail"].get("instance-id").is_none());
}

#[test]
fn test_decode_errors() {
    for body in ["", "{}", r#"{"detail":{"instanceId":"i-1","state":"running"}}"#] {
        let err = decode_event(body).unwrap_err();
        assert!(matches!(err, NotificationError::DecodeError(_)), "{body}");
    }
}

#[test]
fn test_enrich_sets_sent_time() {
    let event = decode_event(FULL_BODY).unwrap();
    let enriched = enrich_event(event, &attributes(&[(SENT_TIMESTAMP_ATTRIBUTE, "1483228800000")]));

    assert_eq!(
        enriched.queue_sent_time,
        Some(Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap())
    );
    // The event's own timestamp is untouched.
    assert_eq!(
        enriched.event_time,
        Utc.with_ymd_and_hms(2015, 11, 11, 21, 29, 54).unwrap()
    );
}

#[test]
fn test_enrich_ignores_missing_or_invalid_attribute() {
    for attrs in [
        attributes(&[]),
        attributes(&[("ApproximateReceiveCount", "1")]),
        attributes(&[(SENT_TIMESTAMP_ATTRIBUTE, "")]),
        attributes(&[(SENT_TIMESTAMP_ATTRIBUTE, "soon")]),
        attributes(&[(SENT_TIMESTAMP_ATTRIBUTE, "1483228800000.5")]),
        attributes(&[(SENT_TIMESTAMP_ATTRIBUTE, " 1483228800000 ")]),
    ] {
        let enriched = enrich_event(decode_event(FULL_BODY).unwrap(), &attrs);
        assert!(enriched.queue_sent_time.is_none(), "{attrs:?}");
    }
}

#[test]
fn test_serialized_event_uses_wire_names() {
    let event = enrich_event(
        decode_event(FULL_BODY).unwrap(),
        &attributes(&[(SENT_TIMESTAMP_ATTRIBUTE, "1447277394000")]),
    );
    let json: serde_json::Value = serde_json::to_value(&event).unwrap();

    assert_eq!(json["detail"]["instanceId"], "i-abcd1111");
    assert_eq!(json["detail"]["state"], "shutting-down");
    assert_eq!(json["time"], "2015-11-11T21:29:54Z");
    assert_eq!(json["queueSentTime"], "2015-11-11T21:29:54Z");
    assert_eq!(json["detail-type"], "EC2 Instance State-change Notification");
}
