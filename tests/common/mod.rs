#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ec2_notify::core::models::{NotificationEvent, ProcessingResult};
use ec2_notify::handler::NotificationHandler;
use ec2_notify::processing::MessageProcessor;
use ec2_notify::sinks::{DiagnosticSink, EventSink, ResultSink};

pub const RUNNING_BODY: &str =
    r#"{"detail":{"instanceId":"i-123","state":"running"},"time":"2017-01-01T00:00:00Z"}"#;

/// Collects everything the processor emits so tests can assert on it.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<String>>,
    pub results: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn results(&self) -> Vec<String> {
        self.results.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn record_event(&self, event_json: &str) {
        self.events.lock().unwrap().push(event_json.to_string());
    }
}

impl ResultSink for RecordingSink {
    fn record_result(&self, result_json: &str) {
        self.results.lock().unwrap().push(result_json.to_string());
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

pub enum Behavior {
    Succeed,
    Fail,
    NoResult,
    Error(&'static str),
    Panic,
}

/// Handler with a fixed behavior that remembers the events it saw.
pub struct FakeHandler {
    behavior: Behavior,
    pub seen: Mutex<Vec<NotificationEvent>>,
}

impl FakeHandler {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<NotificationEvent> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationHandler for FakeHandler {
    async fn process_event(
        &self,
        event: &NotificationEvent,
    ) -> anyhow::Result<Option<ProcessingResult>> {
        self.seen.lock().unwrap().push(event.clone());
        match self.behavior {
            Behavior::Succeed => Ok(Some(
                ProcessingResult::success().for_instance(event.instance_id()),
            )),
            Behavior::Fail => Ok(Some(ProcessingResult::failure("rejected"))),
            Behavior::NoResult => Ok(None),
            Behavior::Error(msg) => {
                Err(anyhow::anyhow!(msg).context("failed to update instance inventory"))
            }
            Behavior::Panic => panic!("handler exploded"),
        }
    }
}

pub fn processor_with(
    behavior: Behavior,
) -> (MessageProcessor, Arc<FakeHandler>, Arc<RecordingSink>) {
    let handler = Arc::new(FakeHandler::new(behavior));
    let sink = Arc::new(RecordingSink::default());
    let processor = MessageProcessor::builder()
        .handler(handler.clone())
        .event_sink(sink.clone())
        .result_sink(sink.clone())
        .diagnostics(sink.clone())
        .build()
        .expect("handler is set");
    (processor, handler, sink)
}
