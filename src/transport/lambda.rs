use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::models::RawMessage;
use crate::errors::NotificationError;
use crate::processing::MessageProcessor;

/// The SQS event payload Lambda delivers to the worker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SqsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SqsRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqsRecord {
    pub message_id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl From<SqsRecord> for RawMessage {
    fn from(record: SqsRecord) -> Self {
        RawMessage {
            message_id: Some(record.message_id),
            body: record.body,
            attributes: record.attributes,
        }
    }
}

/// Partial batch response: Lambda redrives only the listed records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub batch_item_failures: Vec<BatchItemFailure>,
    #[serde(skip)]
    pub total_records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailure {
    pub item_identifier: String,
}

impl BatchResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.batch_item_failures.is_empty()
    }

    /// Decide what the invocation returns.
    ///
    /// With `report_item_failures` the partial batch response is returned as
    /// is; without it any failed record fails the whole invocation so Lambda
    /// redrives the entire batch.
    pub fn into_invocation_result(
        self,
        report_item_failures: bool,
    ) -> Result<BatchResponse, NotificationError> {
        if report_item_failures || self.is_success() {
            return Ok(self);
        }
        Err(NotificationError::BatchError {
            failed: self.batch_item_failures.len(),
            total: self.total_records,
        })
    }
}

/// Run every record through the processor, in order, collecting failures.
pub async fn process_batch(processor: &MessageProcessor, event: SqsEvent) -> BatchResponse {
    let total = event.records.len();
    let mut response = BatchResponse {
        total_records: total,
        ..BatchResponse::default()
    };

    for record in event.records {
        let message = RawMessage::from(record);
        if !processor.process(&message).await {
            if let Some(message_id) = message.message_id {
                response.batch_item_failures.push(BatchItemFailure {
                    item_identifier: message_id,
                });
            }
        }
    }

    if response.is_success() {
        info!("Processed {} SQS records", total);
    } else {
        warn!(
            "{} of {} SQS records failed",
            response.batch_item_failures.len(),
            total
        );
    }
    response
}
