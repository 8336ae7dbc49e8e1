use std::sync::Arc;

use ec2_notify::core::config::AppConfig;
use ec2_notify::handler::LoggingHandler;
use ec2_notify::processing::MessageProcessor;
use ec2_notify::sinks::TracingSink;
use ec2_notify::transport::lambda::{BatchResponse, SqsEvent, process_batch};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::{error, info};

async fn function_handler(
    processor: &MessageProcessor,
    config: &AppConfig,
    event: LambdaEvent<SqsEvent>,
) -> Result<BatchResponse, Error> {
    info!(
        "Worker Lambda received {} SQS records (request_id={})",
        event.payload.records.len(),
        event.context.request_id
    );

    process_batch(processor, event.payload)
        .await
        .into_invocation_result(config.report_batch_item_failures)
        .map_err(|e| {
            error!("Failing invocation: {}", e);
            Error::from(e)
        })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = AppConfig::from_env()?;
    ec2_notify::setup_logging_with_format(config.log_format);

    let sink = Arc::new(TracingSink);
    let processor = MessageProcessor::builder()
        .handler(Arc::new(LoggingHandler))
        .event_sink(sink.clone())
        .result_sink(sink.clone())
        .diagnostics(sink)
        .build()?;

    let processor = &processor;
    let config = &config;
    run(service_fn(move |event: LambdaEvent<SqsEvent>| async move {
        function_handler(processor, config, event).await
    }))
    .await
}
