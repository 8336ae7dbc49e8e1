//! Message decoding, enrichment and dispatch

pub mod decoder;
pub mod dispatcher;
pub mod enricher;

pub use dispatcher::{DispatchOutcome, MessageProcessor, MessageProcessorBuilder};
