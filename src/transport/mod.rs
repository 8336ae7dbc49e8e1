//! Adapters from queue transports into [`RawMessage`](crate::core::models::RawMessage)

pub mod lambda;
pub mod sqs;
