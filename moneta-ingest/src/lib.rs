//! moneta-ingest: SMS notification parsing, receiver envelopes and backup exports.

pub mod envelope;
pub mod export;
pub mod parsers;
pub mod pipeline;
pub mod types;

pub use envelope::{split_dump, split_envelope};
pub use export::{read_sms_export, read_sms_export_from};
pub use parsers::TransactionParser;
pub use pipeline::{ingest_batch, ingest_message};
pub use types::InboundMessage;
