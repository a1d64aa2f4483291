//! Message → ledger entry.
//!
//! Validation happens here, before the parser runs: the parser itself accepts
//! anything, but an empty message is never recorded.

use chrono::{DateTime, Utc};
use moneta_core::{timestamp_from_millis, Error, LedgerEntry, Result};
use tracing::{debug, warn};

use crate::parsers::TransactionParser;
use crate::types::InboundMessage;

/// Parse `text` and wrap it with recording metadata.
///
/// `timestamp_ms` overrides the entry time when it is a valid positive epoch
/// value; otherwise `now` is used.
pub fn ingest_message(
    text: &str,
    timestamp_ms: Option<i64>,
    source: &str,
    now: DateTime<Utc>,
) -> Result<LedgerEntry> {
    if text.trim().is_empty() {
        return Err(Error::MissingText);
    }

    let timestamp = match timestamp_ms.map(timestamp_from_millis) {
        Some(Ok(ts)) => ts,
        Some(Err(e)) => {
            debug!(error = %e, "falling back to current time");
            now
        }
        None => now,
    };

    let transaction = TransactionParser::parse(text);
    Ok(LedgerEntry::new(timestamp, source, text, transaction))
}

/// Ingest a batch, keeping input order. Messages that fail validation are
/// logged and dropped.
pub fn ingest_batch(messages: &[InboundMessage], source: &str, now: DateTime<Utc>) -> Vec<LedgerEntry> {
    messages
        .iter()
        .enumerate()
        .filter_map(|(idx, msg)| match ingest_message(&msg.body, msg.timestamp_ms, source, now) {
            Ok(entry) => Some(match &msg.sender {
                Some(sender) => entry.with_sender(sender.clone()),
                None => entry,
            }),
            Err(e) => {
                warn!(index = idx, error = %e, "skipping message");
                None
            }
        })
        .collect()
}
