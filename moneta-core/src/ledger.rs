//! Append-only ledger of parsed messages.
//!
//! Entries are never edited once appended. Persistence is JSON lines: one
//! serialized [`LedgerEntry`] per line.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::transaction::Transaction;

/// Source tag for entries that came from a device SMS
pub const SOURCE_SMS: &str = "sms";

/// A parsed transaction plus the caller-supplied metadata it was recorded with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    /// When the message was received (caller override) or recorded
    pub timestamp: DateTime<Utc>,
    /// Where the text came from, e.g. "sms"
    pub source: String,
    /// Originating address, when the message envelope carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Original message text
    pub raw: String,
    #[serde(flatten)]
    pub transaction: Transaction,
}

impl LedgerEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        source: impl Into<String>,
        raw: impl Into<String>,
        transaction: Transaction,
    ) -> Self {
        Self {
            timestamp,
            source: source.into(),
            sender: None,
            raw: raw.into(),
            transaction,
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn amount(&self) -> f64 {
        self.transaction.amount
    }
}

/// Convert epoch milliseconds into a UTC instant. Zero and negative values are rejected.
pub fn timestamp_from_millis(ms: i64) -> Result<DateTime<Utc>> {
    if ms <= 0 {
        return Err(Error::InvalidTimestamp(ms));
    }
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or(Error::InvalidTimestamp(ms))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    /// Entries in the order they were appended
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with `start <= timestamp <= end`, newest first
    pub fn between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<&LedgerEntry>> {
        if start > end {
            return Err(Error::InvalidDateRange { start, end });
        }
        let mut hits: Vec<&LedgerEntry> = self
            .entries
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect();
        hits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(hits)
    }

    /// Parse JSON lines. Blank lines are ignored; malformed lines are skipped.
    pub fn from_jsonl(text: &str) -> Self {
        let mut ledger = Ledger::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<LedgerEntry>(line) {
                Ok(entry) => ledger.append(entry),
                Err(e) => warn!(line = lineno + 1, error = %e, "skipping unreadable ledger line"),
            }
        }
        ledger
    }

    /// Serialize every entry as one JSON line each
    pub fn to_jsonl(&self) -> Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry_to_jsonl(entry)?);
        }
        Ok(out)
    }
}

/// One newline-terminated JSON line, suitable for appending to a ledger file
pub fn entry_to_jsonl(entry: &LedgerEntry) -> Result<String> {
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');
    Ok(line)
}
