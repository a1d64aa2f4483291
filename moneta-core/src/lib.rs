//! moneta-core: transaction types, category rules and the append-only ledger

pub mod categorizer;
pub mod error;
pub mod ledger;
pub mod transaction;

pub use categorizer::{categorize, KEYWORD_GROUPS, KNOWN_BUSINESSES};
pub use error::{Error, Result};
pub use ledger::{entry_to_jsonl, timestamp_from_millis, Ledger, LedgerEntry, SOURCE_SMS};
pub use transaction::{describe, Category, Transaction, TxnType, UNKNOWN_RECIPIENT};
