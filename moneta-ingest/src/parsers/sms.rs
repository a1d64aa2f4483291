//! Bank / merchant SMS notification parser
//!
//! Typical inputs:
//!   Rs.250.00 debited from A/c XX1234 on 05-01-2024 by UPI/DR/401234567890/SWIGGY. Avl bal Rs 9,750.00
//!   INR 500 credited to your account, REF NO ABC123
//!   Spent Rs. 1,250.50 at STARBUCKS on 05-JAN-2024
//!
//! Parsing never fails: each stage falls back to a default when nothing matches.

use moneta_core::{categorize, Transaction, TxnType, UNKNOWN_RECIPIENT};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use super::money::{extract_amount, extract_balance};
use super::{compile_all, first_capture};

const DEBIT_KEYWORDS: &[&str] = &[
    "debited", "spent", "paid", "deducted", "withdrawn", "purchase", "payment", "transfer", "sent",
];

const CREDIT_KEYWORDS: &[&str] = &[
    "credited", "received", "deposited", "refund", "cashback", "salary", "interest", "dividend",
];

/// Upper-case runs containing these are bank or currency tokens, never merchants
const MERCHANT_NOISE: &[&str] = &["BCCB", "INR", "UPI"];

// Letter classes are ASCII-only so case folding never admits characters
// such as U+017F or the Kelvin sign.
fn date_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        compile_all(&[
            r"(?i)On\s+([0-9]{2}-(?-u:[A-Za-z]){3}-[0-9]{4})",
            r"([0-9]{2}-[0-9]{2}-[0-9]{4})",
            r"([0-9]{2}/[0-9]{2}/[0-9]{4})",
            r"(?i)([0-9]{1,2}\s+(?-u:[A-Za-z]){3}\s+[0-9]{4})",
        ])
    })
}

fn txn_id_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        compile_all(&[
            r"(?i)UPI/(?:DR|CR)/([0-9]+)",
            r"(?i)REF\s*(?:NO\.?\s*)?((?-u:[0-9A-Za-z_])+)",
            r"(?i)TXN\s*(?:ID\s*)?((?-u:[0-9A-Za-z_])+)",
            r"(?i)TRANSACTION\s*(?:ID\s*)?((?-u:[0-9A-Za-z_])+)",
        ])
    })
}

fn recipient_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        compile_all(&[
            r"(?i)by\s+UPI/(?:DR|CR)/[0-9]+/([^.]+)",
            r"(?i)to\s+((?:(?-u:[A-Za-z&.-])|\s)+?)(?:\s+on|\s+at|\.|$)",
            r"(?i)at\s+((?:(?-u:[A-Za-z&.-])|\s)+?)(?:\s+on|\s+at|\.|$)",
            r"(?i)from\s+((?:(?-u:[A-Za-z&.-])|\s)+?)(?:\s+on|\s+at|\.|$)",
        ])
    })
}

/// Case-sensitive: only genuinely upper-case words qualify
fn merchant_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z]{2,}(?:\s+[A-Z]+)*").expect("invalid merchant regex"))
}

/// Converts one notification message into a [`Transaction`].
pub struct TransactionParser;

impl TransactionParser {
    /// Run every extraction stage over `text`. Total: any input yields a record.
    pub fn parse(text: &str) -> Transaction {
        let txn_type = classify_type(text);
        let amount = extract_amount(text);
        let date = extract_date(text);
        let transaction_id = extract_transaction_id(text);
        let recipient = extract_recipient(text);
        let balance = extract_balance(text);
        let category = categorize(&recipient);

        debug!(
            %txn_type,
            amount,
            recipient = %recipient,
            %category,
            "parsed message"
        );

        Transaction::new(txn_type, amount, date, recipient, category, transaction_id, balance)
    }
}

/// Debit keywords are checked first; with no keyword at all the message is a debit.
pub fn classify_type(text: &str) -> TxnType {
    let lower = text.to_lowercase();
    if DEBIT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        TxnType::Debit
    } else if CREDIT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        TxnType::Credit
    } else {
        TxnType::Debit
    }
}

/// Date text exactly as written in the message, or empty
pub fn extract_date(text: &str) -> String {
    first_capture("date", date_patterns(), text)
        .unwrap_or_default()
        .to_string()
}

pub fn extract_transaction_id(text: &str) -> String {
    first_capture("transaction_id", txn_id_patterns(), text)
        .unwrap_or_default()
        .to_string()
}

/// Counterparty name: explicit phrase first, then the first upper-case run.
pub fn extract_recipient(text: &str) -> String {
    let explicit = first_capture("recipient", recipient_patterns(), text)
        .map(str::trim)
        .filter(|r| !r.is_empty());

    explicit
        .or_else(|| merchant_run(text))
        .unwrap_or(UNKNOWN_RECIPIENT)
        .to_string()
}

fn merchant_run(text: &str) -> Option<&str> {
    merchant_run_re()
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|run| run.chars().count() > 2 && !MERCHANT_NOISE.iter().any(|n| run.contains(n)))
}
