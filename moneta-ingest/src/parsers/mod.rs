//! Notification-text parsers.
//!
//! Every field extractor is an ordered list of regexes; the first pattern that
//! matches anywhere in the text decides the field.

pub mod money;
pub mod sms;

use regex::Regex;
use tracing::trace;

pub use money::{extract_amount, extract_balance, parse_currency_amount};
pub use sms::TransactionParser;

/// Compile built-in pattern literals. Only called from `OnceLock` initialisers.
pub(crate) fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("invalid built-in pattern"))
        .collect()
}

/// Capture group 1 of the first pattern (in list order) that matches the text.
pub(crate) fn first_capture<'t>(field: &str, patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns.iter().enumerate().find_map(|(idx, re)| {
        let m = re.captures(text)?.get(1)?;
        trace!(field, pattern = idx, value = m.as_str(), "pattern matched");
        Some(m.as_str())
    })
}
