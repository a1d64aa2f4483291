//! Amount and balance extraction.
//!
//! Both fields use the same number shape: digits with optional comma-grouped
//! thousands and an optional two-digit fraction, e.g. `1,234.56`.

use regex::Regex;
use std::sync::OnceLock;

use super::{compile_all, first_capture};

fn amount_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        compile_all(&[
            r"(?i)INR\s*([0-9]+(?:,[0-9]{3})*(?:\.[0-9]{2})?)",
            r"(?i)Rs\.?\s*([0-9]+(?:,[0-9]{3})*(?:\.[0-9]{2})?)",
            r"(?i)₹\s*([0-9]+(?:,[0-9]{3})*(?:\.[0-9]{2})?)",
            r"(?i)amount\s*(?:of\s*)?(?:INR|Rs\.?|₹)?\s*([0-9]+(?:,[0-9]{3})*(?:\.[0-9]{2})?)",
        ])
    })
}

fn balance_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        compile_all(&[
            r"(?i)(?:Clear|Avl|Available)\s+bal(?:ance)?\s+(?:INR|Rs\.?|₹)?\s*([0-9]+(?:,[0-9]{3})*(?:\.[0-9]{2})?)",
            r"(?i)Balance\s+(?:INR|Rs\.?|₹)?\s*([0-9]+(?:,[0-9]{3})*(?:\.[0-9]{2})?)",
        ])
    })
}

/// Parse a captured currency number: strip thousands separators, then parse.
/// Anything that does not yield a finite, non-negative value is `None`.
pub fn parse_currency_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.replace(',', "").trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Transaction amount, or 0 when no amount pattern matches
pub fn extract_amount(text: &str) -> f64 {
    first_capture("amount", amount_patterns(), text)
        .and_then(parse_currency_amount)
        .unwrap_or(0.0)
}

/// Reported account balance, if any
pub fn extract_balance(text: &str) -> Option<f64> {
    first_capture("balance", balance_patterns(), text).and_then(parse_currency_amount)
}
