//! Period totals: debit/credit sums and debit spend per category.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use moneta_core::{Category, Error, Ledger, LedgerEntry, Result, TxnType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "week")]
    Week,
    #[default]
    #[serde(rename = "month")]
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(Error::UnknownPeriod(other.to_string())),
        }
    }
}

/// Parse an IANA timezone name like "Asia/Kolkata"
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse().map_err(|_| Error::UnknownTimezone(name.to_string()))
}

/// Reporting window ending at `now`, with the start at local midnight in `tz`:
/// seven days before today for a week, the first of the month for a month.
pub fn period_window(period: Period, now: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(&tz).date_naive();
    let first_day = match period {
        Period::Week => today - Duration::days(7),
        Period::Month => today.with_day(1).unwrap_or(today),
    };
    (local_midnight_utc(first_day, tz), now)
}

fn local_midnight_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // midnight skipped by a DST jump; treat the wall time as UTC
        None => Utc.from_utc_datetime(&midnight),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub debit: f64,
    pub credit: f64,
}

impl Totals {
    pub fn net(&self) -> f64 {
        self.credit - self.debit
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub period: Period,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub totals: Totals,
    /// Debit spend only; credits never appear here
    pub by_category: BTreeMap<Category, f64>,
    pub transaction_count: usize,
}

impl PeriodReport {
    /// Aggregate entries that are already restricted to the window
    pub fn build<'a>(
        entries: impl IntoIterator<Item = &'a LedgerEntry>,
        period: Period,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        let mut totals = Totals::default();
        let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
        let mut count = 0;

        for entry in entries {
            let txn = &entry.transaction;
            count += 1;
            match txn.txn_type {
                TxnType::Credit => totals.credit += txn.amount,
                TxnType::Debit => {
                    totals.debit += txn.amount;
                    *by_category.entry(txn.category).or_insert(0.0) += txn.amount;
                }
            }
        }

        Self {
            period,
            start,
            end,
            totals,
            by_category,
            transaction_count: count,
        }
    }

    /// Report for the current period of `ledger`
    pub fn for_ledger(ledger: &Ledger, period: Period, now: DateTime<Utc>, tz: Tz) -> Result<Self> {
        let (start, end) = period_window(period, now, tz);
        let entries = ledger.between(start, end)?;
        debug!(%period, %start, %end, entries = entries.len(), "building period report");
        Ok(Self::build(entries, period, start, end))
    }

    /// Categories by spend, largest first
    pub fn ranked_categories(&self) -> Vec<(Category, f64)> {
        let mut ranked: Vec<_> = self.by_category.iter().map(|(c, a)| (*c, *a)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneta_core::Transaction;

    fn entry(ts: DateTime<Utc>, txn_type: TxnType, amount: f64, category: Category) -> LedgerEntry {
        let txn = Transaction::new(txn_type, amount, "", "X", category, "", None);
        LedgerEntry::new(ts, "sms", "raw", txn)
    }

    fn kolkata() -> Tz {
        parse_timezone("Asia/Kolkata").unwrap()
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!(" Month ".parse::<Period>().unwrap(), Period::Month);
        assert!(matches!("year".parse::<Period>(), Err(Error::UnknownPeriod(_))));
    }

    #[test]
    fn test_unknown_timezone() {
        assert!(matches!(parse_timezone("Mars/Base"), Err(Error::UnknownTimezone(_))));
    }

    #[test]
    fn test_month_window_starts_at_local_first() {
        // 2024-03-15 10:00 UTC is 15:30 in Kolkata (UTC+5:30)
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let (start, end) = period_window(Period::Month, now, kolkata());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 29, 18, 30, 0).unwrap());
        assert_eq!(end, now);
    }

    #[test]
    fn test_week_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let (start, _) = period_window(Period::Week, now, kolkata());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 7, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_window_uses_local_date() {
        // 2024-03-31 20:00 UTC is already April 1st in Kolkata
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap();
        let (start, _) = period_window(Period::Month, now, kolkata());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 31, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_build_splits_debit_and_credit() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let entries = vec![
            entry(ts, TxnType::Debit, 100.0, Category::FoodAndBeverages),
            entry(ts, TxnType::Debit, 50.0, Category::FoodAndBeverages),
            entry(ts, TxnType::Debit, 20.0, Category::Transport),
            entry(ts, TxnType::Credit, 1000.0, Category::Income),
        ];
        let r = PeriodReport::build(&entries, Period::Month, ts, ts);

        assert_eq!(r.totals.debit, 170.0);
        assert_eq!(r.totals.credit, 1000.0);
        assert_eq!(r.totals.net(), 830.0);
        assert_eq!(r.by_category.get(&Category::FoodAndBeverages), Some(&150.0));
        assert_eq!(r.by_category.get(&Category::Income), None);
        assert_eq!(r.transaction_count, 4);
        assert_eq!(r.ranked_categories()[0].0, Category::FoodAndBeverages);
    }

    #[test]
    fn test_for_ledger_filters_window() {
        let tz = kolkata();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let mut ledger = Ledger::new();
        ledger.append(entry(now - Duration::days(30), TxnType::Debit, 999.0, Category::Shopping));
        ledger.append(entry(now - Duration::days(2), TxnType::Debit, 10.0, Category::Shopping));
        ledger.append(entry(now + Duration::days(1), TxnType::Debit, 5.0, Category::Shopping));

        let r = PeriodReport::for_ledger(&ledger, Period::Week, now, tz).unwrap();
        assert_eq!(r.transaction_count, 1);
        assert_eq!(r.totals.debit, 10.0);
    }

    #[test]
    fn test_report_json_keys() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let entries = vec![entry(ts, TxnType::Debit, 5.0, Category::BillsAndUtilities)];
        let v = serde_json::to_value(PeriodReport::build(&entries, Period::Week, ts, ts)).unwrap();
        assert_eq!(v["period"], "week");
        assert_eq!(v["by_category"]["Bills & Utilities"], 5.0);
    }
}
