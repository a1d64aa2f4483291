//! Spending profile and budget targets computed from ledger history.
//!
//! These are the numbers a tips or budget narrative is written from; no text
//! is generated here.

use chrono::{DateTime, Duration, Utc};
use moneta_core::{Category, LedgerEntry, TxnType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default history window for insights
pub const LOOKBACK_DAYS: i64 = 90;

/// The budget history window spans this many months
const BUDGET_MONTHS: f64 = 3.0;

/// `(now - days, now)`. The start saturates at the earliest representable
/// instant when `days` reaches past it.
pub fn lookback_window(now: DateTime<Utc>, days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    (start, now)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: f64,
    /// Share of total expenses, in percent
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingProfile {
    pub total_income: f64,
    pub total_expenses: f64,
    pub current_balance: f64,
    pub avg_monthly_spending: f64,
    pub savings_rate: f64,
    pub top_categories: Vec<CategoryShare>,
    pub highest_balance: Option<f64>,
    pub lowest_balance: Option<f64>,
}

impl SpendingProfile {
    /// Build from entries ordered newest first (as returned by `Ledger::between`).
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Self {
        let mut total_income = 0.0;
        let mut total_expenses = 0.0;
        let mut by_category: HashMap<Category, f64> = HashMap::new();
        let mut by_month: HashMap<String, f64> = HashMap::new();
        let mut highest: Option<f64> = None;
        let mut lowest: Option<f64> = None;
        let mut current_balance = None;

        for entry in entries {
            let txn = &entry.transaction;
            if current_balance.is_none() {
                current_balance = Some(txn.balance.unwrap_or(0.0));
            }

            match txn.txn_type {
                TxnType::Credit => total_income += txn.amount,
                TxnType::Debit => {
                    total_expenses += txn.amount;
                    *by_category.entry(txn.category).or_insert(0.0) += txn.amount;
                    *by_month
                        .entry(entry.timestamp.format("%Y-%m").to_string())
                        .or_insert(0.0) += txn.amount;
                }
            }

            if let Some(balance) = txn.balance.filter(|b| *b > 0.0) {
                highest = Some(highest.map_or(balance, |h: f64| h.max(balance)));
                lowest = Some(lowest.map_or(balance, |l: f64| l.min(balance)));
            }
        }

        let months = by_month.len().max(1) as f64;
        let avg_monthly_spending = by_month.values().sum::<f64>() / months;

        let savings_rate = if total_income > 0.0 {
            (total_income - total_expenses) / total_income * 100.0
        } else {
            0.0
        };

        let mut ranked: Vec<(Category, f64)> = by_category.into_iter().collect();
        // ties broken by category order so output is stable
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        let top_categories = ranked
            .into_iter()
            .take(3)
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percentage: percent_of(amount, total_expenses),
            })
            .collect();

        Self {
            total_income,
            total_expenses,
            current_balance: current_balance.unwrap_or(0.0),
            avg_monthly_spending,
            savings_rate,
            top_categories,
            highest_balance: highest,
            lowest_balance: lowest,
        }
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Monthly budget numbers derived from roughly three months of history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetTargets {
    pub monthly_income: f64,
    pub avg_monthly_spending: f64,
    pub target_savings_pct: f64,
    pub target_savings_amount: f64,
    pub current_savings_rate: f64,
    pub recommended_expense_limit: f64,
    pub category_monthly_average: BTreeMap<Category, f64>,
}

impl BudgetTargets {
    /// `monthly_income <= 0` means "estimate from credits in the history".
    pub fn compute<'a>(
        entries: impl IntoIterator<Item = &'a LedgerEntry>,
        target_savings_pct: f64,
        monthly_income: f64,
    ) -> Self {
        let mut credit = 0.0;
        let mut debit = 0.0;
        let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();

        for entry in entries {
            let txn = &entry.transaction;
            match txn.txn_type {
                TxnType::Credit => credit += txn.amount,
                TxnType::Debit => {
                    debit += txn.amount;
                    *by_category.entry(txn.category).or_insert(0.0) += txn.amount;
                }
            }
        }

        let income = if monthly_income > 0.0 {
            monthly_income
        } else {
            credit / BUDGET_MONTHS
        };
        let spending = debit / BUDGET_MONTHS;

        let current_savings_rate = if income > 0.0 {
            (income - spending) / income * 100.0
        } else {
            0.0
        };

        for amount in by_category.values_mut() {
            *amount /= BUDGET_MONTHS;
        }

        Self {
            monthly_income: income,
            avg_monthly_spending: spending,
            target_savings_pct,
            target_savings_amount: income * target_savings_pct / 100.0,
            current_savings_rate,
            recommended_expense_limit: income * (100.0 - target_savings_pct) / 100.0,
            category_monthly_average: by_category,
        }
    }
}
