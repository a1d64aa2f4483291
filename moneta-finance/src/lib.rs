//! moneta-finance: period reports, spending insights, budget targets and TSV export

pub mod export;
pub mod insights;
pub mod reports;

pub use export::write_tsv;
pub use insights::{lookback_window, BudgetTargets, CategoryShare, SpendingProfile, LOOKBACK_DAYS};
pub use reports::{parse_timezone, period_window, Period, PeriodReport, Totals};
