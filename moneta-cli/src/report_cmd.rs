//! Read-side commands over the stored ledger: report, insights, budget, export

use anyhow::{bail, Context, Result};
use chrono::Utc;
use moneta_finance::{
    lookback_window, parse_timezone, write_tsv, BudgetTargets, Period, PeriodReport, SpendingProfile,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::state::read_ledger;

pub fn run_report(period: Option<Period>, json: bool, cfg: &Config) -> Result<()> {
    let period = period.unwrap_or(cfg.report.default_period);
    let tz = parse_timezone(&cfg.report.timezone)?;
    let ledger = read_ledger()?;
    let report = PeriodReport::for_ledger(&ledger, period, Utc::now(), tz)?;
    debug!(%period, entries = ledger.len(), "built report");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} report ({} to {})",
        period,
        report.start.with_timezone(&tz).format("%Y-%m-%d"),
        report.end.with_timezone(&tz).format("%Y-%m-%d %H:%M")
    );
    println!("  transactions: {}", report.transaction_count);
    println!("  spent:        {:.2}", report.totals.debit);
    println!("  received:     {:.2}", report.totals.credit);
    println!("  net:          {:.2}", report.totals.net());

    let ranked = report.ranked_categories();
    if !ranked.is_empty() {
        println!("\nBy category:");
        for (category, amount) in ranked {
            println!("  {:<20} {:>12.2}", category.label(), amount);
        }
    }
    Ok(())
}

pub fn run_insights(days: i64, json: bool) -> Result<()> {
    if days <= 0 {
        bail!("--days must be positive (got {days})");
    }
    let ledger = read_ledger()?;
    let (start, end) = lookback_window(Utc::now(), days);
    let window = ledger.between(start, end)?;
    let profile = SpendingProfile::from_entries(window.iter().copied());

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("Last {days} days ({} transactions)", window.len());
    println!("  income:               {:.2}", profile.total_income);
    println!("  expenses:             {:.2}", profile.total_expenses);
    println!("  avg monthly spending: {:.2}", profile.avg_monthly_spending);
    println!("  savings rate:         {:.1}%", profile.savings_rate);
    println!("  current balance:      {:.2}", profile.current_balance);
    if let (Some(hi), Some(lo)) = (profile.highest_balance, profile.lowest_balance) {
        println!("  balance range:        {lo:.2} .. {hi:.2}");
    }

    if !profile.top_categories.is_empty() {
        println!("\nTop categories:");
        for share in &profile.top_categories {
            println!(
                "  {:<20} {:>12.2} ({:.1}%)",
                share.category.label(),
                share.amount,
                share.percentage
            );
        }
    }
    Ok(())
}

pub fn run_budget(target: Option<f64>, income: Option<f64>, json: bool, cfg: &Config) -> Result<()> {
    let target = target.unwrap_or(cfg.budget.target_savings_pct);
    if !(0.0..=100.0).contains(&target) {
        bail!("target savings must be between 0 and 100 percent (got {target})");
    }
    let income = income.unwrap_or(cfg.budget.monthly_income);

    let ledger = read_ledger()?;
    let (start, end) = lookback_window(Utc::now(), moneta_finance::LOOKBACK_DAYS);
    let window = ledger.between(start, end)?;
    let budget = BudgetTargets::compute(window.iter().copied(), target, income);

    if json {
        println!("{}", serde_json::to_string_pretty(&budget)?);
        return Ok(());
    }

    println!("Monthly budget");
    println!("  income:                 {:.2}", budget.monthly_income);
    println!("  avg spending:           {:.2}", budget.avg_monthly_spending);
    println!(
        "  savings target:         {:.2} ({:.0}%)",
        budget.target_savings_amount, budget.target_savings_pct
    );
    println!("  current savings rate:   {:.1}%", budget.current_savings_rate);
    println!("  expense limit:          {:.2}", budget.recommended_expense_limit);

    if !budget.category_monthly_average.is_empty() {
        println!("\nMonthly average by category:");
        for (category, amount) in &budget.category_monthly_average {
            println!("  {:<20} {:>12.2}", category.label(), amount);
        }
    }
    Ok(())
}

pub fn run_export(out: Option<PathBuf>) -> Result<()> {
    let ledger = read_ledger()?;
    match out {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
            write_tsv(ledger.entries(), BufWriter::new(file))
                .with_context(|| format!("write {}", path.display()))?;
            info!(entries = ledger.len(), path = %path.display(), "exported");
            println!("Wrote {} entries to {}", ledger.len(), path.display());
        }
        None => {
            write_tsv(ledger.entries(), io::stdout().lock()).context("write summary to stdout")?;
        }
    }
    Ok(())
}
