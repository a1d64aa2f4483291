use anyhow::{Context, Result};
use moneta_core::SOURCE_SMS;
use moneta_finance::Period;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_moneta_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestSection,
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub budget: BudgetSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// Source tag stamped on every recorded entry
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// IANA timezone used for period boundaries
    pub timezone: String,
    pub default_period: Period,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetSection {
    pub target_savings_pct: f64,
    /// 0 means "estimate from credits"
    pub monthly_income: f64,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            source: SOURCE_SMS.to_string(),
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
            default_period: Period::Month,
        }
    }
}

impl Default for BudgetSection {
    fn default() -> Self {
        Self {
            target_savings_pct: 20.0,
            monthly_income: 0.0,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_moneta_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[report]\ntimezone = \"Europe/London\"\n").unwrap();
        assert_eq!(cfg.report.timezone, "Europe/London");
        assert_eq!(cfg.report.default_period, Period::Month);
        assert_eq!(cfg.ingest.source, "sms");
        assert_eq!(cfg.budget.target_savings_pct, 20.0);
    }

    #[test]
    fn test_default_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.report.default_period, Period::Month);
        assert_eq!(back.report.timezone, "Asia/Kolkata");
    }
}
