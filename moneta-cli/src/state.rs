use anyhow::{Context, Result};
use moneta_core::{entry_to_jsonl, Ledger, LedgerEntry};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// `$MONETA_HOME`, or `~/.moneta`
pub fn moneta_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MONETA_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".moneta"))
}

pub fn ensure_moneta_home() -> Result<PathBuf> {
    let dir = moneta_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn ledger_path() -> Result<PathBuf> {
    Ok(ensure_moneta_home()?.join("ledger.jsonl"))
}

/// Load the ledger; a missing file is an empty ledger
pub fn read_ledger() -> Result<Ledger> {
    let p = ledger_path()?;
    if !p.exists() {
        return Ok(Ledger::new());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(Ledger::from_jsonl(&s))
}

/// Append entries to the ledger file without rewriting existing lines
pub fn append_entries(entries: &[LedgerEntry]) -> Result<PathBuf> {
    let p = ledger_path()?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&p)
        .with_context(|| format!("open {}", p.display()))?;

    for entry in entries {
        let line = entry_to_jsonl(entry).context("serialize ledger entry")?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("write {}", p.display()))?;
    }
    Ok(p)
}
