//! `moneta parse` and `moneta ingest`

use anyhow::{bail, Context, Result};
use chrono::Utc;
use moneta_core::LedgerEntry;
use moneta_ingest::{ingest_batch, read_sms_export, split_dump, InboundMessage, TransactionParser};
use std::path::PathBuf;
use tokio::task::JoinSet;
use tracing::info;

use crate::config::Config;
use crate::state::append_entries;

pub fn run_parse(texts: &[String]) -> Result<()> {
    if texts.is_empty() {
        bail!("nothing to parse (pass one or more message texts)");
    }
    for text in texts {
        let txn = TransactionParser::parse(text);
        println!("{}", serde_json::to_string_pretty(&txn)?);
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum InputFile {
    /// Receiver dump: `<sender>: <body>` per line
    Dump(PathBuf),
    /// SMS backup CSV
    Export(PathBuf),
}

pub struct IngestArgs {
    pub texts: Vec<String>,
    pub files: Vec<PathBuf>,
    pub csv: Vec<PathBuf>,
    pub source: Option<String>,
    pub timestamp_ms: Option<i64>,
    pub dry_run: bool,
}

pub async fn run_ingest(args: IngestArgs, cfg: &Config) -> Result<()> {
    let mut messages: Vec<InboundMessage> = args
        .texts
        .iter()
        .map(|t| {
            let msg = InboundMessage::new(t.as_str());
            match args.timestamp_ms {
                Some(ms) => msg.with_timestamp_ms(ms),
                None => msg,
            }
        })
        .collect();

    let inputs: Vec<InputFile> = args
        .files
        .into_iter()
        .map(InputFile::Dump)
        .chain(args.csv.into_iter().map(InputFile::Export))
        .collect();
    messages.extend(read_inputs(inputs).await?);

    if messages.is_empty() {
        bail!("nothing to ingest (pass message text, --file <dump> or --csv <export>)");
    }

    let source = args.source.unwrap_or_else(|| cfg.ingest.source.clone());
    let entries = ingest_batch(&messages, &source, Utc::now());
    info!(messages = messages.len(), recorded = entries.len(), "ingested");

    for entry in &entries {
        print_entry(entry);
    }

    if args.dry_run {
        println!("\nDry run: {} entries not written", entries.len());
        return Ok(());
    }

    let path = append_entries(&entries)?;
    println!("\nAppended {} entries to {}", entries.len(), path.display());
    Ok(())
}

/// Read every input file on the blocking pool; results keep argument order.
async fn read_inputs(inputs: Vec<InputFile>) -> Result<Vec<InboundMessage>> {
    let mut set = JoinSet::new();
    for (idx, input) in inputs.into_iter().enumerate() {
        set.spawn_blocking(move || (idx, read_input(&input)));
    }

    let mut results = Vec::new();
    while let Some(joined) = set.join_next().await {
        let (idx, read) = joined.context("input reader task panicked")?;
        results.push((idx, read?));
    }
    results.sort_by_key(|(idx, _)| *idx);
    Ok(results.into_iter().flat_map(|(_, msgs)| msgs).collect())
}

fn read_input(input: &InputFile) -> Result<Vec<InboundMessage>> {
    match input {
        InputFile::Dump(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            Ok(split_dump(&text))
        }
        InputFile::Export(path) => read_sms_export(path).with_context(|| format!("parsing {}", path.display())),
    }
}

fn print_entry(entry: &LedgerEntry) {
    let t = &entry.transaction;
    println!(
        "[{}] {:>10.2} | {} | {} | {}",
        t.txn_type,
        t.amount,
        t.category,
        t.description,
        entry.timestamp.format("%Y-%m-%d %H:%M")
    );
}
