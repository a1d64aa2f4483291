//! Tab-separated export: date, type, category, amount, description.

use moneta_core::{LedgerEntry, Result};
use std::io::Write;

pub const TSV_HEADER: [&str; 5] = ["date", "type", "category", "amount", "description"];

/// Write entries as TSV with a header row. Dates are RFC 3339 UTC.
pub fn write_tsv<'a, W: Write>(entries: impl IntoIterator<Item = &'a LedgerEntry>, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(TSV_HEADER)?;
    for entry in entries {
        let txn = &entry.transaction;
        wtr.write_record([
            entry.timestamp.to_rfc3339(),
            txn.txn_type.to_string(),
            txn.category.to_string(),
            txn.amount.to_string(),
            txn.description.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
