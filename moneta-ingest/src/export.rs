//! Read SMS backup exports (CSV).
//!
//! Backup tools disagree on column order, so columns are located by header
//! name (case-insensitive):
//!   address | sender   originating address (optional)
//!   body    | message  message text (required)
//!   date                epoch milliseconds (optional)

use csv::StringRecord;
use moneta_core::{Error, Result};
use std::io::Read;
use std::num::ParseIntError;
use std::path::Path;
use tracing::warn;

use crate::types::InboundMessage;

struct Columns {
    sender: Option<usize>,
    body: usize,
    date: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };

        Ok(Columns {
            sender: find(&["address", "sender"]),
            body: find(&["body", "message"]).ok_or_else(|| Error::MissingColumn("body".to_string()))?,
            date: find(&["date"]),
        })
    }
}

/// Read an SMS export file
pub fn read_sms_export(path: impl AsRef<Path>) -> Result<Vec<InboundMessage>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_sms_export_from(file)
}

/// Read an SMS export from any reader. Rows with an empty body are skipped.
pub fn read_sms_export_from<R: Read>(reader: R) -> Result<Vec<InboundMessage>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let columns = Columns::locate(rdr.headers()?)?;
    let mut out = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        // header is line 1
        let line = idx + 2;

        let body = record.get(columns.body).unwrap_or("").trim();
        if body.is_empty() {
            warn!(line, "skipping export row without a message body");
            continue;
        }

        let mut msg = InboundMessage::new(body);
        if let Some(sender) = columns
            .sender
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            msg = msg.with_sender(sender);
        }
        if let Some(raw) = columns.date.and_then(|i| record.get(i)) {
            match date_cell(raw) {
                Some(Ok(ms)) => msg = msg.with_timestamp_ms(ms),
                Some(Err(_)) => warn!(line, date = raw, "ignoring unreadable date"),
                None => {}
            }
        }
        out.push(msg);
    }

    Ok(out)
}

/// Epoch millis from a date cell; `None` for a blank cell
fn date_cell(raw: &str) -> Option<std::result::Result<i64, ParseIntError>> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.parse::<i64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_columns_by_name() {
        let csv = "\
date,body,address
1704067200000,\"Rs 10 paid to KFC. Avl bal Rs 90\",VM-BCCBNK
,\"INR 5 credited\",
";
        let msgs = read_sms_export_from(csv.as_bytes()).unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].sender.as_deref(), Some("VM-BCCBNK"));
        assert_eq!(msgs[0].timestamp_ms, Some(1_704_067_200_000));
        assert_eq!(msgs[0].body, "Rs 10 paid to KFC. Avl bal Rs 90");
        assert_eq!(msgs[1].sender, None);
        assert_eq!(msgs[1].timestamp_ms, None);
    }

    #[test]
    fn test_skips_empty_bodies() {
        let csv = "Sender,Message\nAX-ONE,\nAX-TWO,Rs 1 paid\n";
        let msgs = read_sms_export_from(csv.as_bytes()).unwrap();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].sender.as_deref(), Some("AX-TWO"));
    }

    #[test]
    fn test_missing_body_column() {
        let csv = "address,date\nAX-ONE,1\n";
        let err = read_sms_export_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "body"));
    }

    #[test]
    fn test_date_cell() {
        assert_eq!(date_cell(" 1704067200000 "), Some(Ok(1_704_067_200_000)));
        assert!(date_cell("").is_none());
        assert!(date_cell("   ").is_none());
        assert!(matches!(date_cell("yesterday"), Some(Err(_))));
    }
}
