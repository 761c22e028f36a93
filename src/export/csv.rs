//! CSV Export functionality
//!
//! Writes the slice of a group's ledger that falls inside one reporting
//! window, keeping every row exactly as stored.

use std::io::Write;

use csv::WriterBuilder;
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{GroupId, ReportingWindow};
use crate::storage::{Ledger, Storage};

/// Write the header and every in-window row of `ledger` to `writer`
///
/// Rows keep all their columns in stored order, malformed amounts included.
/// A row whose timestamp cannot be read belongs to no window and is skipped.
/// Returns the number of rows written, header excluded.
pub fn export_ledger_window<W: Write>(
    ledger: &Ledger,
    window: &ReportingWindow,
    writer: W,
) -> LedgerResult<usize> {
    let mut csv_writer = WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_writer(writer);

    csv_writer
        .write_record(&ledger.header)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    let mut written = 0;
    for row in &ledger.rows {
        let date = match row.date() {
            Ok(date) => date,
            Err(e) => {
                warn!(line = row.line(), error = %e, "skipping row with unreadable date");
                continue;
            }
        };
        if !window.contains(date) {
            continue;
        }

        csv_writer
            .write_record(row.stored_fields())
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        written += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(written)
}

/// Export a group's rows within `window`
pub fn export_window<W: Write>(
    storage: &Storage,
    group: &GroupId,
    window: &ReportingWindow,
    writer: W,
) -> LedgerResult<usize> {
    let ledger = storage.ledger.load(group)?;
    let written = export_ledger_window(&ledger, window, writer)?;
    info!(group = %group, window = %window.label, rows = written, "exported window");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{ExpenseRecord, LedgerRow, Money, LEDGER_HEADER};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn ledger(rows: &[&[&str]]) -> Ledger {
        Ledger {
            header: LEDGER_HEADER.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, r)| LedgerRow::new(i + 2, r.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }

    fn export(ledger: &Ledger, window: &ReportingWindow) -> (usize, String) {
        let mut out = Vec::new();
        let count = export_ledger_window(ledger, window, &mut out).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_export_filters_by_window() {
        let ledger = ledger(&[
            &["2024-03-01 10:00:00", "Alice", "Food", "10", ""],
            &["2024-02-29 10:00:00", "Bob", "Food", "20", ""],
            &["2024-03-31 23:59:59", "Bob", "Rent, shared", "30", "last \"day\""],
        ]);
        let window = ReportingWindow::month(2024, 3).unwrap();

        let (count, text) = export(&ledger, &window);
        assert_eq!(count, 2);
        assert_eq!(
            text,
            "Date,User,Category,Price,Comment\n\
             2024-03-01 10:00:00,Alice,Food,10,\n\
             2024-03-31 23:59:59,Bob,\"Rent, shared\",30,\"last \"\"day\"\"\"\n"
        );
    }

    #[test]
    fn test_export_keeps_malformed_amounts_and_extra_columns() {
        let ledger = ledger(&[
            &["2024-03-05 10:00:00", "Alice", "Food", "lots", ""],
            &["2024-03-06 10:00:00", "Bob", "Food", "5", "note", "extra"],
        ]);
        let window = ReportingWindow::month(2024, 3).unwrap();

        let (count, text) = export(&ledger, &window);
        assert_eq!(count, 2);
        assert!(text.contains("Alice,Food,lots,"));
        assert!(text.contains("Bob,Food,5,note,extra"));
    }

    #[test]
    fn test_export_skips_unreadable_dates() {
        let ledger = ledger(&[
            &["yesterday", "Alice", "Food", "10", ""],
            &["2024-3-05 10:00:00", "Alice", "Food", "10", ""],
            &["2024-03-05 10:00:00", "Bob", "Food", "10", ""],
        ]);
        let window = ReportingWindow::month(2024, 3).unwrap();

        let (count, text) = export(&ledger, &window);
        assert_eq!(count, 1);
        assert!(!text.contains("Alice"));
    }

    #[test]
    fn test_export_keeps_invalid_text_bytes() {
        let mut ledger = ledger(&[]);
        ledger.rows.push(LedgerRow::from_bytes(
            2,
            vec![
                b"2024-03-02 10:00:00".to_vec(),
                b"B".to_vec(),
                b"Food".to_vec(),
                b"30".to_vec(),
                vec![0xff, 0xfe],
            ],
        ));
        let window = ReportingWindow::month(2024, 3).unwrap();

        let mut out = Vec::new();
        assert_eq!(export_ledger_window(&ledger, &window, &mut out).unwrap(), 1);
        assert!(out.ends_with(b"2024-03-02 10:00:00,B,Food,30,\xff\xfe\n"));
    }

    #[test]
    fn test_export_empty_window_writes_header() {
        let ledger = ledger(&[&["2024-01-05 10:00:00", "Alice", "Food", "10", ""]]);
        let window = ReportingWindow::month(2024, 3).unwrap();

        let (count, text) = export(&ledger, &window);
        assert_eq!(count, 0);
        assert_eq!(text, "Date,User,Category,Price,Comment\n");
    }

    #[test]
    fn test_export_window_from_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let group = GroupId::parse("g").unwrap();

        let ts = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let record = ExpenseRecord::new(ts, "Alice", "Food", Money::from_cents(1250), "").unwrap();
        storage.ledger.append(&group, &record).unwrap();

        let mut out = Vec::new();
        let window = ReportingWindow::year(2024).unwrap();
        assert_eq!(export_window(&storage, &group, &window, &mut out).unwrap(), 1);
        assert!(String::from_utf8(out)
            .unwrap()
            .ends_with("2024-03-02 09:30:00,Alice,Food,12.50,\n"));
    }
}
