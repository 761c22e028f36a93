//! Period statistics service
//!
//! Sums the records of one reporting window by category and by contributor.
//! Statistics assume a clean ledger: any malformed row the window touches is
//! reported as a data integrity error instead of being left out of the
//! totals.

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{GroupId, PeriodStats, ReportingWindow};
use crate::storage::{Ledger, Storage};

use super::period::{derive_windows, ledger_dates};

/// Aggregate the rows of `ledger` dated within `window`
///
/// Rows outside the window are not amount-checked. A row whose timestamp
/// cannot be read fails the whole aggregation, since its membership is
/// unknown.
pub fn aggregate(ledger: &Ledger, window: &ReportingWindow) -> LedgerResult<PeriodStats> {
    let mut stats = PeriodStats::new();

    for row in &ledger.rows {
        let date = row
            .date()
            .map_err(|e| LedgerError::data_integrity(row.line(), e.to_string()))?;
        if !window.contains(date) {
            continue;
        }

        let record = row
            .parse()
            .map_err(|e| LedgerError::data_integrity(row.line(), e.to_string()))?;
        stats
            .add(&record)
            .map_err(|e| LedgerError::data_integrity(row.line(), e.to_string()))?;
    }

    Ok(stats)
}

/// Service for per-window statistics
pub struct StatsService<'a> {
    storage: &'a Storage,
}

impl<'a> StatsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Totals of a group's records within `window`
    pub fn compute_period_stats(
        &self,
        group: &GroupId,
        window: &ReportingWindow,
    ) -> LedgerResult<PeriodStats> {
        let ledger = self.storage.ledger.load(group)?;
        let stats = aggregate(&ledger, window)?;
        debug!(
            group = %group,
            window = %window.label,
            records = stats.record_count,
            total = %stats.total,
            "computed period stats"
        );
        Ok(stats)
    }

    /// Totals for every derived window, in window order
    pub fn compute_all(&self, group: &GroupId) -> LedgerResult<Vec<(ReportingWindow, PeriodStats)>> {
        let ledger = self.storage.ledger.load(group)?;
        let windows = derive_windows(&ledger_dates(&ledger)?);

        windows
            .into_iter()
            .map(|window| {
                let stats = aggregate(&ledger, &window)?;
                Ok((window, stats))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{LedgerRow, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn ledger(rows: &[[&str; 5]]) -> Ledger {
        Ledger {
            header: Vec::new(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, r)| LedgerRow::new(i + 2, r.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }

    fn march() -> ReportingWindow {
        ReportingWindow::month(2024, 3).unwrap()
    }

    #[test]
    fn test_aggregate_within_window() {
        let ledger = ledger(&[
            ["2024-03-01 00:00:00", "Alice", "Food", "10", ""],
            ["2024-03-31 23:59:59", "Bob", "Food", "5.50", "late"],
            ["2024-03-15 12:00:00", "Alice", "Rent", "100", ""],
            ["2024-04-01 00:00:00", "Bob", "Rent", "999", ""],
            ["2024-02-29 12:00:00", "Bob", "Rent", "999", ""],
        ]);

        let stats = aggregate(&ledger, &march()).unwrap();
        assert_eq!(stats.total, Money::from_cents(11550));
        assert_eq!(stats.record_count, 3);
        assert_eq!(stats.by_category["Food"], Money::from_cents(1550));
        assert_eq!(stats.by_category["Rent"], Money::from_cents(10000));
        assert_eq!(stats.by_contributor["Alice"], Money::from_cents(11000));
        assert_eq!(stats.by_contributor["Bob"], Money::from_cents(550));
        assert_eq!(stats.by_category.values().sum::<Money>(), stats.total);
        assert_eq!(stats.by_contributor.values().sum::<Money>(), stats.total);
    }

    #[test]
    fn test_no_zero_fill() {
        let ledger = ledger(&[["2024-03-02 08:00:00", "Alice", "Food", "1", ""]]);
        let stats = aggregate(&ledger, &march()).unwrap();
        assert_eq!(stats.by_category.len(), 1);
        assert!(!stats.by_category.contains_key("Rent"));
    }

    #[test]
    fn test_malformed_amount_in_window_fails() {
        let ledger = ledger(&[
            ["2024-03-01 00:00:00", "Alice", "Food", "10", ""],
            ["2024-03-02 00:00:00", "Bob", "Food", "lots", ""],
        ]);

        let err = aggregate(&ledger, &march()).unwrap_err();
        assert!(err.is_data_integrity());
        assert!(matches!(err, LedgerError::DataIntegrity { line: 3, .. }));
    }

    #[test]
    fn test_malformed_amount_outside_window_ignored() {
        let ledger = ledger(&[
            ["2024-03-01 00:00:00", "Alice", "Food", "10", ""],
            ["2024-01-02 00:00:00", "Bob", "Food", "lots", ""],
        ]);

        let stats = aggregate(&ledger, &march()).unwrap();
        assert_eq!(stats.total, Money::from_cents(1000));
    }

    #[test]
    fn test_total_overflow_fails() {
        let ledger = ledger(&[
            ["2024-03-01 00:00:00", "Alice", "Food", "50000000000000000", ""],
            ["2024-03-02 00:00:00", "Bob", "Food", "50000000000000000", ""],
        ]);

        let err = aggregate(&ledger, &march()).unwrap_err();
        assert!(matches!(err, LedgerError::DataIntegrity { line: 3, .. }));
    }

    #[test]
    fn test_invalid_text_in_window_fails() {
        let mut ledger = ledger(&[["2024-03-01 00:00:00", "Alice", "Food", "10", ""]]);
        ledger.rows.push(LedgerRow::from_bytes(
            3,
            vec![
                b"2024-03-02 00:00:00".to_vec(),
                b"Bob".to_vec(),
                b"Food".to_vec(),
                b"5".to_vec(),
                vec![0xff, 0xfe],
            ],
        ));

        let err = aggregate(&ledger, &march()).unwrap_err();
        assert!(matches!(err, LedgerError::DataIntegrity { line: 3, .. }));
    }

    #[test]
    fn test_at_prefixed_contributors_merge() {
        let ledger = ledger(&[
            ["2024-03-01 00:00:00", "@alice", "Food", "10", ""],
            ["2024-03-02 00:00:00", "alice", "Food", "5", ""],
        ]);

        let stats = aggregate(&ledger, &march()).unwrap();
        assert_eq!(stats.by_contributor.len(), 1);
        assert_eq!(stats.by_contributor["alice"], Money::from_cents(1500));
    }

    #[test]
    fn test_bad_timestamp_fails() {
        let ledger = ledger(&[["03/01/2024", "Alice", "Food", "10", ""]]);
        assert!(aggregate(&ledger, &march()).unwrap_err().is_data_integrity());
    }

    #[test]
    fn test_compute_all_over_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let group = GroupId::parse("g").unwrap();

        for (m, cents) in [(1, 1000), (2, 2000), (3, 3000)] {
            let ts = NaiveDate::from_ymd_opt(2024, m, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap();
            let record = crate::models::ExpenseRecord::new(
                ts,
                "Alice",
                "Food",
                Money::from_cents(cents),
                "",
            )
            .unwrap();
            storage.ledger.append(&group, &record).unwrap();
        }

        let service = StatsService::new(&storage);
        let all = service.compute_all(&group).unwrap();
        let totals: Vec<_> = all.iter().map(|(w, s)| (w.label.as_str(), s.total.cents())).collect();
        assert_eq!(
            totals,
            vec![
                ("March", 3000),
                ("February", 2000),
                ("January", 1000),
                ("2024", 6000),
                ("All period", 6000),
            ]
        );

        let empty = GroupId::parse("nobody").unwrap();
        assert!(service.compute_all(&empty).unwrap().is_empty());
    }
}
