//! Reporting period service
//!
//! Derives the candidate reporting windows of a ledger from its recorded
//! dates:
//!
//! 1. the (up to) three most recent calendar months with records, newest
//!    first, each spanning the full month;
//! 2. the most recent calendar year with records, Jan 1 to Dec 31;
//! 3. "All period", from the earliest to the latest recorded date.
//!
//! Windows overlap on purpose; each one is evaluated on its own.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{GroupId, ReportingWindow, WindowKind};
use crate::storage::{Ledger, Storage};

/// Number of month windows offered
pub const RECENT_MONTHS: usize = 3;

/// Derive reporting windows from record dates (any order, duplicates allowed)
///
/// An empty slice yields no windows: there is nothing to report.
pub fn derive_windows(dates: &[NaiveDate]) -> Vec<ReportingWindow> {
    let (earliest, latest) = match (dates.iter().min(), dates.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Vec::new(),
    };

    let months: BTreeSet<(i32, u32)> = dates.iter().map(|d| (d.year(), d.month())).collect();

    let mut windows: Vec<ReportingWindow> = months
        .iter()
        .rev()
        .take(RECENT_MONTHS)
        .filter_map(|&(year, month)| ReportingWindow::month(year, month))
        .collect();

    if let Some(year) = ReportingWindow::year(latest.year()) {
        windows.push(year);
    }

    windows.push(ReportingWindow::all_period(earliest, latest));
    windows
}

/// Pick a window by 1-based position or by label (case-insensitive)
///
/// Month windows also match their long label ("March 2024"), and "all"
/// matches the all-period window.
pub fn select_window<'w>(
    windows: &'w [ReportingWindow],
    selector: &str,
) -> LedgerResult<&'w ReportingWindow> {
    let selector = selector.trim();

    if let Ok(index) = selector.parse::<usize>() {
        // A bare year like "2024" is a label, not a position
        if index >= 1 && index <= windows.len() {
            return Ok(&windows[index - 1]);
        }
    }

    let wanted = selector.to_lowercase();
    windows
        .iter()
        .find(|w| {
            w.label.to_lowercase() == wanted
                || w.long_label().to_lowercase() == wanted
                || (wanted == "all" && w.kind == WindowKind::AllPeriod)
        })
        .ok_or_else(|| LedgerError::window_not_found(selector))
}

/// Dates of every row, failing on the first unparsable timestamp
pub fn ledger_dates(ledger: &Ledger) -> LedgerResult<Vec<NaiveDate>> {
    ledger
        .rows
        .iter()
        .map(|row| {
            row.date()
                .map_err(|e| LedgerError::data_integrity(row.line(), e.to_string()))
        })
        .collect()
}

/// Dates of every row whose timestamp can be read; the rest are skipped
pub fn readable_dates(ledger: &Ledger) -> Vec<NaiveDate> {
    ledger
        .rows
        .iter()
        .filter_map(|row| match row.date() {
            Ok(date) => Some(date),
            Err(e) => {
                warn!(line = row.line(), error = %e, "ignoring row with unreadable date");
                None
            }
        })
        .collect()
}

/// Service for reporting window derivation
pub struct PeriodService<'a> {
    storage: &'a Storage,
}

impl<'a> PeriodService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Candidate reporting windows for a group (empty if it has no records)
    pub fn derive_windows(&self, group: &GroupId) -> LedgerResult<Vec<ReportingWindow>> {
        let ledger = self.storage.ledger.load(group)?;
        let dates = ledger_dates(&ledger)?;
        let windows = derive_windows(&dates);
        debug!(group = %group, records = dates.len(), windows = windows.len(), "derived windows");
        Ok(windows)
    }

    /// Resolve a selector against the group's current windows
    pub fn find_window(&self, group: &GroupId, selector: &str) -> LedgerResult<ReportingWindow> {
        let windows = self.derive_windows(group)?;
        select_window(&windows, selector).cloned()
    }

    /// Resolve a selector for export, deriving windows from readable dates only
    ///
    /// Export copies rows as stored, so a row with a broken timestamp must
    /// not keep the rest of the ledger from being exported.
    pub fn find_export_window(
        &self,
        group: &GroupId,
        selector: &str,
    ) -> LedgerResult<ReportingWindow> {
        let ledger = self.storage.ledger.load(group)?;
        let windows = derive_windows(&readable_dates(&ledger));
        select_window(&windows, selector).cloned()
    }
}
