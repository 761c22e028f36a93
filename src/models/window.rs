//! Reporting windows
//!
//! A window is a labeled inclusive date range scoping a statistics query.
//! Windows are derived from the ledger on every request and never stored.

use chrono::{Datelike, Duration, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the window spanning the whole ledger
pub const ALL_PERIOD_LABEL: &str = "All period";

/// What a window was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindowKind {
    /// A full calendar month
    Month { year: i32, month: u32 },
    /// A full calendar year
    Year { year: i32 },
    /// Earliest to latest recorded date
    AllPeriod,
}

/// A labeled inclusive date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: WindowKind,
}

impl ReportingWindow {
    /// Full calendar month, labeled with the month name ("March")
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let name = Month::try_from(u8::try_from(month).ok()?).ok()?.name();

        Some(Self {
            label: name.to_string(),
            start,
            end: next_month - Duration::days(1),
            kind: WindowKind::Month { year, month },
        })
    }

    /// Full calendar year, labeled with the year number ("2024")
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            label: year.to_string(),
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
            kind: WindowKind::Year { year },
        })
    }

    /// Window covering exactly the recorded dates, not padded
    pub fn all_period(earliest: NaiveDate, latest: NaiveDate) -> Self {
        Self {
            label: ALL_PERIOD_LABEL.to_string(),
            start: earliest,
            end: latest,
            kind: WindowKind::AllPeriod,
        }
    }

    /// Check if a date falls within this window (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Label including the year for month windows ("March 2024")
    pub fn long_label(&self) -> String {
        match self.kind {
            WindowKind::Month { .. } => format!("{} {}", self.label, self.start.year()),
            _ => self.label.clone(),
        }
    }
}

impl fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} to {})", self.label, self.start, self.end)
    }
}
