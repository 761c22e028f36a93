//! Core data models for group-ledger
//!
//! This module contains the data structures of the shared-expense domain:
//! ledger records, money, reporting windows, category sets, period totals
//! and settlement plans.

pub mod category;
pub mod group;
pub mod money;
pub mod record;
pub mod settlement;
pub mod stats;
pub mod window;

pub use category::{CategorySet, CategoryValidationError};
pub use group::{GroupId, GroupIdError};
pub use money::{Money, MoneyParseError};
pub use record::{
    normalize_identity, ExpenseRecord, LedgerRow, RecordError, LEDGER_HEADER, TIMESTAMP_FORMAT,
};
pub use settlement::{ParticipantBalance, SettlementResult, Transfer};
pub use stats::PeriodStats;
pub use window::{ReportingWindow, WindowKind, ALL_PERIOD_LABEL};
