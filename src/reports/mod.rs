//! Reports module for group-ledger
//!
//! Provides the period statistics report (spending per category and per
//! user for one window) and the settlement report.

pub mod period_stats;
pub mod settlement;

pub use period_stats::PeriodStatsReport;
pub use settlement::SettlementReport;
