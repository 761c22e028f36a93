//! Service layer for group-ledger
//!
//! The service layer provides the ledger analytics on top of the storage
//! layer: reporting window derivation, per-window statistics, settlement
//! planning, and validated expense and category updates.

pub mod category;
pub mod expense;
pub mod period;
pub mod settlement;
pub mod stats;

pub use category::CategoryService;
pub use expense::ExpenseService;
pub use period::PeriodService;
pub use settlement::SettlementService;
pub use stats::StatsService;
