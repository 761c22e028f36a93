//! group-ledger - shared expense ledger for groups
//!
//! This library keeps an append-only expense ledger per group and derives
//! reports from it: the reporting windows a ledger covers (recent months,
//! the latest year, all time), spending totals per window by category and
//! by user, and a transfer plan that evens out what each participant spent.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (records, money, windows, settlement plans)
//! - `storage`: CSV ledger and JSON category storage
//! - `services`: Period derivation, aggregation, settlement, expense entry
//! - `audit`: Audit logging system
//! - `export`: Window export to CSV
//! - `reports`, `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use group_ledger::config::paths::LedgerPaths;
//! use group_ledger::services::PeriodService;
//! use group_ledger::storage::Storage;
//!
//! let storage = Storage::new(LedgerPaths::new()?)?;
//! let group = "trip-2024".parse()?;
//! let windows = PeriodService::new(&storage).derive_windows(&group)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
