//! Export module for group-ledger
//!
//! - CSV: the raw ledger rows of one reporting window, spreadsheet-compatible

pub mod csv;

pub use self::csv::{export_ledger_window, export_window};
