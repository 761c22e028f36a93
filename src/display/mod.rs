//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for terminal display,
//! including registers, category lists and report helpers.

pub mod category;
pub mod expense;
pub mod report;

pub use category::format_category_list;
pub use expense::{format_expense_register, format_expense_row, format_recorded};
pub use report::{format_bar, format_percentage, format_window_list, separator, truncate};
