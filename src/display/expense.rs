//! Expense display formatting
//!
//! Register view of ledger rows. Rows are shown as stored, so a malformed
//! price still prints.

use super::report::truncate;
use crate::models::{LedgerRow, Money};

/// Format a single ledger row for display (register row)
pub fn format_expense_row(row: &LedgerRow, currency_symbol: &str) -> String {
    let amount = match row.amount() {
        Ok(amount) => amount.format_with_symbol(currency_symbol),
        Err(_) => format!("{} (?)", row.raw_amount().unwrap_or("")),
    };

    let mut line = format!(
        "{:19} {:15} {:15} {:>12}",
        row.raw_timestamp(),
        truncate(row.contributor(), 15),
        truncate(row.category(), 15),
        amount
    );
    if !row.note().is_empty() {
        line.push_str("  ");
        line.push_str(row.note());
    }
    line
}

/// Format ledger rows as a register
pub fn format_expense_register(rows: &[LedgerRow], currency_symbol: &str) -> String {
    if rows.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:19} {:15} {:15} {:>12}\n",
        "Date", "User", "Category", "Price"
    ));
    output.push_str(&"-".repeat(64));
    output.push('\n');

    for row in rows {
        output.push_str(&format_expense_row(row, currency_symbol));
        output.push('\n');
    }

    output
}

/// One-line confirmation after recording an expense
pub fn format_recorded(contributor: &str, category: &str, amount: Money, symbol: &str) -> String {
    format!(
        "Recorded {} for {} ({})",
        amount.format_with_symbol(symbol),
        contributor,
        category
    )
}
