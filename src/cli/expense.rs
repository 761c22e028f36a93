//! Expense CLI commands
//!
//! Recording and listing a group's expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_register, format_recorded};
use crate::error::LedgerResult;
use crate::models::GroupId;
use crate::services::{CategoryService, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Group id
        #[arg(allow_hyphen_values = true)]
        group: GroupId,
        /// Who paid
        #[arg(short, long)]
        user: String,
        /// Category (must be one of the group's categories)
        #[arg(short, long)]
        category: String,
        /// Price, e.g. "25.50" or "25,50"
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        /// Optional comment
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List recent expenses, newest first
    List {
        /// Group id
        #[arg(allow_hyphen_values = true)]
        group: GroupId,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            group,
            user,
            category,
            amount,
            note,
        } => {
            let categories = CategoryService::new(storage, &settings.fallback_category);
            let record = service.add(&group, &categories, &user, &category, &amount, &note)?;
            println!(
                "{}",
                format_recorded(
                    &record.contributor,
                    &record.category,
                    record.amount,
                    &settings.currency_symbol
                )
            );
        }

        ExpenseCommands::List { group, limit } => {
            let rows = service.list(&group, limit)?;
            print!("{}", format_expense_register(&rows, &settings.currency_symbol));
        }
    }

    Ok(())
}
