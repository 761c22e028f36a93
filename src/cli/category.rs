//! Category CLI commands
//!
//! Implements CLI commands for a group's category list.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::category::format_category_list;
use crate::error::LedgerResult;
use crate::models::GroupId;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Replace the group's categories with a comma separated list
    Set {
        /// Group id
        #[arg(allow_hyphen_values = true)]
        group: GroupId,
        /// Categories, e.g. "Restaurants, Apartment, Kids"
        categories: String,
    },

    /// List the group's categories
    List {
        /// Group id
        #[arg(allow_hyphen_values = true)]
        group: GroupId,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> LedgerResult<()> {
    let service = CategoryService::new(storage, &settings.fallback_category);

    match cmd {
        CategoryCommands::Set { group, categories } => {
            let set = service.set_from_text(&group, &categories)?;
            println!("Categories for group {} set to: {}", group, set);
        }

        CategoryCommands::List { group } => {
            let set = service.get(&group)?;
            print!("{}", format_category_list(&group, set.as_ref()));
        }
    }

    Ok(())
}
