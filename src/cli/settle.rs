//! Settle CLI command

use clap::Args;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::models::GroupId;
use crate::reports::SettlementReport;
use crate::services::SettlementService;
use crate::storage::Storage;

/// Arguments of `settle`
#[derive(Args, Debug)]
pub struct SettleArgs {
    /// Group id
    #[arg(allow_hyphen_values = true)]
    pub group: GroupId,

    /// Participants sharing the costs, e.g. "@alice bob"
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub participants: Vec<String>,

    /// Settle between everyone who has recorded an expense
    #[arg(long)]
    pub all: bool,
}

/// Handle the settle command
pub fn handle_settle_command(
    storage: &Storage,
    settings: &Settings,
    args: SettleArgs,
) -> LedgerResult<()> {
    let participants = if args.all {
        let known = SettlementService::new(storage).contributors(&args.group)?;
        if known.is_empty() {
            println!("No expenses recorded yet.");
            return Ok(());
        }
        known
    } else {
        args.participants
    };

    let report = SettlementReport::generate(storage, &args.group, participants.as_slice())?;
    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}
