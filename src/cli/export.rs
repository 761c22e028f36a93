//! CLI command for ledger export
//!
//! Writes the raw rows of one reporting window to a CSV file.

use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::export::export_window;
use crate::models::GroupId;
use crate::services::PeriodService;
use crate::storage::Storage;

/// Arguments of `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Group id
    #[arg(allow_hyphen_values = true)]
    pub group: GroupId,

    /// Window number from `report periods`, or its label
    #[arg(short, long)]
    pub window: String,

    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> LedgerResult<()> {
    let window = PeriodService::new(storage).find_export_window(&args.group, &args.window)?;

    let file = File::create(&args.output).map_err(|e| {
        LedgerError::Export(format!(
            "Failed to create file {}: {}",
            args.output.display(),
            e
        ))
    })?;

    let count = export_window(storage, &args.group, &window, BufWriter::new(file))?;
    println!(
        "Exported {} expenses from {} to: {}",
        count,
        window,
        args.output.display()
    );
    Ok(())
}
