//! CLI commands for reports
//!
//! Lists a group's reporting windows and prints per-window statistics.

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::display::report::format_window_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::GroupId;
use crate::reports::PeriodStatsReport;
use crate::services::{PeriodService, StatsService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List the reporting windows available for a group
    Periods {
        /// Group id
        #[arg(allow_hyphen_values = true)]
        group: GroupId,
    },

    /// Spending by category and by user
    Stats {
        /// Group id
        #[arg(allow_hyphen_values = true)]
        group: GroupId,

        /// Window number from `report periods`, or its label ("March", "2024",
        /// "All period"). Every window is shown when omitted.
        #[arg(short, long)]
        window: Option<String>,

        /// Output file for CSV export
        #[arg(short, long, requires = "window")]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Periods { group } => {
            let windows = PeriodService::new(storage).derive_windows(&group)?;
            print!("{}", format_window_list(&windows));
            Ok(())
        }
        ReportCommands::Stats {
            group,
            window,
            output,
        } => handle_stats_report(storage, settings, group, window, output),
    }
}

/// Handle the stats report
fn handle_stats_report(
    storage: &Storage,
    settings: &Settings,
    group: GroupId,
    window: Option<String>,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let reports = match window {
        Some(selector) => {
            let window = PeriodService::new(storage).find_window(&group, &selector)?;
            vec![PeriodStatsReport::generate(storage, &group, window)?]
        }
        None => StatsService::new(storage)
            .compute_all(&group)?
            .into_iter()
            .map(|(window, stats)| PeriodStatsReport {
                group: group.clone(),
                window,
                stats,
            })
            .collect(),
    };

    if reports.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!(
            "{}",
            report.format_terminal(&settings.currency_symbol, settings.bar_width)
        );
    }

    if let (Some(path), Some(report)) = (output, reports.first()) {
        let file = File::create(&path).map_err(|e| {
            LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("\nReport exported to: {}", path.display());
    }

    Ok(())
}
