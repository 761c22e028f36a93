//! Period Statistics Report
//!
//! Spending of one reporting window broken down by category and by user.

use std::io::Write;

use csv::WriterBuilder;

use crate::display::report::{format_bar, format_percentage, separator, truncate};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{GroupId, Money, PeriodStats, ReportingWindow};
use crate::services::StatsService;
use crate::storage::Storage;

const WIDTH: usize = 64;

/// Period statistics report
#[derive(Debug, Clone)]
pub struct PeriodStatsReport {
    pub group: GroupId,
    pub window: ReportingWindow,
    pub stats: PeriodStats,
}

impl PeriodStatsReport {
    /// Generate the report for one window of a group's ledger
    pub fn generate(
        storage: &Storage,
        group: &GroupId,
        window: ReportingWindow,
    ) -> LedgerResult<Self> {
        let stats = StatsService::new(storage).compute_period_stats(group, &window)?;
        Ok(Self {
            group: group.clone(),
            window,
            stats,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str, bar_width: usize) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Expenses for {} ({} to {})\n",
            self.window.long_label(),
            self.window.start,
            self.window.end
        ));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');

        if self.stats.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "Total: {}   Records: {}\n",
            self.stats.total.format_with_symbol(currency_symbol),
            self.stats.record_count
        ));

        self.push_breakdown(
            &mut output,
            "By category",
            &self.stats.categories_by_amount(),
            currency_symbol,
            bar_width,
        );
        self.push_breakdown(
            &mut output,
            "By user",
            &self.stats.contributors_by_amount(),
            currency_symbol,
            bar_width,
        );

        output
    }

    fn push_breakdown(
        &self,
        output: &mut String,
        title: &str,
        entries: &[(&str, Money)],
        currency_symbol: &str,
        bar_width: usize,
    ) {
        output.push_str(&format!("\n{}\n", title));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        let max = entries
            .first()
            .map(|(_, amount)| amount.as_f64())
            .unwrap_or(0.0);

        for (name, amount) in entries {
            output.push_str(&format!(
                "  {:<20} {:>12} {:>6} {}\n",
                truncate(name, 20),
                amount.format_with_symbol(currency_symbol),
                format_percentage(self.stats.share(*amount)),
                format_bar(amount.as_f64(), max, bar_width)
            ));
        }
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv_writer = WriterBuilder::new().from_writer(writer);
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

        csv_writer
            .write_record([
                "Window",
                "Start Date",
                "End Date",
                "Breakdown",
                "Name",
                "Amount",
                "Percentage",
            ])
            .map_err(export_err)?;

        let start = self.window.start.to_string();
        let end = self.window.end.to_string();
        let label = self.window.long_label();

        let sections = [
            ("Category", self.stats.categories_by_amount()),
            ("User", self.stats.contributors_by_amount()),
        ];
        for (breakdown, entries) in &sections {
            for (name, amount) in entries {
                let amount_text = amount.to_string();
                let share = format!("{:.2}", self.stats.share(*amount));
                csv_writer
                    .write_record([
                        label.as_str(),
                        start.as_str(),
                        end.as_str(),
                        *breakdown,
                        *name,
                        amount_text.as_str(),
                        share.as_str(),
                    ])
                    .map_err(export_err)?;
            }
        }

        let total = self.stats.total.to_string();
        let total_pct = if self.stats.total.is_zero() { "0.00" } else { "100.00" };
        csv_writer
            .write_record([
                label.as_str(),
                start.as_str(),
                end.as_str(),
                "TOTAL",
                "",
                total.as_str(),
                total_pct,
            ])
            .map_err(export_err)?;

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}
