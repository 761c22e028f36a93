//! Settlement Report
//!
//! Who spent what over the whole ledger, each participant's balance against
//! the average, and the transfers that even it out.

use crate::error::LedgerResult;
use crate::models::{GroupId, SettlementResult};
use crate::services::SettlementService;
use crate::storage::Storage;

const WIDTH: usize = 48;

/// Settlement report
#[derive(Debug, Clone)]
pub struct SettlementReport {
    pub group: GroupId,
    pub result: SettlementResult,
}

impl SettlementReport {
    /// Generate the report for the named participants of a group
    pub fn generate<S: AsRef<str>>(
        storage: &Storage,
        group: &GroupId,
        participants: &[S],
    ) -> LedgerResult<Self> {
        let result = SettlementService::new(storage).compute_settlement(group, participants)?;
        Ok(Self {
            group: group.clone(),
            result,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: crate::models::Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Settlement for group {}\n", self.group));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Total spent: {}   Average: {}\n\n",
            money(self.result.total_spent()),
            money(self.result.average)
        ));

        output.push_str(&format!("{:<20} {:>12} {:>12}\n", "User", "Spent", "Balance"));
        output.push_str(&"-".repeat(WIDTH));
        output.push('\n');
        for p in &self.result.participants {
            let balance = if p.balance.is_positive() {
                format!("+{}", money(p.balance))
            } else {
                money(p.balance)
            };
            output.push_str(&format!(
                "{:<20} {:>12} {:>12}\n",
                p.name,
                money(p.spent),
                balance
            ));
        }
        output.push('\n');

        if self.result.is_settled() {
            output.push_str("No settlement needed.\n");
        } else {
            output.push_str("Transfers:\n");
            for t in &self.result.transactions {
                output.push_str(&format!("  {} -> {}: {}\n", t.from, t.to, money(t.amount)));
            }
        }

        if !self.result.residual.is_zero() {
            output.push_str(&format!(
                "\nUnmatched rounding remainder: {}\n",
                money(self.result.residual)
            ));
        }

        output
    }
}
