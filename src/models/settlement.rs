//! Settlement plan types
//!
//! The solver itself lives in `services::settlement`; these are the values it
//! hands back to reports and the CLI.

use serde::Serialize;
use std::fmt;

use super::money::Money;

/// One payer-to-payee transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

/// A participant's spend and signed balance against the average
///
/// Positive balance: the group owes them. Negative: they owe the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantBalance {
    pub name: String,
    pub spent: Money,
    pub balance: Money,
}

/// Outcome of a settlement request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementResult {
    /// Participants in request order (normalized, deduplicated)
    pub participants: Vec<ParticipantBalance>,
    pub average: Money,
    pub transactions: Vec<Transfer>,
    /// Balance left unmatched after the sweep because of cent rounding
    pub residual: Money,
}

impl SettlementResult {
    pub fn total_spent(&self) -> Money {
        self.participants.iter().map(|p| p.spent).sum()
    }

    pub fn spent_of(&self, name: &str) -> Option<Money> {
        self.participants
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.spent)
    }

    pub fn balance_of(&self, name: &str) -> Option<Money> {
        self.participants
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.balance)
    }

    pub fn balance_sum(&self) -> Money {
        self.participants.iter().map(|p| p.balance).sum()
    }

    /// Nothing to settle: nobody spent anything or the plan is empty
    pub fn is_settled(&self) -> bool {
        self.total_spent().is_zero() || self.transactions.is_empty()
    }

    /// Each participant's effective spend once every transfer is paid
    pub fn positions_after_transfers(&self) -> Vec<(String, Money)> {
        self.participants
            .iter()
            .map(|p| {
                let paid: Money = self
                    .transactions
                    .iter()
                    .filter(|t| t.from == p.name)
                    .map(|t| t.amount)
                    .sum();
                let received: Money = self
                    .transactions
                    .iter()
                    .filter(|t| t.to == p.name)
                    .map(|t| t.amount)
                    .sum();
                (p.name.clone(), p.spent + paid - received)
            })
            .collect()
    }
}
