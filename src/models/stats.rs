//! Per-window spending totals

use serde::Serialize;
use std::collections::BTreeMap;

use super::money::Money;
use super::record::{ExpenseRecord, RecordError};

/// Spending totals of one reporting window
///
/// The breakdown maps only hold keys that occur in the window. A missing key
/// means "no spend", never "zero recorded spend". Contributor keys are
/// normalized identities (no leading `@`), the same names settlement uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodStats {
    pub total: Money,
    pub by_category: BTreeMap<String, Money>,
    pub by_contributor: BTreeMap<String, Money>,
    pub record_count: usize,
}

impl PeriodStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one record into all three totals
    ///
    /// Nothing changes if any total would overflow.
    pub fn add(&mut self, record: &ExpenseRecord) -> Result<(), RecordError> {
        let amount = record.amount;
        let overflow = || RecordError::AmountOverflow(amount);

        let total = self.total.checked_add(amount).ok_or_else(overflow)?;
        let category = self
            .by_category
            .get(&record.category)
            .copied()
            .unwrap_or_else(Money::zero)
            .checked_add(amount)
            .ok_or_else(overflow)?;
        let contributor = self
            .by_contributor
            .get(&record.contributor)
            .copied()
            .unwrap_or_else(Money::zero)
            .checked_add(amount)
            .ok_or_else(overflow)?;

        self.total = total;
        self.by_category.insert(record.category.clone(), category);
        self.by_contributor
            .insert(record.contributor.clone(), contributor);
        self.record_count += 1;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Share of the total as a percentage (0.0 when nothing was spent)
    pub fn share(&self, amount: Money) -> f64 {
        if self.total.is_zero() {
            0.0
        } else {
            amount.cents() as f64 / self.total.cents() as f64 * 100.0
        }
    }

    /// Categories sorted by amount, largest first; ties by name
    pub fn categories_by_amount(&self) -> Vec<(&str, Money)> {
        sorted_desc(&self.by_category)
    }

    /// Contributors sorted by amount, largest first; ties by name
    pub fn contributors_by_amount(&self) -> Vec<(&str, Money)> {
        sorted_desc(&self.by_contributor)
    }
}

fn sorted_desc(map: &BTreeMap<String, Money>) -> Vec<(&str, Money)> {
    let mut entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}
