//! Expense service
//!
//! Appends expenses to a group's ledger. `append_record` is the validated
//! core operation; `add` is the front-end path that also checks the category
//! against the group's configured set and parses the amount as typed.

use chrono::{Local, NaiveDateTime, Timelike};
use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, GroupId, LedgerRow, Money, RecordError};
use crate::storage::Storage;

use super::category::CategoryService;

/// Service for recording expenses
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Append an expense stamped with the current local time
    pub fn append_record(
        &self,
        group: &GroupId,
        contributor: &str,
        category: &str,
        amount: Money,
        note: &str,
    ) -> LedgerResult<ExpenseRecord> {
        let now = Local::now().naive_local();
        let now = now.with_nanosecond(0).unwrap_or(now);
        self.append_record_at(group, now, contributor, category, amount, note)
    }

    /// Append an expense with an explicit timestamp
    pub fn append_record_at(
        &self,
        group: &GroupId,
        timestamp: NaiveDateTime,
        contributor: &str,
        category: &str,
        amount: Money,
        note: &str,
    ) -> LedgerResult<ExpenseRecord> {
        let record = ExpenseRecord::new(timestamp, contributor, category, amount, note)
            .map_err(|e| match e {
                RecordError::NonPositiveAmount(_) => {
                    LedgerError::Validation(format!("Price must be positive, got {}", amount))
                }
                other => LedgerError::Validation(other.to_string()),
            })?;

        self.storage.ledger.append(group, &record)?;

        // The row is already stored; a missing audit line must not report failure
        if let Err(e) = self.storage.log_audit(&AuditEntry::append(
            EntityType::Expense,
            group,
            Some(format!(
                "{}: {} {}",
                record.contributor, record.category, record.amount
            )),
            &record,
        )) {
            warn!(group = %group, error = %e, "expense recorded but audit entry failed");
        }

        info!(
            group = %group,
            contributor = %record.contributor,
            category = %record.category,
            amount = %record.amount,
            "expense recorded"
        );
        Ok(record)
    }

    /// Record an expense as entered by a user
    ///
    /// The group must have categories configured and `category` must be one
    /// of them (matched ignoring case). `amount_text` accepts `,` or `.` as
    /// the decimal separator.
    pub fn add(
        &self,
        group: &GroupId,
        categories: &CategoryService<'_>,
        contributor: &str,
        category: &str,
        amount_text: &str,
        note: &str,
    ) -> LedgerResult<ExpenseRecord> {
        let set = categories.require(group)?;
        let category = set.find(category).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Unknown category '{}'. Choose one of: {}",
                category.trim(),
                set
            ))
        })?;

        let amount = Money::parse(amount_text).map_err(|_| {
            LedgerError::Validation(format!(
                "Invalid price '{}'. Enter a number such as 25.50 or 100",
                amount_text.trim()
            ))
        })?;

        self.append_record(group, contributor, category, amount, note)
    }

    /// Most recent rows first, at most `limit`
    ///
    /// Rows whose timestamp cannot be read are listed last.
    pub fn list(&self, group: &GroupId, limit: usize) -> LedgerResult<Vec<LedgerRow>> {
        let mut rows = self.storage.ledger.load(group)?.rows;
        rows.sort_by_key(|row| std::cmp::Reverse(row.timestamp().ok()));
        rows.truncate(limit);
        Ok(rows)
    }
}
