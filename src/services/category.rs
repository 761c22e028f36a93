//! Category service
//!
//! Manages each group's list of expense categories. Lists are entered as
//! comma separated text and always end with the fallback category from the
//! settings (normally "Other").

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategorySet, GroupId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
    fallback: &'a str,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service appending `fallback` to every list
    pub fn new(storage: &'a Storage, fallback: &'a str) -> Self {
        Self { storage, fallback }
    }

    /// Current categories of a group, `None` if never configured
    pub fn get(&self, group: &GroupId) -> LedgerResult<Option<CategorySet>> {
        self.storage.categories.get(group)
    }

    /// Current categories of a group, failing if none are configured
    pub fn require(&self, group: &GroupId) -> LedgerResult<CategorySet> {
        self.get(group)?
            .ok_or_else(|| LedgerError::categories_not_found(group.as_str()))
    }

    /// Replace a group's categories from comma separated text
    pub fn set_from_text(&self, group: &GroupId, text: &str) -> LedgerResult<CategorySet> {
        let set = CategorySet::parse_list(text)
            .map_err(|e| LedgerError::Validation(e.to_string()))?
            .with_fallback(self.fallback);

        let before = self.storage.categories.get(group)?;
        self.storage.categories.save(group, &set)?;

        self.storage.log_audit(&AuditEntry::replace(
            EntityType::CategorySet,
            group,
            Some(set.to_string()),
            before.as_ref(),
            &set,
        ))?;

        info!(group = %group, categories = set.len(), "category set replaced");
        Ok(set)
    }
}
