//! Audit entry data structures
//!
//! Defines the structure of audit log entries: which ledger mutation
//! happened, to which group, and the value written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::GroupId;

/// Types of mutations that can be audited
///
/// The ledger itself is append-only, so there is no update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A new value was appended
    Append,
    /// A stored value was replaced wholesale
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Append => write!(f, "APPEND"),
            Operation::Replace => write!(f, "REPLACE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Expense,
    CategorySet,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::CategorySet => write!(f, "CategorySet"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Group whose data changed
    pub group: GroupId,

    /// Short human-readable description (e.g., "Alice: Food 12.50")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// JSON representation of the value before the operation (replacements)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the value written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create an entry for an appended value
    pub fn append<T: Serialize>(
        entity_type: EntityType,
        group: &GroupId,
        summary: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Append,
            entity_type,
            group: group.clone(),
            summary,
            before: None,
            after: serde_json::to_value(entity).ok(),
        }
    }

    /// Create an entry for a replaced value
    pub fn replace<T: Serialize>(
        entity_type: EntityType,
        group: &GroupId,
        summary: Option<String>,
        before: Option<&T>,
        after: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Replace,
            entity_type,
            group: group.clone(),
            summary,
            before: before.and_then(|b| serde_json::to_value(b).ok()),
            after: serde_json::to_value(after).ok(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} group={}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.group
        );

        if let Some(summary) = &self.summary {
            output.push_str(&format!(" ({})", summary));
        }

        output
    }
}
