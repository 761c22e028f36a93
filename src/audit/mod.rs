//! Audit logging system for group-ledger
//!
//! Records every ledger mutation (expense appended, category set replaced)
//! in an append-only JSONL audit log, next to the `tracing` diagnostics.
//!
//! # Example
//!
//! ```rust,ignore
//! use group_ledger::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::append(EntityType::Expense, &group, None, &record);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
