//! Storage layer for group-ledger
//!
//! Provides per-group CSV ledgers, per-group JSON category lists with atomic
//! writes, and access to the audit log. A single [`Storage`] handle is built
//! once by the caller and passed by reference into every service.

pub mod categories;
pub mod file_io;
pub mod ledger;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use ledger::{Ledger, LedgerRepository};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub ledger: LedgerRepository,
    pub categories: CategoryRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.clone()),
            categories: CategoryRepository::new(paths.clone()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a mutation in the audit log
    pub fn log_audit(&self, entry: &AuditEntry) -> Result<(), LedgerError> {
        self.audit.log(entry)
    }

    /// Check if storage has been initialized (settings saved)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
