//! Path management for group-ledger
//!
//! Provides XDG-compliant path resolution for configuration, ledgers and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `GROUP_LEDGER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/group-ledger` or `~/.config/group-ledger`
//! 3. Windows: `%APPDATA%\group-ledger`

use std::path::PathBuf;

use crate::error::LedgerError;
use crate::models::GroupId;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "GROUP_LEDGER_DATA_DIR";

/// Manages all paths used by group-ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Base directory for all group-ledger data
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Create a new LedgerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/group-ledger/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Directory holding one CSV ledger per group
    pub fn expenses_dir(&self) -> PathBuf {
        self.data_dir().join("expenses")
    }

    /// Directory holding one category list per group
    pub fn categories_dir(&self) -> PathBuf {
        self.data_dir().join("categories")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ledger file of a group (`data/expenses/<group>.csv`)
    pub fn expenses_file(&self, group: &GroupId) -> PathBuf {
        self.expenses_dir().join(format!("{}.csv", group))
    }

    /// Category list of a group (`data/categories/<group>.json`)
    pub fn categories_file(&self, group: &GroupId) -> PathBuf {
        self.categories_dir().join(format!("{}.json", group))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.expenses_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create expenses directory: {}", e)))?;

        std::fs::create_dir_all(self.categories_dir()).map_err(|e| {
            LedgerError::Io(format!("Failed to create categories directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if group-ledger has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| LedgerError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("group-ledger"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LedgerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("group-ledger"))
}
