//! Ledger repository for CSV storage
//!
//! Each group's expenses live in `data/expenses/<group>.csv`, one row per
//! expense under the header `Date,User,Category,Price,Comment`. The
//! repository only appends and reads; analytics happen in the services.
//!
//! Appends assume a single writer per group. Readers never mutate the file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, warn};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{ExpenseRecord, GroupId, LedgerRow, LEDGER_HEADER};

/// Rows of one group's ledger as stored, plus the header they were read with
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub header: Vec<String>,
    pub rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Repository for per-group expense ledgers
pub struct LedgerRepository {
    paths: LedgerPaths,
}

impl LedgerRepository {
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    fn path(&self, group: &GroupId) -> PathBuf {
        self.paths.expenses_file(group)
    }

    /// Check whether a group has any ledger file yet
    pub fn exists(&self, group: &GroupId) -> bool {
        self.path(group).exists()
    }

    /// Append one record, writing the header first for a new ledger
    pub fn append(&self, group: &GroupId, record: &ExpenseRecord) -> Result<(), LedgerError> {
        let path = self.path(group);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let needs_header = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer.write_record(LEDGER_HEADER)?;
        }
        writer.write_record(record.to_fields())?;
        writer
            .flush()
            .map_err(|e| LedgerError::Storage(format!("Failed to flush ledger: {}", e)))?;

        let mut file = writer
            .into_inner()
            .map_err(|e| LedgerError::Storage(format!("Failed to finish ledger write: {}", e)))?;
        file.flush()
            .map_err(|e| LedgerError::Storage(format!("Failed to flush ledger: {}", e)))?;
        file.sync_all()
            .map_err(|e| LedgerError::Storage(format!("Failed to sync ledger: {}", e)))?;

        debug!(group = %group, path = %path.display(), "appended ledger row");
        Ok(())
    }

    /// Read every row of a group's ledger verbatim
    ///
    /// A missing ledger reads as empty. Rows may have fewer or more columns
    /// than the header, or bytes that are not UTF-8; interpreting them is up
    /// to the caller.
    pub fn load(&self, group: &GroupId) -> Result<Ledger, LedgerError> {
        let path = self.path(group);
        if !path.exists() {
            return Ok(Ledger {
                header: LEDGER_HEADER.iter().map(|s| s.to_string()).collect(),
                rows: Vec::new(),
            });
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

        let header: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect();
        if header.iter().map(String::as_str).ne(LEDGER_HEADER.iter().copied()) {
            warn!(group = %group, ?header, "ledger header differs from the expected columns");
        }

        let mut rows = Vec::new();
        for (index, result) in reader.byte_records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 2);
            let row = LedgerRow::from_bytes(line, record.iter().map(<[u8]>::to_vec).collect());
            if row.has_invalid_text() {
                warn!(group = %group, line, "ledger row is not valid UTF-8");
            }
            rows.push(row);
        }

        debug!(group = %group, rows = rows.len(), "loaded ledger");
        Ok(Ledger { header, rows })
    }
}
