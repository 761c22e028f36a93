//! Ledger records
//!
//! A ledger is stored as a flat table. [`LedgerRow`] is one stored row kept
//! verbatim as text, [`ExpenseRecord`] is the typed, validated view of it.
//! Rows are only ever appended; nothing in the crate rewrites or deletes them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Textual timestamp format of the `Date` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row of every ledger file, in column order
pub const LEDGER_HEADER: [&str; 5] = ["Date", "User", "Category", "Price", "Comment"];

const COL_DATE: usize = 0;
const COL_USER: usize = 1;
const COL_CATEGORY: usize = 2;
const COL_PRICE: usize = 3;
const COL_COMMENT: usize = 4;

/// Normalize an identity for matching: trim and drop one leading `@`
pub fn normalize_identity(name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix('@').unwrap_or(name).trim()
}

/// A single shared expense
///
/// The contributor is stored as a normalized identity, see
/// [`normalize_identity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub timestamp: NaiveDateTime,
    pub contributor: String,
    pub category: String,
    pub amount: Money,
    #[serde(default)]
    pub note: String,
}

impl ExpenseRecord {
    /// Create a validated record
    pub fn new(
        timestamp: NaiveDateTime,
        contributor: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        note: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let record = Self {
            timestamp,
            contributor: normalize_identity(&contributor.into()).to_string(),
            category: category.into().trim().to_string(),
            amount,
            note: note.into().trim().to_string(),
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.contributor.is_empty() {
            return Err(RecordError::EmptyField("User"));
        }
        if self.category.is_empty() {
            return Err(RecordError::EmptyField("Category"));
        }
        if !self.amount.is_positive() {
            return Err(RecordError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }

    /// Calendar date of the expense (time discarded)
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Render as stored text fields, in [`LEDGER_HEADER`] order
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.contributor.clone(),
            self.category.clone(),
            self.amount.to_string(),
            self.note.clone(),
        ]
    }
}

/// One stored ledger row, every field kept as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    /// 1-based line in the ledger file (the header is line 1)
    line: usize,
    fields: Vec<String>,
    /// Stored bytes, kept only when some field is not valid UTF-8
    raw: Option<Vec<Vec<u8>>>,
}

impl LedgerRow {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self {
            line,
            fields,
            raw: None,
        }
    }

    /// Build a row from stored bytes
    ///
    /// Fields that are not valid UTF-8 are read lossily for display, and the
    /// original bytes are kept so the row can still be written back verbatim.
    pub fn from_bytes(line: usize, fields: Vec<Vec<u8>>) -> Self {
        if fields.iter().all(|f| std::str::from_utf8(f).is_ok()) {
            let fields = fields
                .into_iter()
                .map(|f| String::from_utf8_lossy(&f).into_owned())
                .collect();
            return Self::new(line, fields);
        }

        Self {
            line,
            fields: fields
                .iter()
                .map(|f| String::from_utf8_lossy(f).into_owned())
                .collect(),
            raw: Some(fields),
        }
    }

    /// Whether some stored field is not valid UTF-8
    pub fn has_invalid_text(&self) -> bool {
        self.raw.is_some()
    }

    /// Fields as stored, byte for byte
    pub fn stored_fields(&self) -> Vec<&[u8]> {
        match &self.raw {
            Some(raw) => raw.iter().map(Vec::as_slice).collect(),
            None => self.fields.iter().map(String::as_bytes).collect(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// All fields in original column order, including any extra columns
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn raw_timestamp(&self) -> &str {
        self.field(COL_DATE).unwrap_or("")
    }

    pub fn contributor(&self) -> &str {
        self.field(COL_USER).unwrap_or("")
    }

    pub fn category(&self) -> &str {
        self.field(COL_CATEGORY).unwrap_or("")
    }

    pub fn raw_amount(&self) -> Option<&str> {
        self.field(COL_PRICE)
    }

    pub fn note(&self) -> &str {
        self.field(COL_COMMENT).unwrap_or("")
    }

    /// Parse the `Date` column; only `YYYY-MM-DD HH:MM:SS` is accepted
    pub fn timestamp(&self) -> Result<NaiveDateTime, RecordError> {
        let raw = self.raw_timestamp();
        let parsed = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .map_err(|_| RecordError::InvalidTimestamp(raw.to_string()))?;
        // chrono tolerates unpadded fields; the ledger format does not
        if parsed.format(TIMESTAMP_FORMAT).to_string() != raw {
            return Err(RecordError::InvalidTimestamp(raw.to_string()));
        }
        Ok(parsed)
    }

    pub fn date(&self) -> Result<NaiveDate, RecordError> {
        self.timestamp().map(|ts| ts.date())
    }

    /// Parse the `Price` column as a positive amount
    pub fn amount(&self) -> Result<Money, RecordError> {
        let raw = match self.raw_amount() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err(RecordError::MissingField("Price")),
        };
        let amount =
            Money::parse(raw).map_err(|_| RecordError::InvalidAmount(raw.to_string()))?;
        if !amount.is_positive() {
            return Err(RecordError::NonPositiveAmount(amount));
        }
        Ok(amount)
    }

    /// Parse the whole row into a typed record
    pub fn parse(&self) -> Result<ExpenseRecord, RecordError> {
        if self.has_invalid_text() {
            return Err(RecordError::InvalidText);
        }
        ExpenseRecord::new(
            self.timestamp()?,
            self.contributor(),
            self.category(),
            self.amount()?,
            self.note(),
        )
    }
}

impl From<&ExpenseRecord> for LedgerRow {
    fn from(record: &ExpenseRecord) -> Self {
        Self::new(0, record.to_fields())
    }
}

/// Why a record or row is not a well-formed expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    MissingField(&'static str),
    EmptyField(&'static str),
    InvalidTimestamp(String),
    InvalidAmount(String),
    NonPositiveAmount(Money),
    InvalidText,
    AmountOverflow(Money),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingField(name) => write!(f, "missing {} field", name),
            RecordError::EmptyField(name) => write!(f, "{} cannot be empty", name),
            RecordError::InvalidTimestamp(raw) => write!(
                f,
                "invalid timestamp '{}' (expected YYYY-MM-DD HH:MM:SS)",
                raw
            ),
            RecordError::InvalidAmount(raw) => write!(f, "invalid amount '{}'", raw),
            RecordError::NonPositiveAmount(amount) => {
                write!(f, "amount must be positive, got {}", amount)
            }
            RecordError::InvalidText => write!(f, "row is not valid UTF-8 text"),
            RecordError::AmountOverflow(amount) => {
                write!(f, "amount {} overflows the running total", amount)
            }
        }
    }
}

impl std::error::Error for RecordError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> LedgerRow {
        LedgerRow::new(2, fields.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_well_formed_row() {
        let record = row(&["2024-03-05 18:30:00", "Alice", "Food", "12.5", "pizza"])
            .parse()
            .unwrap();
        assert_eq!(record.contributor, "Alice");
        assert_eq!(record.amount, Money::from_cents(1250));
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_strict_timestamp_format() {
        assert!(row(&["2024-03-05", "A", "Food", "1"]).timestamp().is_err());
        assert!(row(&["2024-3-5 18:30:00", "A", "Food", "1"]).timestamp().is_err());
        assert!(row(&["05/03/2024 18:30:00", "A", "Food", "1"]).timestamp().is_err());
        assert!(row(&["2024-03-05T18:30:00", "A", "Food", "1"]).timestamp().is_err());
        assert!(row(&["2024-03-05 18:30:00", "A", "Food", "1"]).timestamp().is_ok());
    }

    #[test]
    fn test_amount_errors() {
        assert_eq!(
            row(&["2024-03-05 18:30:00", "A", "Food"]).amount(),
            Err(RecordError::MissingField("Price"))
        );
        assert_eq!(
            row(&["2024-03-05 18:30:00", "A", "Food", "ten"]).amount(),
            Err(RecordError::InvalidAmount("ten".into()))
        );
        assert_eq!(
            row(&["2024-03-05 18:30:00", "A", "Food", "0"]).amount(),
            Err(RecordError::NonPositiveAmount(Money::zero()))
        );
    }

    #[test]
    fn test_invalid_utf8_row() {
        let fields = vec![
            b"2024-03-02 10:00:00".to_vec(),
            b"B".to_vec(),
            b"Food".to_vec(),
            b"30".to_vec(),
            vec![0xff, 0xfe],
        ];
        let row = LedgerRow::from_bytes(3, fields);

        assert!(row.has_invalid_text());
        assert_eq!(row.amount(), Ok(Money::from_cents(3000)));
        assert_eq!(row.parse(), Err(RecordError::InvalidText));
        assert_eq!(row.stored_fields()[4], &[0xffu8, 0xfe][..]);

        let clean = LedgerRow::from_bytes(2, vec![b"x".to_vec()]);
        assert!(!clean.has_invalid_text());
        assert_eq!(clean.fields(), &["x".to_string()]);
    }

    #[test]
    fn test_missing_comment_reads_as_empty() {
        let record = row(&["2024-03-05 18:30:00", "A", "Food", "3"]).parse().unwrap();
        assert_eq!(record.note, "");
    }

    #[test]
    fn test_record_to_fields() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        let record = ExpenseRecord::new(ts, "Bob", "Rent", Money::from_cents(70000), "").unwrap();
        assert_eq!(
            record.to_fields(),
            vec!["2024-01-02 09:05:00", "Bob", "Rent", "700.00", ""]
        );
        assert_eq!(LedgerRow::from(&record).parse().unwrap(), record);
    }

    #[test]
    fn test_contributor_is_normalized() {
        let record = row(&["2024-03-05 18:30:00", " @alice ", "Food", "3"]).parse().unwrap();
        assert_eq!(record.contributor, "alice");
        assert_eq!(normalize_identity("@ bob"), "bob");
        assert_eq!(normalize_identity("@@bob"), "@bob");
    }

    #[test]
    fn test_new_rejects_bad_input() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            ExpenseRecord::new(ts, "Bob", "Rent", Money::from_cents(-1), ""),
            Err(RecordError::NonPositiveAmount(Money::from_cents(-1)))
        );
        assert_eq!(
            ExpenseRecord::new(ts, "  ", "Rent", Money::from_cents(1), ""),
            Err(RecordError::EmptyField("User"))
        );
    }
}
