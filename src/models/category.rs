//! Category set of a group
//!
//! An ordered list of unique labels offered when entering an expense. The
//! set is advisory for reporting: totals always use the category written on
//! each record, even one that was later removed from the set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered set of unique category labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    /// Maximum length of a single label
    pub const MAX_LABEL_LEN: usize = 50;

    /// Build a set from labels, trimming, dropping blanks and duplicates
    /// (first occurrence wins)
    pub fn from_labels<I, S>(labels: I) -> Result<Self, CategoryValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() || set.iter().any(|l: &String| l == label) {
                continue;
            }
            if label.chars().count() > Self::MAX_LABEL_LEN {
                return Err(CategoryValidationError::NameTooLong(label.to_string()));
            }
            set.push(label.to_string());
        }
        if set.is_empty() {
            return Err(CategoryValidationError::Empty);
        }
        Ok(Self(set))
    }

    /// Parse a comma separated list ("Food, Rent, Kids")
    pub fn parse_list(text: &str) -> Result<Self, CategoryValidationError> {
        Self::from_labels(text.split(','))
    }

    /// Append `fallback` unless a label equal to it ignoring case exists
    pub fn with_fallback(mut self, fallback: &str) -> Self {
        let fallback = fallback.trim();
        if !fallback.is_empty() && !self.0.iter().any(|l| l.eq_ignore_ascii_case(fallback)) {
            self.0.push(fallback.to_string());
        }
        self
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    /// Look up a label ignoring case, returning the stored spelling
    pub fn find(&self, label: &str) -> Option<&str> {
        let label = label.trim();
        self.0
            .iter()
            .find(|l| l.as_str() == label)
            .or_else(|| self.0.iter().find(|l| l.to_lowercase() == label.to_lowercase()))
            .map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Validation errors for category sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    Empty,
    NameTooLong(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValidationError::Empty => {
                write!(f, "No valid categories found; enter at least one")
            }
            CategoryValidationError::NameTooLong(name) => write!(
                f,
                "Category name too long (max {} chars): {}",
                CategorySet::MAX_LABEL_LEN,
                name
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
