//! Group identifier
//!
//! A group is one shared ledger (a chat, a flat, a trip). Its id doubles as
//! the file stem of the group's ledger and category files, so only characters
//! that are safe in file names are accepted. Chat ids are often negative
//! integers, hence `-` is allowed anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a group ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    /// Maximum accepted length
    pub const MAX_LEN: usize = 64;

    /// Parse and validate a group id
    pub fn parse(s: &str) -> Result<Self, GroupIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GroupIdError::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(GroupIdError::TooLong(s.len()));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(GroupIdError::InvalidChar(c));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GroupId {
    type Err = GroupIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GroupId {
    type Error = GroupIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.0
    }
}

/// Reasons a group id is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupIdError {
    Empty,
    TooLong(usize),
    InvalidChar(char),
}

impl fmt::Display for GroupIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupIdError::Empty => write!(f, "Group id cannot be empty"),
            GroupIdError::TooLong(len) => write!(
                f,
                "Group id too long ({} chars, max {})",
                len,
                GroupId::MAX_LEN
            ),
            GroupIdError::InvalidChar(c) => {
                write!(f, "Group id contains invalid character '{}'", c)
            }
        }
    }
}

impl std::error::Error for GroupIdError {}
