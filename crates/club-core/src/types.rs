//! Core type definitions with validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Client names are lowercase ASCII letters, digits, `_` and `-`.
static CLIENT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("client name pattern is valid"));

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The client name contains characters outside `[a-z0-9_-]`.
    #[error("invalid client name: {value}")]
    InvalidClientName { value: String },

    /// A clock time was not in `HH:MM` form or out of range.
    #[error("invalid time: {value}")]
    InvalidTime { value: String },
}

/// A validated client name.
///
/// Names identify a client for as long as they are inside the club. Ordering
/// is plain byte-wise string ordering, which is the order the end-of-day
/// sweep walks the registry in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientName(String);

impl ClientName {
    /// Creates a new name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "client name",
            });
        }
        if !CLIENT_NAME_RE.is_match(&name) {
            return Err(ValidationError::InvalidClientName { value: name });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Formats a minute count as `HH:MM`.
///
/// Hours are not wrapped at 24, so cumulative usage renders as-is.
pub fn format_usage(minutes: u64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
