//! Shared types used across filing-alert.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for filing-type keys (e.g. the 8-K item number `"5.02"`).
///
/// Keys select a search URL from the configuration and label the digest
/// email. They must be non-empty and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilingKey(String);

impl FilingKey {
    /// Create a new `FilingKey` from a string.
    ///
    /// # Errors
    /// Returns error if the key is empty, has surrounding whitespace, or
    /// contains control characters (it ends up in a mail header).
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(key: &str) -> Result<(), ConfigError> {
        if key.is_empty() {
            return Err(ConfigError::InvalidKey("key must not be empty".to_string()));
        }
        if key.trim() != key {
            return Err(ConfigError::InvalidKey(format!(
                "key must not have surrounding whitespace, got '{key}'"
            )));
        }
        if key.chars().any(char::is_control) {
            return Err(ConfigError::InvalidKey(format!(
                "key must not contain control characters, got {key:?}"
            )));
        }
        Ok(())
    }
}

impl TryFrom<String> for FilingKey {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FilingKey> for String {
    fn from(key: FilingKey) -> Self {
        key.0
    }
}

impl fmt::Display for FilingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One filing row scraped from the search results table.
///
/// Only ever built from a row where all four fields were present and
/// non-empty; `filing_url` is absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Form and file label, e.g. `8-K (Current report)`
    pub form_file: String,
    /// Filer entity name
    pub entity_name: String,
    /// Absolute link to the filing
    pub filing_url: String,
    /// Filing date as shown on the source page
    pub filing_date: String,
}
