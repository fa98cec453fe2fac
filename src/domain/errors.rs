use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Field-level validation failure
///
/// Raised at the input boundary, before any repository is touched.
/// `details` maps a field name to a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub details: BTreeMap<String, String>,
}

impl ValidationError {
    /// Creates an error for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut details = BTreeMap::new();
        details.insert(field.into(), message.into());
        Self { details }
    }

    /// Adds another field failure; the first message recorded for a field wins
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.details.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Returns `Err(self)` if any failure was recorded
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Message recorded for `field`, if any
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.details.get(field).map(String::as_str)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.details.values().map(String::as_str).collect();
        write!(f, "Validation error: {}", messages.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised by the key-value store behind the repositories
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data under key '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;
