//! Store errors

use std::fmt;

/// Errors surfaced by the store
///
/// Absence is not an error for `get`, `check_and_set` or `delete`. This type only
/// exists for the lookups that require a key to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key has no entry
    NotFound(String),
}

impl StoreError {
    /// The key this error refers to
    pub fn key(&self) -> &str {
        match self {
            StoreError::NotFound(key) => key,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(key) => write!(f, "\"{}\" was not found", key),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_key() {
        let err = StoreError::NotFound("test".to_string());
        assert_eq!(err.to_string(), "\"test\" was not found");
        assert_eq!(err.key(), "test");
    }
}
