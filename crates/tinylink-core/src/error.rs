use thiserror::Error;

/// Errors raised by [`Repository`][crate::Repository] backends.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("alias already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors raised by [`Shortener`][crate::Shortener] implementations.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
    #[error("alias not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(alias) => Self::AliasConflict(alias),
            other => Self::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_becomes_alias_conflict() {
        let err = ShortenerError::from(StorageError::Conflict("abc".into()));
        assert!(matches!(err, ShortenerError::AliasConflict(alias) if alias == "abc"));
    }

    #[test]
    fn other_storage_errors_keep_their_message() {
        let err = ShortenerError::from(StorageError::Timeout("pool timed out".into()));
        match err {
            ShortenerError::Storage(message) => {
                assert_eq!(message, "storage operation timed out: pool timed out")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
