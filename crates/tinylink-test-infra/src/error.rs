use std::result::Result as StdResult;
use thiserror::Error;

/// Errors that can occur when setting up test fixtures.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for `Result` with `TestInfraError`.
pub type Result<T> = StdResult<T, TestInfraError>;
