use crate::alias::Alias;
use crate::error::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored alias to URL mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    /// Identifier assigned by the store. Monotonic, never reused.
    pub id: i64,
    /// The alias the URL is stored under.
    pub alias: Alias,
    /// The target URL, treated as opaque text by the store.
    pub url: String,
}

/// The read half of [`Repository`].
///
/// Aliases are resolved through [`get`](Self::get). [`exists`](Self::exists)
/// is never consulted before an insert; conflicts come from the insert itself.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the mapping for a given alias.
    /// Returns `None` if the alias does not exist.
    async fn get(&self, alias: &Alias) -> Result<Option<UrlMapping>>;

    /// Checks whether an alias already exists in the repository.
    async fn exists(&self, alias: &Alias) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new mapping and returns its id.
    ///
    /// Returns `Err(StorageError::Conflict)` if the alias already exists.
    /// Implementations must detect the conflict atomically with the insert,
    /// never through a prior read.
    async fn insert(&self, alias: &Alias, url: &str) -> Result<i64>;

    /// Deletes the mapping for a given alias.
    /// Returns `true` if the mapping existed and was removed.
    async fn delete(&self, alias: &Alias) -> Result<bool>;
}
