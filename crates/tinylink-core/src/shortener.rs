use crate::alias::Alias;
use crate::error::ShortenerError;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct ShortenParams {
    /// The target URL to be shortened.
    pub url: String,
    /// Optional caller-chosen alias. A generated one is used when `None`.
    pub alias: Option<Alias>,
}

/// The outcome of a successful [`Shortener::shorten`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub id: i64,
    pub alias: Alias,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a mapping and returns the alias it was stored under.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortenedUrl>;

    /// Resolves an alias to its target URL.
    /// Returns `Err(NotFound)` if the alias does not exist.
    async fn resolve(&self, alias: &Alias) -> Result<String>;

    /// Deletes the mapping stored under an alias.
    /// Returns `Err(NotFound)` if the alias does not exist.
    async fn delete(&self, alias: &Alias) -> Result<()>;
}
