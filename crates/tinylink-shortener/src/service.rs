use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::{
    Alias, Repository, ShortenParams, ShortenedUrl, Shortener, ShortenerError, StorageError,
};
use tinylink_generator::Generator;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;
use url::Url;

/// Validates that the URL is a well-formed absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<(), ShortenerError> {
    if url.trim().is_empty() {
        return Err(ShortenerError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let parsed = Url::parse(url).map_err(|e| ShortenerError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {scheme}"
            )))
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ShortenerError::InvalidUrl(format!("URL must have a host: {url}")));
    }

    Ok(())
}

/// Tuning knobs for [`ShortenerService`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// How many generated aliases to try before surfacing a conflict.
    /// Caller-chosen aliases are always tried exactly once.
    #[builder(default = 3)]
    pub max_attempts: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - URL validation
/// - alias generation when the caller does not pick one
/// - mapping store outcomes onto [`ShortenerError`]
///
/// Alias uniqueness is enforced by the repository on insert. A generated
/// alias that collides is replaced and retried up to
/// [`ShortenerSettings::max_attempts`] times, with no backoff.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_settings(repository, generator, ShortenerSettings::default())
    }

    pub fn with_settings(repository: R, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings,
        }
    }

    fn generate_alias(&self) -> Alias {
        self.generator.generate().into()
    }

    async fn insert(&self, alias: Alias, url: &str) -> Result<ShortenedUrl, StorageError> {
        let id = self.repository.insert(&alias, url).await?;
        Ok(ShortenedUrl { id, alias })
    }

    async fn insert_generated(&self, url: &str) -> Result<ShortenedUrl, ShortenerError> {
        let attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let alias = self.generate_alias();
            match self.insert(alias, url).await {
                Ok(saved) => return Ok(saved),
                Err(StorageError::Conflict(alias)) if attempt < attempts => {
                    warn!(alias = %alias, attempt, "generated alias collided, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortenedUrl, ShortenerError> {
        validate_url(&params.url)?;

        let saved = match params.alias {
            Some(alias) => self.insert(alias, &params.url).await?,
            None => self.insert_generated(&params.url).await?,
        };

        info!(id = saved.id, alias = %saved.alias, "url saved");
        Ok(saved)
    }

    async fn resolve(&self, alias: &Alias) -> Result<String, ShortenerError> {
        match self.repository.get(alias).await? {
            Some(mapping) => {
                debug!(alias = %alias, url = %mapping.url, "resolved alias");
                Ok(mapping.url)
            }
            None => {
                debug!(alias = %alias, "alias not found");
                Err(ShortenerError::NotFound(alias.to_string()))
            }
        }
    }

    async fn delete(&self, alias: &Alias) -> Result<(), ShortenerError> {
        if self.repository.delete(alias).await? {
            info!(alias = %alias, "url deleted");
            Ok(())
        } else {
            Err(ShortenerError::NotFound(alias.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinylink_core::repository::{ReadRepository, UrlMapping};
    use tinylink_generator::{RandomGenerator, SeqGenerator};
    use tinylink_storage::InMemoryRepository;

    fn test_service() -> ShortenerService<InMemoryRepository, SeqGenerator> {
        ShortenerService::new(InMemoryRepository::new(), SeqGenerator::with_prefix("wh"))
    }

    fn params(url: &str, alias: Option<&str>) -> ShortenParams {
        ShortenParams {
            url: url.to_string(),
            alias: alias.map(|a| Alias::new(a).unwrap()),
        }
    }

    #[tokio::test]
    async fn shorten_with_generated_alias() {
        let service = test_service();

        let saved = service.shorten(params("https://example.com", None)).await.unwrap();
        assert_eq!(saved.alias.as_str(), "wh000000");
    }

    #[tokio::test]
    async fn shorten_with_random_alias_has_default_length() {
        let service = ShortenerService::new(InMemoryRepository::new(), RandomGenerator::default());

        let saved = service.shorten(params("https://example.com", None)).await.unwrap();
        assert_eq!(saved.alias.as_str().len(), 8);
        assert_eq!(service.resolve(&saved.alias).await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn shorten_with_custom_alias() {
        let service = test_service();

        let saved = service
            .shorten(params("https://example.com", Some("my-alias")))
            .await
            .unwrap();
        assert_eq!(saved.alias.as_str(), "my-alias");
    }

    #[tokio::test]
    async fn shorten_with_duplicate_alias_fails_and_keeps_first() {
        let service = test_service();

        service
            .shorten(params("https://example1.com", Some("my-alias")))
            .await
            .unwrap();
        let err = service
            .shorten(params("https://example2.com", Some("my-alias")))
            .await
            .unwrap_err();

        assert!(matches!(err, ShortenerError::AliasConflict(_)));
        let alias = Alias::new("my-alias").unwrap();
        assert_eq!(service.resolve(&alias).await.unwrap(), "https://example1.com");
    }

    #[tokio::test]
    async fn shorten_with_invalid_url_fails_without_storing() {
        let service = test_service();

        let err = service
            .shorten(params("not-a-url", Some("x")))
            .await
            .unwrap_err();

        assert!(matches!(err, ShortenerError::InvalidUrl(_)));
        let alias = Alias::new("x").unwrap();
        assert!(matches!(
            service.resolve(&alias).await.unwrap_err(),
            ShortenerError::NotFound(_)
        ));
    }

    #[test]
    fn validate_url_cases() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/a?b=c#d").is_ok());
        assert!(validate_url("").is_err());
        assert!(validate_url("   ").is_err());
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("javascript:alert(1)").is_err());
        assert!(validate_url("http://").is_err());
    }

    #[tokio::test]
    async fn generated_collisions_are_retried() {
        let service = test_service();
        let repository = Arc::clone(&service.repository);
        repository
            .insert(&Alias::new_unchecked("wh000000"), "https://taken.example")
            .await
            .unwrap();
        repository
            .insert(&Alias::new_unchecked("wh000001"), "https://taken.example")
            .await
            .unwrap();

        let saved = service.shorten(params("https://example.com", None)).await.unwrap();
        assert_eq!(saved.alias.as_str(), "wh000002");
    }

    #[tokio::test]
    async fn generated_collisions_give_up_after_max_attempts() {
        let service = ShortenerService::with_settings(
            InMemoryRepository::new(),
            SeqGenerator::with_prefix("wh"),
            ShortenerSettings::builder().max_attempts(2).build(),
        );
        for taken in ["wh000000", "wh000001", "wh000002"] {
            service
                .repository
                .insert(&Alias::new_unchecked(taken), "https://taken.example")
                .await
                .unwrap();
        }

        let err = service
            .shorten(params("https://example.com", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::AliasConflict(ref a) if a == "wh000001"));
        assert_eq!(service.repository.len(), 3);
    }

    #[tokio::test]
    async fn custom_alias_conflict_is_not_retried() {
        let service = test_service();
        service
            .shorten(params("https://example.com", Some("mine")))
            .await
            .unwrap();

        let err = service
            .shorten(params("https://other.example", Some("mine")))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::AliasConflict(_)));
        // the generator was never consulted
        let next = service.shorten(params("https://example.com", None)).await.unwrap();
        assert_eq!(next.alias.as_str(), "wh000000");
    }

    #[tokio::test]
    async fn resolve_nonexistent_alias() {
        let service = test_service();

        let err = service
            .resolve(&Alias::new("nonexistent").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_existing_alias() {
        let service = test_service();
        let alias = Alias::new("abc123").unwrap();

        service
            .shorten(params("https://example.com", Some("abc123")))
            .await
            .unwrap();
        service.delete(&alias).await.unwrap();

        let err = service.resolve(&alias).await.unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_nonexistent_alias_reports_not_found() {
        let service = test_service();
        service
            .shorten(params("https://example.com", Some("keep")))
            .await
            .unwrap();

        let err = service
            .delete(&Alias::new("nonexistent").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
        assert_eq!(service.repository.len(), 1);
    }

    struct BrokenRepository;

    #[async_trait]
    impl ReadRepository for BrokenRepository {
        async fn get(&self, _alias: &Alias) -> tinylink_core::repository::Result<Option<UrlMapping>> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }

        async fn exists(&self, _alias: &Alias) -> tinylink_core::repository::Result<bool> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }
    }

    #[async_trait]
    impl Repository for BrokenRepository {
        async fn insert(&self, _alias: &Alias, _url: &str) -> tinylink_core::repository::Result<i64> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }

        async fn delete(&self, _alias: &Alias) -> tinylink_core::repository::Result<bool> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }
    }

    #[tokio::test]
    async fn storage_failures_are_reported_as_storage_errors() {
        let service = ShortenerService::new(BrokenRepository, SeqGenerator::with_prefix("wh"));
        let alias = Alias::new("abc").unwrap();

        assert!(matches!(
            service.shorten(params("https://example.com", None)).await,
            Err(ShortenerError::Storage(_))
        ));
        assert!(matches!(service.resolve(&alias).await, Err(ShortenerError::Storage(_))));
        assert!(matches!(service.delete(&alias).await, Err(ShortenerError::Storage(_))));
    }
}
