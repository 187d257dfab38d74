use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tinylink_core::error::StorageError;
use tinylink_core::repository::{ReadRepository, Repository, Result, UrlMapping};
use tinylink_core::Alias;
use tracing::{debug, info};

const SCHEMA: &str = include_str!("../ddl/sqlite/url.sql");

/// SQLite implementation of the repository contract.
///
/// Mappings live in a single `url` table keyed by an autoincrement id, with a
/// unique constraint on `alias`. Every operation is a single statement, so
/// SQLite's implicit transaction is the only coordination needed: duplicate
/// aliases are rejected by the constraint, not by a prior lookup.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    ///
    /// The schema is not touched; call [`ensure_schema`](Self::ensure_schema)
    /// if the database may be fresh.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database file at `path` and makes sure
    /// the schema exists. Parent directories are created as needed.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::Unavailable(format!(
                    "failed to create storage directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.ensure_schema().await?;

        info!(path = %path.display(), "sqlite storage ready");
        Ok(repository)
    }

    /// Creates the `url` table and its alias index if they do not exist.
    ///
    /// Safe to run against a populated database; existing rows are kept.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("sqlite schema ensured");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed | sqlx::Error::Io(_) => {
            StorageError::Unavailable(message)
        }
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, alias: &Alias) -> Result<Option<UrlMapping>> {
        let row = sqlx::query(
            r#"
            SELECT id, url
            FROM url
            WHERE alias = ?
            LIMIT 1
            "#,
        )
        .bind(alias.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let url: String = row.try_get("url").map_err(map_sqlx_error)?;

        Ok(Some(UrlMapping {
            id,
            alias: alias.clone(),
            url,
        }))
    }

    async fn exists(&self, alias: &Alias) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM url
            WHERE alias = ?
            LIMIT 1
            "#,
        )
        .bind(alias.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, alias: &Alias, url: &str) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO url (alias, url)
            VALUES (?, ?)
            "#,
        )
        .bind(alias.as_str())
        .bind(url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(alias.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn delete(&self, alias: &Alias) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM url
            WHERE alias = ?
            "#,
        )
        .bind(alias.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_maps_to_timeout() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StorageError::Timeout(_)
        ));
    }

    #[test]
    fn closed_pool_maps_to_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StorageError::Unavailable(_)
        ));
    }

    #[test]
    fn row_not_found_maps_to_invalid_data() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StorageError::InvalidData(_)
        ));
    }

    #[test]
    fn schema_is_idempotent_ddl() {
        assert!(SCHEMA.contains("CREATE TABLE IF NOT EXISTS url"));
        assert!(SCHEMA.contains("CREATE INDEX IF NOT EXISTS idx_alias"));
        assert!(!SCHEMA.to_uppercase().contains("DROP"));
    }
}
