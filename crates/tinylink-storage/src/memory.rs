use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tinylink_core::error::StorageError;
use tinylink_core::repository::{ReadRepository, Repository, Result, UrlMapping};
use tinylink_core::Alias;

#[derive(Debug, Clone)]
struct Row {
    id: i64,
    url: String,
}

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Inserts go through the entry API so the
/// uniqueness check and the write happen under the same shard lock.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<String, Row>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, alias: &Alias) -> Result<Option<UrlMapping>> {
        Ok(self.storage.get(alias.as_str()).map(|row| UrlMapping {
            id: row.id,
            alias: alias.clone(),
            url: row.url.clone(),
        }))
    }

    async fn exists(&self, alias: &Alias) -> Result<bool> {
        Ok(self.storage.contains_key(alias.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, alias: &Alias, url: &str) -> Result<i64> {
        match self.storage.entry(alias.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(Row {
                    id,
                    url: url.to_owned(),
                });
                Ok(id)
            }
        }
    }

    async fn delete(&self, alias: &Alias) -> Result<bool> {
        Ok(self.storage.remove(alias.as_str()).is_some())
    }
}
