//! Storage backends for alias mappings.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;
pub use tinylink_core::repository::{ReadRepository, Repository, Result, UrlMapping};
pub use tinylink_core::StorageError;
