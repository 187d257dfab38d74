use crate::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct SqliteConfig {
    /// Sub-directory inside the temp dir. Lets tests exercise parent
    /// directory creation.
    #[builder(default = "storage".to_string())]
    directory: String,
    #[builder(default = "tinylink.db".to_string())]
    file_name: String,
}

/// Test fixture for a disposable SQLite database location.
///
/// The database file itself is not created; that is left to the code under
/// test. Everything is removed when the fixture is dropped.
pub struct SqliteDatabase {
    root: TempDir,
    path: PathBuf,
}

impl SqliteDatabase {
    /// Reserves a fresh temp directory for a database.
    pub fn new(config: SqliteConfig) -> Result<Self> {
        let root = tempfile::Builder::new().prefix("tinylink-").tempdir()?;
        let path = root.path().join(&config.directory).join(&config.file_name);
        Ok(Self { root, path })
    }

    /// Path the database file should be opened at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the temp directory that owns the database.
    pub fn root(&self) -> &Path {
        self.root.path()
    }
}
