//! Local filesystem store backend.
//!
//! Every key is stored as its own file inside a configured directory, accessed
//! via `tokio::fs` for async I/O.

use crate::error::ErrorKind;
use crate::{StoreBackend, error::Result, key::validate as validate_key};
use async_trait::async_trait;
use std::fs::create_dir_all as sync_create_dir;
use std::path::{Path, PathBuf};
use tokio::fs;

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Local filesystem store backend.
///
/// Stores one file per key (`<root>/<key>.json`). Writes go to a temporary
/// sibling first and are renamed into place, so a crash mid-write never leaves
/// a truncated value behind.
///
/// # Examples
///
/// ```no_run
/// use quotewall_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("local", "/home/me/.local/share/quotewall")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    /// Directory holding one file per key
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute, exists but is not a
    /// directory, or cannot be created.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::Unavailable(format!("store directory is not absolute: {}", root.display())));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::Unavailable(format!("store path is not a directory: {}", root.display())));
            }
        } else {
            // Use non-async here; it'll only happen once on widget start and
            // it's not worth the hassle of making the constructor async.
            sync_create_dir(&root).map_err(|e| Self::map_io_error(e, &root))?;
        }
        Ok(Self { name: name.into(), root })
    }

    /// Directory the values are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        let key = validate_key(key)?;
        Ok(self.root.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    fn temp_path(&self, key: &str) -> Result<PathBuf> {
        let key = validate_key(key)?;
        Ok(self.root.join(format!("{key}.{TEMP_EXTENSION}")))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl StoreBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::map_io_error(e, &path).into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        let temp = self.temp_path(key)?;
        // Recreate the root in case it was removed underneath us.
        fs::create_dir_all(&self.root).await.map_err(|e| Self::map_io_error(e, &self.root))?;
        fs::write(&temp, value).await.map_err(|e| Self::map_io_error(e, &temp))?;
        Ok(fs::rename(&temp, &path).await.map_err(|e| Self::map_io_error(e, &path))?)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::map_io_error(e, &path).into()),
        }
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let path = self.value_path(key)?;
        Ok(fs::try_exists(&path).await.map_err(ErrorKind::Io)?)
    }
}
