//! File-backed name cache.
//!
//! The cache is a JSON array of strings. A missing file is an empty cache;
//! an unreadable one is logged and treated as empty so suggestions never
//! block the user.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::cache::NameCache;
use super::error::NameCacheError;

/// Loads and saves a [`NameCache`] at a fixed path.
#[derive(Debug, Clone)]
pub struct NameCacheStore {
    path: PathBuf,
}

impl NameCacheStore {
    /// Creates a store for the cache file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cache.
    ///
    /// # Errors
    ///
    /// Returns `NameCacheError::Io` if the file exists but cannot be read.
    pub fn load(&self) -> Result<NameCache, NameCacheError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(NameCache::default()),
            Err(err) => return Err(NameCacheError::io(&self.path, err)),
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => Ok(NameCache::from_names(names)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "corrupt name cache, starting empty"
                );
                Ok(NameCache::default())
            }
        }
    }

    /// Writes the cache, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `NameCacheError` if the file cannot be written.
    pub fn save(&self, cache: &NameCache) -> Result<(), NameCacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| NameCacheError::io(parent, err))?;
        }
        let json = serde_json::to_string(cache)?;
        fs::write(&self.path, json).map_err(|err| NameCacheError::io(&self.path, err))?;
        debug!(path = %self.path.display(), names = cache.len(), "name cache saved");
        Ok(())
    }

    /// Merges `names` into the stored cache and saves it if anything changed.
    ///
    /// # Errors
    ///
    /// Returns `NameCacheError` if the cache cannot be read or written.
    pub fn remember<I, S>(&self, names: I) -> Result<NameCache, NameCacheError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cache = self.load()?;
        if cache.remember(names) > 0 {
            self.save(&cache)?;
        }
        Ok(cache)
    }
}
