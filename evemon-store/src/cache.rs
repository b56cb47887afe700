//! File-backed document cache.
//!
//! Each [`CacheKey`] maps to one file under `<root>/sheets`. Entries are
//! written whole and read back byte for byte; there is no expiry, an entry
//! lives until the next successful fetch of the same document replaces it.

use chrono::{DateTime, Duration, Utc};
use evemon_core::CacheKey;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::persistence::{set_private_dir_permissions, write_atomic};

/// Name of the directory holding cached documents, below the cache root.
pub const SHEETS_DIR: &str = "sheets";

// ============================================================================
// Cached Entry
// ============================================================================

/// A document read back from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntry {
    /// Exact bytes of the last successful response.
    pub bytes: Vec<u8>,
    /// When the entry was written, if the filesystem reports it.
    pub modified_at: Option<DateTime<Utc>>,
}

impl CachedEntry {
    /// How long ago the entry was written.
    pub fn age(&self) -> Option<Duration> {
        self.modified_at.map(|t| Utc::now().signed_duration_since(t))
    }
}

/// File details of a cache entry, without its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Location of the cache file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Cache Store
// ============================================================================

/// Document cache rooted at a single directory.
///
/// The store holds no state besides its root path, so it is cheap to clone
/// and can be shared by any number of fetchers. Keys for different
/// documents or identities never collide, which means concurrent writers
/// never target the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at `root`. Nothing is created on disk yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the cache root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory holding cached documents.
    pub fn sheets_dir(&self) -> PathBuf {
        self.root.join(SHEETS_DIR)
    }

    /// Returns the file that backs `key`.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.sheets_dir().join(key.as_str())
    }

    /// Returns true if an entry exists for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.path_for(key).is_file()
    }

    /// Creates the cache directory if it is missing.
    ///
    /// Returns `true` if the directory was created by this call. Safe to
    /// call redundantly, also from several fetchers at once.
    pub fn ensure_dir(&self) -> Result<bool, CacheError> {
        let dir = self.sheets_dir();
        if dir.is_dir() {
            return Ok(false);
        }

        let root_existed = self.root.is_dir();

        debug!(path = %dir.display(), "Creating cache directory");
        fs::create_dir_all(&dir).map_err(|e| CacheError::CreateDir {
            path: dir.clone(),
            message: e.to_string(),
        })?;

        // The directory is usable even if it could not be made private.
        let mut private = vec![dir];
        if !root_existed {
            private.push(self.root.clone());
        }
        for path in &private {
            if let Err(e) = set_private_dir_permissions(path) {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not restrict cache directory permissions"
                );
            }
        }
        Ok(true)
    }

    /// Stores `bytes` as the entry for `key`, replacing any previous entry.
    ///
    /// Returns the path of the written file.
    pub fn write(&self, key: &CacheKey, bytes: &[u8]) -> Result<PathBuf, CacheError> {
        self.ensure_dir()?;

        let path = self.path_for(key);
        write_atomic(&path, bytes).map_err(|e| CacheError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), size = bytes.len(), "Cache entry written");
        Ok(path)
    }

    /// Reads the entry for `key`, or `None` if there is none.
    pub fn read(&self, key: &CacheKey) -> Result<Option<CachedEntry>, CacheError> {
        let path = self.path_for(key);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CacheError::Read {
                    path,
                    message: e.to_string(),
                });
            }
        };

        debug!(path = %path.display(), size = bytes.len(), "Cache entry read");
        Ok(Some(CachedEntry {
            bytes,
            modified_at: modified_at(&path),
        }))
    }

    /// Returns file details for the entry of `key`, or `None` if absent.
    pub fn info(&self, key: &CacheKey) -> Option<EntryInfo> {
        let path = self.path_for(key);
        let metadata = fs::metadata(&path).ok().filter(fs::Metadata::is_file)?;

        Some(EntryInfo {
            size: metadata.len(),
            modified_at: metadata.modified().ok().map(DateTime::<Utc>::from),
            path,
        })
    }
}

fn modified_at(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}
