//! File persistence helpers.
//!
//! Default locations and the atomic write used for cache entries and the
//! config file.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/EveMon`
/// - Linux: `~/.config/evemon`
/// - Windows: `%APPDATA%\evemon`
pub fn default_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support").join("EveMon"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir()
            .map(|c| c.join("evemon"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Returns the default cache root.
///
/// Document caches live in `<root>/sheets`, next to the configuration.
pub fn default_cache_root() -> PathBuf {
    default_config_dir()
}

/// Returns the default configuration file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

// ============================================================================
// Security: Directory Permissions
// ============================================================================

/// Sets restrictive directory permissions (0o700) on Unix systems.
#[cfg(unix)]
pub(crate) fn set_private_dir_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    debug!(path = %path.display(), mode = "0700", "Set restrictive directory permissions");
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
pub(crate) fn set_private_dir_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Writes `bytes` to `path`, replacing any previous content atomically.
///
/// The data goes to a temp file in the same directory first and is then
/// renamed over the target, so readers never observe a partial file. Temp
/// names are unique per process and per call.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, bytes).and_then(|()| fs::rename(&temp_path, path));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    name.push(format!(".{}.{seq}.tmp", std::process::id()));
    path.with_file_name(name)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_dir() {
        let path = default_config_dir();
        assert!(!path.as_os_str().is_empty());
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with("config.json"));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("doc.xml");

        write_atomic(&path, b"first version, rather long").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("doc.xml");

        write_atomic(&path, b"data").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing").join("doc.xml");

        assert!(write_atomic(&path, b"data").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_private_dir_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("sheets");
        fs::create_dir(&dir).unwrap();

        set_private_dir_permissions(&dir).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700, "Directory should have 0700 permissions");
    }
}
