//! Discovery and creation of the `.kuchler/` data directory.
//!
//! The `.kuchler/` directory holds the configuration and the projects data
//! file. It is found by walking up the directory tree from the working
//! directory, unless `KUCHLER_DIR` points somewhere explicitly.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the data directory.
pub const DATA_DIR_NAME: &str = ".kuchler";

/// The name of the environment variable that can override the data directory.
pub const DATA_DIR_ENV: &str = "KUCHLER_DIR";

/// Walk up the directory tree from `start` looking for a `.kuchler/` directory.
///
/// The `KUCHLER_DIR` environment variable is checked first (highest
/// priority). Returns `None` if the filesystem root is reached without a
/// match.
///
/// # Examples
///
/// ```no_run
/// use kuchler_config::data_dir::find_data_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_data_dir(Path::new(".")) {
///     println!("Found data dir at {}", dir.display());
/// }
/// ```
pub fn find_data_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(DATA_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Like [`find_data_dir`], but a missing directory is an error.
///
/// # Errors
///
/// Returns [`ConfigError::DataDirNotFound`] if no `.kuchler/` directory is
/// found.
pub fn find_data_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_data_dir(start).ok_or(ConfigError::DataDirNotFound)
}

/// Ensure a `.kuchler/` directory exists at the given path.
///
/// If `path` itself is not called `.kuchler`, a `.kuchler/` subdirectory is
/// created under it. Returns the path to the `.kuchler/` directory.
pub fn ensure_data_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let data_dir = if path.ends_with(DATA_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(DATA_DIR_NAME)
    };

    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_data_dir_in_child() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join(DATA_DIR_NAME);
        std::fs::create_dir(&data).unwrap();

        let child = dir.path().join("plots").join("2024");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_data_dir(&child).unwrap().canonicalize().unwrap();
        assert_eq!(found, data.canonicalize().unwrap());
    }

    #[test]
    fn test_find_data_dir_or_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(DATA_DIR_NAME)).unwrap();
        assert!(find_data_dir_or_error(dir.path()).is_ok());
    }

    #[test]
    fn test_ensure_data_dir_creates() {
        let dir = tempfile::tempdir().unwrap();
        let result = ensure_data_dir(dir.path()).unwrap();
        assert!(result.is_dir());
        assert!(result.ends_with(DATA_DIR_NAME));
    }

    #[test]
    fn test_ensure_data_dir_already_named() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join(DATA_DIR_NAME);
        let result = ensure_data_dir(&data).unwrap();
        assert_eq!(result, data);
        assert_eq!(ensure_data_dir(&data).unwrap(), data);
    }
}
