//! Filesystem probe.
//!
//! Thin synchronous wrappers over `std::fs` that attach the offending path to
//! every error. Existence checks never fail: an unreadable path is reported as
//! absent.

use crate::{Error, Result};
use std::path::Path;

/// Returns `true` if `path` exists.
#[must_use]
pub fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

/// Returns `true` if `path` exists and is a directory.
#[must_use]
pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Creates `path` and all missing ancestors.
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Lists entry names of a directory in host order.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be read.
pub fn list_dir(path: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(path).map_err(|e| Error::io(path, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(path, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Lists names of subdirectories of `path`.
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns [`Error::Io`] if an existing directory cannot be read.
pub fn list_subdirs(path: &Path) -> Result<Vec<String>> {
    if !is_dir(path) {
        return Ok(Vec::new());
    }
    Ok(list_dir(path)?
        .into_iter()
        .filter(|name| is_dir(&path.join(name)))
        .collect())
}

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Reads a text file, replacing invalid UTF-8 sequences with U+FFFD.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn read_file_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes `contents` to `path`, replacing any previous content.
///
/// The parent directory must exist; callers use [`ensure_dir`] first.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists_missing_path() {
        let temp = TempDir::new().unwrap();
        assert!(!exists(&temp.path().join("nope")));
        assert!(exists(temp.path()));
    }

    #[test]
    fn test_ensure_dir_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        assert!(is_dir(&nested));
        // second call is a no-op
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_list_subdirs_skips_files() {
        let temp = TempDir::new().unwrap();
        ensure_dir(&temp.path().join("dir")).unwrap();
        write_file(&temp.path().join("file.txt"), "x").unwrap();

        let subdirs = list_subdirs(temp.path()).unwrap();
        assert_eq!(subdirs, vec!["dir".to_string()]);
        assert!(list_subdirs(&temp.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.php");
        let err = read_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing.php"));
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.php");
        write_file(&path, "<?php\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "<?php\n");
    }

    #[test]
    fn test_read_lossy_replaces_invalid_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("legacy.html");
        std::fs::write(&path, b"caf\xe9").unwrap();

        assert!(read_file(&path).is_err());
        assert_eq!(read_file_lossy(&path).unwrap(), "caf\u{FFFD}");
    }
}
