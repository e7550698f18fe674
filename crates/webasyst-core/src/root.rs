//! Webasyst project root discovery.
//!
//! A directory is a project root when it holds both the `index.php` entry
//! file and the `wa-system` directory. Discovery walks ancestors of a start
//! directory and returns the nearest match.
//!
//! # Examples
//!
//! ```no_run
//! use webasyst_core::root::{find_root, find_root_or_start};
//! use std::path::Path;
//!
//! let start = Path::new("/srv/www/wa-apps/blog/lib");
//! match find_root(start) {
//!     Ok(root) => println!("root: {}", root.display()),
//!     Err(e) => eprintln!("{e}"),
//! }
//!
//! // Lenient variant used by the human CLI
//! let root = find_root_or_start(start);
//! ```

use crate::fs;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Entry file present in every Webasyst installation.
pub const ENTRY_FILE: &str = "index.php";

/// System directory present in every Webasyst installation.
pub const SYSTEM_DIR: &str = "wa-system";

/// Returns `true` if `dir` carries both root markers.
#[must_use]
pub fn is_root(dir: &Path) -> bool {
    fs::exists(&dir.join(ENTRY_FILE)) && fs::exists(&dir.join(SYSTEM_DIR))
}

/// Directories searched for the root markers, nearest first. The
/// filesystem root itself is never searched.
fn search_dirs(start: &Path) -> impl Iterator<Item = &Path> {
    start.ancestors().take_while(|dir| dir.parent().is_some())
}

/// Finds the nearest ancestor of `start` (inclusive) that is a project root.
///
/// # Errors
///
/// Returns [`Error::RootNotFound`] when the filesystem root is reached
/// without a match.
pub fn find_root(start: &Path) -> Result<PathBuf> {
    search_dirs(start)
        .find(|dir| is_root(dir))
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::RootNotFound {
            start: start.to_path_buf(),
        })
}

/// Finds the project root, falling back to `start` when none is found.
#[must_use]
pub fn find_root_or_start(start: &Path) -> PathBuf {
    find_root(start).unwrap_or_else(|_| {
        tracing::debug!(start = %start.display(), "no Webasyst root found, using start directory");
        start.to_path_buf()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_root(dir: &Path) {
        std::fs::write(dir.join(ENTRY_FILE), "<?php").unwrap();
        std::fs::create_dir_all(dir.join(SYSTEM_DIR)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_search_stops_below_filesystem_root() {
        let dirs: Vec<&Path> = search_dirs(Path::new("/srv/wa/app")).collect();
        assert_eq!(
            dirs,
            [Path::new("/srv/wa/app"), Path::new("/srv/wa"), Path::new("/srv")]
        );
        assert_eq!(search_dirs(Path::new("/")).count(), 0);
    }

    #[test]
    fn test_start_is_root() {
        let temp = TempDir::new().unwrap();
        make_root(temp.path());
        assert_eq!(find_root(temp.path()).unwrap(), temp.path());
    }

    #[test]
    fn test_entry_file_alone_is_not_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(ENTRY_FILE), "<?php").unwrap();
        assert!(!is_root(temp.path()));
    }

    #[test]
    fn test_lenient_falls_back_to_start() {
        let temp = TempDir::new().unwrap();
        let start = temp.path().join("somewhere");
        std::fs::create_dir_all(&start).unwrap();
        assert_eq!(find_root_or_start(&start), start);
    }
}
