//! Integration tests for project root discovery.

use std::path::Path;
use tempfile::TempDir;
use webasyst_core::root::{find_root, find_root_or_start, is_root};

fn make_installation(root: &Path) {
    std::fs::write(root.join("index.php"), "<?php\n").unwrap();
    std::fs::create_dir_all(root.join("wa-system")).unwrap();
}

#[test]
fn test_finds_root_three_levels_up() {
    let temp = TempDir::new().unwrap();
    make_installation(temp.path());
    let start = temp.path().join("wa-apps/blog/lib");
    std::fs::create_dir_all(&start).unwrap();

    assert_eq!(find_root(&start).unwrap(), temp.path());
}

#[test]
fn test_nearest_root_wins() {
    let temp = TempDir::new().unwrap();
    make_installation(temp.path());
    let nested = temp.path().join("sites/second");
    std::fs::create_dir_all(&nested).unwrap();
    make_installation(&nested);
    let start = nested.join("wa-apps");
    std::fs::create_dir_all(&start).unwrap();

    assert_eq!(find_root(&start).unwrap(), nested);
}

#[test]
fn test_strict_mode_reports_not_found() {
    let temp = TempDir::new().unwrap();
    let start = temp.path().join("plain/dir");
    std::fs::create_dir_all(&start).unwrap();

    // Only meaningful when no ancestor of the temp dir is an installation.
    if temp.path().ancestors().any(is_root) {
        return;
    }
    let err = find_root(&start).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("root directory not found"));
}

#[test]
fn test_lenient_mode_returns_start() {
    let temp = TempDir::new().unwrap();
    let start = temp.path().join("plain");
    std::fs::create_dir_all(&start).unwrap();

    if temp.path().ancestors().any(is_root) {
        return;
    }
    assert_eq!(find_root_or_start(&start), start);
}

#[test]
fn test_system_dir_as_file_still_counts() {
    // The markers are existence checks only.
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("index.php"), "").unwrap();
    std::fs::write(temp.path().join("wa-system"), "").unwrap();
    assert!(is_root(temp.path()));
}
