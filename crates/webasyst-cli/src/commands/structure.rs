//! `webasyst structure`: directory tree of an application.

use anyhow::Result;
use colored::Colorize;
use std::fmt::Write as _;
use std::path::Path;
use webasyst_core::cli::ExitCode;
use webasyst_core::{Error, ProjectLayout, fs};

use super::report_error;

/// Deepest level printed below the application directory.
pub const MAX_DEPTH: usize = 3;

/// Renders the tree under `dir`, entries sorted by name.
///
/// Directories deeper than `max_depth` are listed but not expanded.
///
/// # Errors
///
/// Returns an I/O error if `dir` cannot be read. Unreadable subdirectories
/// are marked in the output instead.
///
/// # Examples
///
/// ```
/// use webasyst_cli::commands::structure::render_tree;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// std::fs::create_dir_all(temp.path().join("lib/config")).unwrap();
/// std::fs::write(temp.path().join("README"), "").unwrap();
///
/// let tree = render_tree(temp.path(), 3).unwrap();
/// assert_eq!(tree, "├── README\n└── lib\n    └── config\n");
/// ```
pub fn render_tree(dir: &Path, max_depth: usize) -> webasyst_core::Result<String> {
    let mut out = String::new();
    render_level(dir, "", 0, max_depth, &mut out)?;
    Ok(out)
}

fn render_level(
    dir: &Path,
    prefix: &str,
    depth: usize,
    max_depth: usize,
    out: &mut String,
) -> webasyst_core::Result<()> {
    let mut names = fs::list_dir(dir)?;
    names.sort();

    let count = names.len();
    for (i, name) in names.into_iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        let _ = writeln!(out, "{prefix}{connector}{name}");

        let path = dir.join(&name);
        if depth < max_depth && fs::is_dir(&path) {
            let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            if render_level(&path, &child_prefix, depth + 1, max_depth, out).is_err() {
                let _ = writeln!(out, "{child_prefix}└── [unreadable]");
            }
        }
    }
    Ok(())
}

/// Prints the tree of `wa-apps/<app_id>`.
pub fn run(root: &Path, app_id: &str) -> Result<ExitCode> {
    let app_dir = ProjectLayout::new(root).app_dir(app_id);
    if !fs::is_dir(&app_dir) {
        return Ok(report_error(&Error::NotFound {
            resource: format!("Application '{app_id}'"),
        }));
    }

    println!("{}\n", format!("Structure of {app_id}:").bold().cyan());
    match render_tree(&app_dir, MAX_DEPTH) {
        Ok(tree) => {
            print!("{tree}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report_error(&err)),
    }
}
