//! `webasyst analyze`: quick overview of an installation.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use webasyst_core::cli::ExitCode;
use webasyst_core::project::list_apps;
use webasyst_core::{Error, ProjectLayout, fs};

use super::report_error;

/// What `analyze` prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOverview {
    /// Installation root
    pub root: PathBuf,
    /// Application ids with a config file, sorted
    pub apps: Vec<String>,
    /// Number of `.php` files under the root
    pub php_files: usize,
    /// Number of `.css` files under the root
    pub css_files: usize,
    /// Number of `.js` files under the root
    pub js_files: usize,
}

/// Collects the overview of the installation at `root`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `root` has no `wa-apps` directory.
pub fn collect(root: &Path) -> webasyst_core::Result<ProjectOverview> {
    let layout = ProjectLayout::new(root);
    if !fs::is_dir(&layout.apps_dir()) {
        return Err(Error::NotFound {
            resource: format!("wa-apps directory in {}", root.display()),
        });
    }

    let mut apps: Vec<String> = list_apps(&layout, true)?
        .into_iter()
        .map(|app| app.id)
        .collect();
    apps.sort();

    let mut overview = ProjectOverview {
        root: root.to_path_buf(),
        apps,
        php_files: 0,
        css_files: 0,
        js_files: 0,
    };

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        match entry.path().extension().and_then(|ext| ext.to_str()) {
            Some("php") => overview.php_files += 1,
            Some("css") => overview.css_files += 1,
            Some("js") => overview.js_files += 1,
            _ => {}
        }
    }
    Ok(overview)
}

/// Runs the analyze command.
pub fn run(root: &Path) -> Result<ExitCode> {
    println!("{}\n", "Analyzing Webasyst project...".bold().cyan());

    let overview = match collect(root) {
        Ok(overview) => overview,
        Err(err) => return Ok(report_error(&err)),
    };

    println!("{} {}", "Applications found:".bold(), overview.apps.len());
    for app in &overview.apps {
        println!("  - {app}");
    }

    println!("\n{}", "System information:".bold());
    println!("  - Root: {}", overview.root.display());
    println!("  - PHP files: {}", overview.php_files);
    println!("  - CSS files: {}", overview.css_files);
    println!("  - JS files: {}", overview.js_files);

    Ok(ExitCode::SUCCESS)
}
