//! Artifact generators.
//!
//! One module per artifact family. Each `create_*` function takes the shared
//! [`TemplateEngine`](crate::template_engine::TemplateEngine), the location it
//! writes to and its parameter record, and returns the summary text shown to
//! the caller.
//!
//! Every generator follows the same order of operations:
//!
//! 1. check that required parents exist and the target is free
//! 2. render the whole [`GeneratedCode`](crate::GeneratedCode) plan
//! 3. write the plan
//!
//! so a conflict or a template failure is reported before anything touches
//! the disk.

pub mod action;
pub mod app;
pub mod block;
pub mod component;
pub mod devops;
pub mod layout;
pub mod locale;
pub mod model;
pub mod plugin;
pub mod report;
pub mod style;
pub mod system_plugin;
pub mod theme;
pub mod widget;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use webasyst_core::{Error, ProjectLayout, Result, fs};

/// Fails with [`Error::AlreadyExists`] if `path` is present.
pub(crate) fn ensure_absent(path: &Path, resource: impl Into<String>) -> Result<()> {
    if fs::exists(path) {
        return Err(Error::AlreadyExists {
            resource: resource.into(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Returns the directory of `app_id`, failing with [`Error::NotFound`] if the
/// application is not installed.
pub(crate) fn require_app(layout: &ProjectLayout, app_id: &str) -> Result<PathBuf> {
    let app_dir = layout.app_dir(app_id);
    if !fs::exists(&app_dir) {
        return Err(Error::NotFound {
            resource: format!("Application '{app_id}'"),
        });
    }
    Ok(app_dir)
}

/// Formats a summary line followed by one written path per line.
pub(crate) fn summary(headline: &str, written: &[PathBuf]) -> String {
    let mut text = String::from(headline);
    for path in written {
        let _ = write!(text, "\n{}", path.display());
    }
    text
}

fn default_true() -> bool {
    true
}
