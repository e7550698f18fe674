//! Generation plan types.
//!
//! A generator first renders everything it is going to write into a
//! [`GeneratedCode`] plan, then exports the plan under a base directory.
//! Rendering happens before the first write, so a template failure never
//! leaves a half-written artifact behind.
//!
//! # Examples
//!
//! ```
//! use webasyst_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new();
//! code.add_dir("lib/config");
//! code.add_file(GeneratedFile::new("lib/config/app.php", "<?php\n"));
//!
//! assert_eq!(code.file_count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use webasyst_core::{Result, fs};

/// Files and directories produced by one generator run.
///
/// Paths are relative to the artifact directory the plan is written to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Directories to create, including empty ones
    pub directories: Vec<String>,
    /// Files to write
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates an empty plan.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plan that starts with the given directory skeleton.
    ///
    /// # Examples
    ///
    /// ```
    /// use webasyst_codegen::GeneratedCode;
    ///
    /// let code = GeneratedCode::with_dirs(&["lib", "templates"]);
    /// assert_eq!(code.directories.len(), 2);
    /// ```
    #[must_use]
    pub fn with_dirs(dirs: &[&str]) -> Self {
        Self {
            directories: dirs.iter().map(|d| (*d).to_string()).collect(),
            files: Vec::new(),
        }
    }

    /// Adds a directory to create.
    pub fn add_dir(&mut self, dir: impl Into<String>) {
        self.directories.push(dir.into());
    }

    /// Adds a file to write.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Shorthand for `add_file(GeneratedFile::new(path, content))`.
    pub fn file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.push(GeneratedFile::new(path, content));
    }

    /// Returns the number of files in the plan.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the planned files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Writes the plan under `base` and returns the absolute paths of the
    /// written files in plan order.
    ///
    /// Directories are created first, then each file's parent directory is
    /// ensured before the file is written. Existing files are overwritten;
    /// callers check for conflicts before exporting.
    ///
    /// # Errors
    ///
    /// Returns [`webasyst_core::Error::Io`] on the first failed directory
    /// creation or write. Files written before the failure stay on disk.
    pub fn write_to(&self, base: &Path) -> Result<Vec<PathBuf>> {
        for dir in &self.directories {
            fs::ensure_dir(&base.join(dir))?;
        }

        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = base.join(&file.path);
            if let Some(parent) = path.parent() {
                fs::ensure_dir(parent)?;
            }
            fs::write_file(&path, &file.content)?;
            info!(path = %path.display(), "wrote file");
            written.push(path);
        }

        Ok(written)
    }
}

/// A single planned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the artifact directory
    pub path: String,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Creates a planned file.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Returns the relative path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
