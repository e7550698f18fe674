//! Error types for Webasyst scaffolding.
//!
//! Every failure a tool can report maps onto one variant of [`Error`]. The
//! dispatcher renders the `Display` form into the tool result, so messages
//! are written for the person reading that result.
//!
//! # Examples
//!
//! ```
//! use webasyst_core::{Error, Result};
//!
//! fn require_app(app_id: &str, exists: bool) -> Result<()> {
//!     if !exists {
//!         return Err(Error::NotFound {
//!             resource: format!("application '{app_id}'"),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_app("blog", false).unwrap_err();
//! assert!(err.is_not_found());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Webasyst scaffolding.
///
/// All crates in the workspace report failures through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// No ancestor of the start directory looks like a Webasyst installation.
    ///
    /// A Webasyst root contains both `index.php` and the `wa-system`
    /// directory.
    #[error(
        "Webasyst root directory not found (searched upward from {})",
        start.display()
    )]
    RootNotFound {
        /// Directory the upward search started from
        start: PathBuf,
    },

    /// A required resource (application, config file, catalog) is missing.
    #[error("{resource} not found")]
    NotFound {
        /// Human readable description of the missing resource
        resource: String,
    },

    /// The target of a generator is already occupied.
    ///
    /// Generators never overwrite existing files; this error is raised
    /// before anything is written.
    #[error("{resource} already exists: {}", path.display())]
    AlreadyExists {
        /// Human readable description of the artifact
        resource: String,
        /// Path that is already present
        path: PathBuf,
    },

    /// The requested tool name is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// An external program failed or is not installed.
    #[error("{tool} failed: {message}")]
    ExternalTool {
        /// Program name (`php`, `msgfmt`, `zip`)
        tool: String,
        /// Diagnostic output or a hint on how to install the program
        message: String,
    },

    /// Tool arguments could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    Template {
        /// Description of the template failure
        message: String,
    },

    /// JSON conversion failed.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl Error {
    /// Creates an [`Error::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if a resource or the project root was not found.
    ///
    /// # Examples
    ///
    /// ```
    /// use webasyst_core::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::RootNotFound { start: PathBuf::from("/tmp") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::RootNotFound { .. })
    }

    /// Returns `true` if a generator target was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use webasyst_core::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::AlreadyExists {
    ///     resource: "Application 'blog'".to_string(),
    ///     path: PathBuf::from("wa-apps/blog"),
    /// };
    /// assert!(err.is_already_exists());
    /// ```
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns `true` if the tool name was not registered.
    #[must_use]
    pub const fn is_unknown_tool(&self) -> bool {
        matches!(self, Self::UnknownTool(_))
    }

    /// Returns `true` if an external program failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use webasyst_core::Error;
    ///
    /// let err = Error::ExternalTool {
    ///     tool: "msgfmt".to_string(),
    ///     message: "not installed".to_string(),
    /// };
    /// assert!(err.is_external_tool_error());
    /// ```
    #[must_use]
    pub const fn is_external_tool_error(&self) -> bool {
        matches!(self, Self::ExternalTool { .. })
    }

    /// Returns `true` if the arguments were malformed.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias for Webasyst scaffolding operations.
///
/// # Examples
///
/// ```
/// use webasyst_core::Result;
///
/// fn example() -> Result<String> {
///     Ok("blog".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
