//! Exit codes shared by the command-line tools.
//!
//! # Examples
//!
//! ```
//! use webasyst_core::cli::ExitCode;
//! use webasyst_core::Error;
//!
//! assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
//!
//! let err = Error::NotFound { resource: "Application 'blog'".into() };
//! assert_eq!(ExitCode::for_error(&err), ExitCode::NOT_FOUND);
//! ```

use crate::Error;
use std::fmt;

/// Process exit code with semantic constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid input or arguments (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// Project root, application or file missing (exit code 3).
    pub const NOT_FOUND: Self = Self(3);

    /// Generator target already present (exit code 4).
    pub const ALREADY_EXISTS: Self = Self(4);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Chooses the exit code that describes `err`.
    #[must_use]
    pub const fn for_error(err: &Error) -> Self {
        if err.is_not_found() {
            Self::NOT_FOUND
        } else if err.is_already_exists() {
            Self::ALREADY_EXISTS
        } else if err.is_invalid_argument() {
            Self::INVALID_INPUT
        } else {
            Self::ERROR
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_for_error_already_exists() {
        let err = Error::AlreadyExists {
            resource: "Application 'blog'".into(),
            path: PathBuf::from("wa-apps/blog"),
        };
        assert_eq!(ExitCode::for_error(&err), ExitCode::ALREADY_EXISTS);
    }

    #[test]
    fn test_for_error_external_tool_is_generic() {
        let err = Error::ExternalTool {
            tool: "zip".into(),
            message: "missing".into(),
        };
        assert_eq!(ExitCode::for_error(&err), ExitCode::ERROR);
    }

    #[test]
    fn test_default_is_success() {
        assert!(ExitCode::default().is_success());
        assert_eq!(i32::from(ExitCode::INVALID_INPUT), 2);
    }
}
