//! Command implementations for the Webasyst CLI.
//!
//! Each command resolves its work against an installation root and reports
//! failures of the scaffolding layer as an exit code instead of bubbling
//! them up, so `main` only sees errors of the CLI itself.

pub mod analyze;
pub mod completions;
pub mod create;
pub mod structure;

use colored::Colorize;
use webasyst_core::Error;
use webasyst_core::cli::ExitCode;

/// Prints `err` to stderr and picks the matching exit code.
pub(crate) fn report_error(err: &Error) -> ExitCode {
    eprintln!("{} {err}", "Error:".red().bold());
    ExitCode::for_error(err)
}
