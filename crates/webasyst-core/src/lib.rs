//! Core types, errors, and project discovery for Webasyst scaffolding.
//!
//! This crate provides the pieces every other crate in the workspace builds
//! on.
//!
//! # Architecture
//!
//! - [`Error`] / [`Result`]: the error taxonomy reported by every tool
//! - [`root`]: upward search for the installation root
//! - [`fs`]: filesystem probe with path-carrying errors
//! - [`php_config`]: flat key/value reader for PHP config files
//! - [`naming`]: identifier casing for class and file names
//! - [`layout`]: directory conventions of an installation
//! - [`project`]: read-only inspection of installed extensions
//! - [`audit`]: project statistics and UI guideline checks
//! - [`process`]: external program runner
//! - [`cli`]: exit codes for the command-line tools

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;

pub mod audit;
pub mod cli;
pub mod fs;
pub mod layout;
pub mod naming;
pub mod php_config;
pub mod process;
pub mod project;
pub mod root;

pub use error::{Error, Result};
pub use layout::ProjectLayout;
