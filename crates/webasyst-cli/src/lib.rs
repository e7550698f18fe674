//! Webasyst CLI library.
//!
//! Exposes the subcommand implementations so they can be tested without
//! spawning the binary.

#![allow(clippy::missing_errors_doc)]

pub mod commands;
