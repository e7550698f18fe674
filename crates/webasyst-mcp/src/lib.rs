//! MCP server for Webasyst scaffolding.
//!
//! Exposes the generators of [`webasyst_codegen`] and the project readers of
//! [`webasyst_core`] as MCP tools over stdio.
//!
//! # Architecture
//!
//! - [`registry`]: ordered, immutable catalog of tools with schemas derived
//!   from their parameter records
//! - [`dispatcher`]: looks tools up, decodes arguments and renders errors
//! - [`handlers`]: read-only tools and project audits
//! - [`service`]: rmcp `ServerHandler` forwarding to the dispatcher
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use webasyst_mcp::{Dispatcher, ToolContext, ToolRegistry};
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! std::fs::write(temp.path().join("index.php"), "<?php\n").unwrap();
//! std::fs::create_dir_all(temp.path().join("wa-system")).unwrap();
//!
//! let dispatcher = Dispatcher::new(
//!     Arc::new(ToolRegistry::builtin()),
//!     ToolContext::new(temp.path()).unwrap(),
//! );
//! let args = serde_json::json!({"app_id": "blog", "app_name": "Blog"});
//! let outcome = dispatcher.dispatch("create_app_structure", args.as_object().cloned().unwrap());
//!
//! assert!(!outcome.is_error, "{}", outcome.text);
//! assert!(temp.path().join("wa-apps/blog/lib/config/app.php").exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod dispatcher;
pub mod handlers;
pub mod registry;
pub mod service;
pub mod types;

pub use dispatcher::{Dispatcher, ToolContext, ToolOutcome};
pub use registry::{RegisteredTool, ToolRegistry};
pub use service::WebasystService;
