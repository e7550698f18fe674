//! Tool dispatch: name lookup, argument decoding and error rendering.
//!
//! The [`Dispatcher`] is the single place where failures are turned into
//! text. Handlers return [`webasyst_core::Result`]; whatever goes wrong on the
//! way (unknown tool, malformed arguments, generator error, panic) ends up as
//! a [`ToolOutcome`] with `is_error` set and an `Error: ` prefixed message.

use crate::registry::ToolRegistry;
use rmcp::model::JsonObject;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use webasyst_codegen::TemplateEngine;
use webasyst_core::root::find_root;
use webasyst_core::{Error, ProjectLayout, Result};

/// Shared state every handler sees.
#[derive(Debug)]
pub struct ToolContext {
    start_dir: PathBuf,
    engine: TemplateEngine<'static>,
}

impl ToolContext {
    /// Creates a context that searches for the installation upward from
    /// `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the embedded templates fail to compile.
    pub fn new(start_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            start_dir: start_dir.into(),
            engine: TemplateEngine::new()?,
        })
    }

    /// Directory the root search starts from.
    #[must_use]
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Template engine shared by all generators.
    #[must_use]
    pub const fn engine(&self) -> &TemplateEngine<'static> {
        &self.engine
    }

    /// Locates the installation root.
    ///
    /// The search runs on every call so that an installation created or
    /// moved while the server is running is picked up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotFound`] if no ancestor of the start directory
    /// is a Webasyst root.
    pub fn layout(&self) -> Result<ProjectLayout> {
        find_root(&self.start_dir).map(ProjectLayout::new)
    }
}

/// Text returned to the client for one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Result or error message
    pub text: String,
    /// Whether the call failed
    pub is_error: bool,
}

impl ToolOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Failed outcome rendering `err` as `Error: <message>`.
    #[must_use]
    pub fn failure(err: &Error) -> Self {
        Self {
            text: format!("Error: {err}"),
            is_error: true,
        }
    }
}

/// Routes tool calls to registered handlers.
///
/// Cloning is cheap: the registry and context are shared.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use webasyst_mcp::dispatcher::{Dispatcher, ToolContext};
/// use webasyst_mcp::registry::ToolRegistry;
///
/// let context = ToolContext::new(std::env::temp_dir()).unwrap();
/// let dispatcher = Dispatcher::new(Arc::new(ToolRegistry::builtin()), context);
///
/// let outcome = dispatcher.dispatch("no_such_tool", serde_json::Map::new());
/// assert!(outcome.is_error);
/// assert_eq!(outcome.text, "Error: Unknown tool: no_such_tool");
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    context: Arc<ToolContext>,
}

impl Dispatcher {
    /// Creates a dispatcher over an immutable registry.
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, context: ToolContext) -> Self {
        Self {
            registry,
            context: Arc::new(context),
        }
    }

    /// Registry the dispatcher routes to.
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Runs the tool `name` synchronously.
    ///
    /// A handler panic is reported as an error outcome.
    #[must_use]
    pub fn dispatch(&self, name: &str, arguments: JsonObject) -> ToolOutcome {
        debug!(tool = name, "dispatching tool call");

        let Some(tool) = self.registry.get(name) else {
            return ToolOutcome::failure(&Error::UnknownTool(name.to_string()));
        };

        let result =
            panic::catch_unwind(AssertUnwindSafe(|| tool.invoke(&self.context, arguments)));
        match result {
            Ok(Ok(text)) => ToolOutcome::success(text),
            Ok(Err(err)) => {
                debug!(tool = name, error = %err, "tool call failed");
                ToolOutcome::failure(&err)
            }
            Err(payload) => aborted(name, &panic_message(payload.as_ref())),
        }
    }

    /// Runs the tool `name` on the blocking thread pool.
    pub async fn call(&self, name: &str, arguments: JsonObject) -> ToolOutcome {
        let this = self.clone();
        let tool_name = name.to_string();
        tokio::task::spawn_blocking(move || this.dispatch(&tool_name, arguments))
            .await
            .unwrap_or_else(|e| aborted(name, &e.to_string()))
    }
}

fn aborted(name: &str, reason: &str) -> ToolOutcome {
    warn!(tool = name, reason, "tool handler aborted");
    ToolOutcome {
        text: format!("Error: tool {name} aborted: {reason}"),
        is_error: true,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
