//! MCP transport adapter.
//!
//! [`WebasystService`] implements the rmcp [`ServerHandler`] by hand: the
//! tool list comes from the [`ToolRegistry`](crate::registry::ToolRegistry)
//! and every call is forwarded to the [`Dispatcher`].

use crate::dispatcher::{Dispatcher, ToolContext, ToolOutcome};
use crate::registry::ToolRegistry;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer};
use std::path::PathBuf;
use std::sync::Arc;
use webasyst_core::{Error, Result};

/// Webasyst scaffolding server.
///
/// # Examples
///
/// ```no_run
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
/// use webasyst_mcp::WebasystService;
///
/// # async fn example() -> anyhow::Result<()> {
/// let service = WebasystService::new()?.serve(stdio()).await?;
/// service.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebasystService {
    dispatcher: Dispatcher,
}

impl WebasystService {
    /// Creates a service with the builtin tools that looks for the
    /// installation upward from the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined or
    /// the templates fail to compile.
    pub fn new() -> Result<Self> {
        let start_dir = std::env::current_dir().map_err(|e| Error::io(PathBuf::from("."), e))?;
        Self::with_start_dir(start_dir)
    }

    /// Creates a service with the builtin tools rooted at `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the templates fail to compile.
    pub fn with_start_dir(start_dir: impl Into<PathBuf>) -> Result<Self> {
        let context = ToolContext::new(start_dir)?;
        Ok(Self::from_dispatcher(Dispatcher::new(
            Arc::new(ToolRegistry::builtin()),
            context,
        )))
    }

    /// Wraps an existing dispatcher.
    #[must_use]
    pub const fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Tool definitions advertised by `tools/list`.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher.registry().definitions()
    }

    /// Runs one tool call and converts the outcome to a protocol result.
    pub async fn call(&self, name: &str, arguments: rmcp::model::JsonObject) -> CallToolResult {
        let ToolOutcome { text, is_error } = self.dispatcher.call(name, arguments).await;
        if is_error {
            CallToolResult::error(vec![Content::text(text)])
        } else {
            CallToolResult::success(vec![Content::text(text)])
        }
    }
}

impl ServerHandler for WebasystService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Scaffold Webasyst applications, plugins, themes, widgets and UI components. \
                 Run the server inside a Webasyst installation; use list_webasyst_apps to \
                 see what is installed before generating code."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.call(&request.name, arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_info_enables_tools() {
        let temp = TempDir::new().unwrap();
        let service = WebasystService::with_start_dir(temp.path()).unwrap();

        let info = service.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_tools_match_registry() {
        let temp = TempDir::new().unwrap();
        let service = WebasystService::with_start_dir(temp.path()).unwrap();
        assert_eq!(service.tools().len(), ToolRegistry::builtin().len());
    }

    #[tokio::test]
    async fn test_call_maps_error_flag() {
        let temp = TempDir::new().unwrap();
        let service = WebasystService::with_start_dir(temp.path()).unwrap();

        let result = service.call("missing_tool", rmcp::model::JsonObject::new()).await;
        assert_eq!(result.is_error, Some(true));

        let result = service.call("list_webasyst_apps", rmcp::model::JsonObject::new()).await;
        assert_eq!(result.is_error, Some(true), "no installation around the temp dir");
    }
}
