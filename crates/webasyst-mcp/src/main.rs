//! Webasyst MCP server entry point.
//!
//! Run it from inside a Webasyst installation; every tool call looks for the
//! installation root upward from the working directory.
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "webasyst": {
//!       "command": "webasyst-mcp",
//!       "cwd": "/var/www/webasyst"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use webasyst_mcp::WebasystService;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,webasyst_mcp=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    tracing::info!("Starting webasyst-mcp v{}", env!("CARGO_PKG_VERSION"));

    let service = WebasystService::new()?.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
