//! `webasyst create`: application skeleton without going through MCP.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::info;
use webasyst_codegen::TemplateEngine;
use webasyst_codegen::generators::app::{CreateAppParams, create_app};
use webasyst_core::ProjectLayout;
use webasyst_core::cli::ExitCode;

use super::report_error;

/// Creates `wa-apps/<app_id>` under `root`.
pub fn run(root: &Path, app_id: String, app_name: String, description: String) -> Result<ExitCode> {
    info!(app_id = %app_id, root = %root.display(), "creating application");
    println!("Creating application {app_name} ({app_id})...");

    let params = CreateAppParams {
        app_id,
        app_name,
        description,
    };
    let result = TemplateEngine::new()
        .and_then(|engine| create_app(&engine, &ProjectLayout::new(root), &params));

    match result {
        Ok(text) => {
            println!("{} {text}", "✓".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report_error(&err)),
    }
}
