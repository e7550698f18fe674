//! Parameter records of the read-only tools.
//!
//! Generator parameters live next to their generators in
//! [`webasyst_codegen::generators`]; this module holds the inputs of the
//! readers and audits that only exist on the server surface.

use schemars::JsonSchema;
use serde::Deserialize;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

// ============================================================================
// Installation readers
// ============================================================================

/// Parameters for `list_webasyst_apps`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListAppsParams {
    /// Include the system application `webasyst`
    #[serde(default)]
    pub include_system: bool,
}

/// Parameters naming a single application.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AppIdParams {
    /// Application identifier (directory under `wa-apps`)
    pub app_id: String,
}

/// Parameters for `get_plugin_info`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PluginInfoParams {
    /// Owning application identifier
    pub app_id: String,

    /// Plugin identifier
    pub plugin_id: String,
}

/// Parameters for `get_routing_config`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RoutingParams {
    /// Application whose `lib/config/routing.php` is read; the installation
    /// wide `wa-config/routing.php` when omitted
    #[serde(default)]
    pub app_id: Option<String>,
}

/// Parameters of tools that take no input.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct EmptyParams {}

/// Parameters for `run_webasyst_cli`.
///
/// # Examples
///
/// ```
/// use webasyst_mcp::types::RunCliParams;
///
/// let params: RunCliParams = serde_json::from_value(serde_json::json!({
///     "command": "createApp",
///     "args": ["blog"],
/// }))
/// .unwrap();
/// assert_eq!(params.args, vec!["blog"]);
/// ```
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunCliParams {
    /// `cli.php` command (e.g. "createApp", "compress")
    pub command: String,

    /// Extra arguments passed after the command
    #[serde(default)]
    pub args: Vec<String>,
}

// ============================================================================
// Project audits
// ============================================================================

/// Parameters for `analyze_project`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeProjectParams {
    /// Installation directory to analyze
    pub project_path: PathBuf,

    /// Label printed in the report header
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,

    /// Also save the report as `mcp-analysis.txt` in the project
    #[serde(default)]
    pub generate_report: bool,
}

fn default_analysis_type() -> String {
    "structure".to_string()
}

/// Parameters naming a project directory.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProjectPathParams {
    /// Application or project directory
    pub project_path: PathBuf,
}

/// Parameters for `validate_ui_usage`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateUiParams {
    /// Application or project directory
    pub project_path: PathBuf,

    /// Report hard-coded colors in stylesheets
    #[serde(default = "default_true")]
    pub check_colors: bool,

    /// Report legacy markup patterns in templates
    #[serde(default = "default_true")]
    pub check_components: bool,

    /// Append guidance on fixing the reported issues
    #[serde(default = "default_true")]
    pub fix_suggestions: bool,
}
