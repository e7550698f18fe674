//! Handlers of the read-only tools and project audits.
//!
//! Generators are wired straight into the registry; the functions here add
//! the text formatting the readers in `webasyst_core` leave to the caller.
//! Every handler takes its parameters by value to match the registry's
//! handler signature.

#![allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]

use crate::dispatcher::ToolContext;
use crate::types::{
    AnalyzeProjectParams, AppIdParams, EmptyParams, ListAppsParams, PluginInfoParams,
    ProjectPathParams, RoutingParams, RunCliParams, ValidateUiParams,
};
use serde::Serialize;
use std::fmt::Write as _;
use webasyst_core::audit::{self, ANALYSIS_REPORT_FILE, UiCheckOptions};
use webasyst_core::process::run_program;
use webasyst_core::project::{self, ExtensionSummary};
use webasyst_core::{Error, Result, fs};

const PHP_HINT: &str = "php is not available, install the PHP CLI";

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Serialization {
        message: e.to_string(),
        source: Some(e),
    })
}

fn bullet_list(headline: &str, items: impl IntoIterator<Item = String>) -> String {
    let mut text = format!("{headline}\n");
    for item in items {
        let _ = write!(text, "\n- {item}");
    }
    text
}

fn describe(summary: &ExtensionSummary) -> String {
    format!("{} ({}) - v{}", summary.name, summary.id, summary.version)
}

/// `list_webasyst_apps`
pub fn list_webasyst_apps(ctx: &ToolContext, params: ListAppsParams) -> Result<String> {
    let apps = project::list_apps(&ctx.layout()?, params.include_system)?;
    if apps.is_empty() {
        return Ok("No applications found".to_string());
    }
    Ok(bullet_list(
        &format!("Found {} application(s):", apps.len()),
        apps.iter().map(describe),
    ))
}

/// `get_app_info`
pub fn get_app_info(ctx: &ToolContext, params: AppIdParams) -> Result<String> {
    to_json(&project::app_info(&ctx.layout()?, &params.app_id)?)
}

/// `list_app_plugins`
pub fn list_app_plugins(ctx: &ToolContext, params: AppIdParams) -> Result<String> {
    let plugins = project::list_plugins(&ctx.layout()?, &params.app_id)?;
    if plugins.is_empty() {
        return Ok(format!("Application {} has no plugins", params.app_id));
    }
    Ok(bullet_list(
        &format!("Plugins of {}:", params.app_id),
        plugins.iter().map(describe),
    ))
}

/// `get_plugin_info`
pub fn get_plugin_info(ctx: &ToolContext, params: PluginInfoParams) -> Result<String> {
    to_json(&project::plugin_info(
        &ctx.layout()?,
        &params.app_id,
        &params.plugin_id,
    )?)
}

/// `list_app_themes`
pub fn list_app_themes(ctx: &ToolContext, params: AppIdParams) -> Result<String> {
    let themes = project::list_themes(&ctx.layout()?, &params.app_id)?;
    if themes.is_empty() {
        return Ok(format!("Application {} has no themes", params.app_id));
    }
    Ok(bullet_list(&format!("Themes of {}:", params.app_id), themes))
}

/// `list_app_widgets`
pub fn list_app_widgets(ctx: &ToolContext, params: AppIdParams) -> Result<String> {
    let widgets = project::list_widgets(&ctx.layout()?, &params.app_id)?;
    if widgets.is_empty() {
        return Ok(format!("Application {} has no widgets", params.app_id));
    }
    Ok(bullet_list(
        &format!("Widgets of {}:", params.app_id),
        widgets.iter().map(|w| format!("{} ({})", w.name, w.id)),
    ))
}

/// `get_routing_config`
pub fn get_routing_config(ctx: &ToolContext, params: RoutingParams) -> Result<String> {
    project::routing_config(&ctx.layout()?, params.app_id.as_deref())
}

/// `get_system_config`
pub fn get_system_config(ctx: &ToolContext, _params: EmptyParams) -> Result<String> {
    project::system_config_preview(&ctx.layout()?)
}

/// Runs `php cli.php <command> <args>` in the installation root.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the root has no `cli.php` and
/// [`Error::ExternalTool`] if `php` is missing or the command fails.
pub fn run_webasyst_cli(ctx: &ToolContext, params: RunCliParams) -> Result<String> {
    let layout = ctx.layout()?;
    let cli_path = layout.root().join("cli.php");
    if !fs::exists(&cli_path) {
        return Err(Error::NotFound {
            resource: format!("cli.php in {}", layout.root().display()),
        });
    }

    let mut args = vec!["cli.php", params.command.as_str()];
    args.extend(params.args.iter().map(String::as_str));
    let output = run_program("php", &args, layout.root(), PHP_HINT)?;

    let stdout = output.stdout.trim();
    if stdout.is_empty() {
        Ok(format!("Command {} finished with no output", params.command))
    } else {
        Ok(stdout.to_string())
    }
}

/// Counts extensions of an installation and optionally saves the report.
///
/// # Errors
///
/// Returns an I/O error if the project cannot be read or the report cannot
/// be written.
pub fn analyze_project(_ctx: &ToolContext, params: AnalyzeProjectParams) -> Result<String> {
    let summary = audit::summarize_project(&params.project_path)?;
    let mut text = summary.report(&params.analysis_type);

    if params.generate_report {
        let report_path = params.project_path.join(ANALYSIS_REPORT_FILE);
        fs::write_file(&report_path, &text)?;
        let _ = write!(text, "\n\nReport saved: {}", report_path.display());
    }
    Ok(text)
}

/// `check_project_compliance`
pub fn check_project_compliance(_ctx: &ToolContext, params: ProjectPathParams) -> Result<String> {
    let missing = audit::missing_required_entries(&params.project_path);
    if missing.is_empty() {
        Ok("Basic UI/localization requirements met".to_string())
    } else {
        Ok(format!("Needs work: {}", missing.join(", ")))
    }
}

/// `validate_ui_usage`
pub fn validate_ui_usage(_ctx: &ToolContext, params: ValidateUiParams) -> Result<String> {
    let options = UiCheckOptions {
        check_colors: params.check_colors,
        check_components: params.check_components,
        fix_suggestions: params.fix_suggestions,
    };
    Ok(audit::validate_ui(&params.project_path, options)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn installation() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "index.php", "<?php\n");
        std::fs::create_dir_all(temp.path().join("wa-system")).unwrap();
        std::fs::create_dir_all(temp.path().join("wa-apps")).unwrap();
        temp
    }

    #[test]
    fn test_list_apps_formatting() {
        let temp = installation();
        write(
            temp.path(),
            "wa-apps/shop/lib/config/app.php",
            "<?php\nreturn array('name' => 'Shop', 'version' => '10.1');\n",
        );
        write(temp.path(), "wa-apps/webasyst/lib/config/app.php", "<?php\nreturn array();\n");
        let ctx = ToolContext::new(temp.path()).unwrap();

        let text = list_webasyst_apps(&ctx, ListAppsParams::default()).unwrap();
        assert_eq!(text, "Found 1 application(s):\n\n- Shop (shop) - v10.1");

        let text = list_webasyst_apps(&ctx, ListAppsParams { include_system: true }).unwrap();
        assert!(text.contains("- webasyst (webasyst) - v0.0.1"));
    }

    #[test]
    fn test_empty_plugin_list() {
        let temp = installation();
        std::fs::create_dir_all(temp.path().join("wa-apps/blog")).unwrap();
        let ctx = ToolContext::new(temp.path()).unwrap();

        let text = list_app_plugins(&ctx, AppIdParams { app_id: "blog".into() }).unwrap();
        assert_eq!(text, "Application blog has no plugins");
    }

    #[test]
    fn test_app_info_json() {
        let temp = installation();
        write(
            temp.path(),
            "wa-apps/blog/lib/config/app.php",
            "<?php\nreturn array('name' => 'Blog', 'frontend' => true);\n",
        );
        let ctx = ToolContext::new(temp.path()).unwrap();

        let text = get_app_info(&ctx, AppIdParams { app_id: "blog".into() }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["id"], "blog");
        assert_eq!(value["name"], "Blog");
        assert_eq!(value["frontend"], true);

        let err = get_app_info(&ctx, AppIdParams { app_id: "ghost".into() }).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_cli_requires_cli_php() {
        let temp = installation();
        let ctx = ToolContext::new(temp.path()).unwrap();
        let params = RunCliParams {
            command: "createApp".into(),
            args: vec![],
        };

        let err = run_webasyst_cli(&ctx, params).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("cli.php"));
    }

    #[test]
    fn test_analyze_with_report() {
        let temp = installation();
        write(temp.path(), "wa-apps/blog/lib/config/app.php", "<?php\n");
        std::fs::create_dir_all(temp.path().join("wa-apps/blog/plugins/tags")).unwrap();
        let ctx = ToolContext::new(temp.path()).unwrap();
        let params = AnalyzeProjectParams {
            project_path: temp.path().to_path_buf(),
            analysis_type: "full".into(),
            generate_report: true,
        };

        let text = analyze_project(&ctx, params).unwrap();

        assert!(text.starts_with("Analysis: full\nApplications: 1\nPlugins: 1"));
        let saved = std::fs::read_to_string(temp.path().join(ANALYSIS_REPORT_FILE)).unwrap();
        assert!(saved.contains("Applications: 1"));
        assert!(!saved.contains("Report saved"));
    }

    #[test]
    fn test_compliance() {
        let temp = TempDir::new().unwrap();
        let ctx = ToolContext::new(temp.path()).unwrap();
        let params = || ProjectPathParams {
            project_path: temp.path().to_path_buf(),
        };

        let text = check_project_compliance(&ctx, params()).unwrap();
        assert_eq!(
            text,
            "Needs work: templates/ui_wrapper.html, lib/actions/backend, locale"
        );

        write(temp.path(), "templates/ui_wrapper.html", "");
        std::fs::create_dir_all(temp.path().join("lib/actions/backend")).unwrap();
        std::fs::create_dir_all(temp.path().join("locale")).unwrap();
        let text = check_project_compliance(&ctx, params()).unwrap();
        assert_eq!(text, "Basic UI/localization requirements met");
    }

    #[test]
    fn test_validate_ui_clean_project() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "css/app.css", "a { color: var(--text-color); }\n");
        let ctx = ToolContext::new(temp.path()).unwrap();
        let params: ValidateUiParams =
            serde_json::from_value(serde_json::json!({"project_path": temp.path()})).unwrap();

        let text = validate_ui_usage(&ctx, params).unwrap();
        assert_eq!(text, "UI validation passed! No issues found.");
    }
}
