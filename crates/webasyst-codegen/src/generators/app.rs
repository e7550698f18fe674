//! Application skeletons.
//!
//! [`create_app`] builds a backend application with the localization
//! bridge (`BackendLoc` action and controller) and the UI 2.0 wrapper.
//! [`create_generic_app`] builds a frontend-enabled application inside an
//! explicitly given installation.

use super::{ensure_absent, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;
use webasyst_core::{ProjectLayout, Result};

/// Directory skeleton of a backend application.
pub const APP_DIRS: &[&str] = &[
    "lib/config",
    "lib/actions/backend",
    "lib/classes",
    "lib/models",
    "templates/actions/backend",
    "templates/actions/component",
    "css",
    "js",
    "img",
    "locale",
];

/// Directory skeleton of a frontend-enabled application.
pub const GENERIC_APP_DIRS: &[&str] = &[
    "lib/config",
    "lib/actions/backend",
    "lib/classes",
    "lib/models",
    "templates/actions/backend",
    "css",
    "js",
    "img",
    "locale",
];

/// Parameters for `create_app_structure`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateAppParams {
    /// Application identifier, used as directory name and class prefix
    pub app_id: String,

    /// Human-readable application name
    pub app_name: String,

    /// Short description stored in `app.php`
    #[serde(default)]
    pub description: String,
}

/// Parameters for `create_generic_app`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateGenericAppParams {
    /// Application identifier
    pub name: String,

    /// Display title
    pub title: String,

    /// Short description stored in `app.php`
    #[serde(default)]
    pub description: String,

    /// Optional features: `frontend`, `themes`, `plugins`. Empty enables
    /// frontend and themes.
    #[serde(default)]
    pub features: Vec<String>,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

impl CreateGenericAppParams {
    fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Creates `wa-apps/<app_id>/` with config, backend actions, localization
/// bridge, views, styles and scripts.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the application
/// directory is present, or an I/O or template error.
///
/// # Examples
///
/// ```
/// use webasyst_codegen::generators::app::{CreateAppParams, create_app};
/// use webasyst_codegen::template_engine::TemplateEngine;
/// use webasyst_core::ProjectLayout;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let engine = TemplateEngine::new().unwrap();
/// let params = CreateAppParams {
///     app_id: "blog".into(),
///     app_name: "Blog".into(),
///     description: String::new(),
/// };
///
/// create_app(&engine, &ProjectLayout::new(temp.path()), &params).unwrap();
/// assert!(temp.path().join("wa-apps/blog/lib/config/app.php").exists());
/// ```
pub fn create_app(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &CreateAppParams,
) -> Result<String> {
    let app_id = &params.app_id;
    let app_dir = layout.app_dir(app_id);
    ensure_absent(&app_dir, format!("Application '{app_id}'"))?;
    debug!(app_id = %app_id, "creating application");

    let ui_wrapper = engine.render("app/ui_wrapper.html", params)?;

    let mut code = GeneratedCode::with_dirs(APP_DIRS);
    code.file("lib/config/app.php", engine.render("app/app.php", params)?);
    code.file(
        format!("lib/actions/backend/{app_id}BackendLoc.action.php"),
        engine.render("app/backend_loc.action.php", params)?,
    );
    code.file(
        format!("lib/actions/backend/{app_id}BackendLoc.controller.php"),
        engine.render("app/backend_loc.controller.php", params)?,
    );
    code.file(
        "templates/actions/backend/BackendLoc.html",
        engine.render("app/backend_loc.html", params)?,
    );
    code.file(
        format!("lib/actions/backend/{app_id}Backend.action.php"),
        engine.render("app/backend.action.php", params)?,
    );
    code.file("templates/ui_wrapper.html", ui_wrapper.clone());
    code.file(
        "templates/actions/backend/Backend.html",
        engine.render("app/backend.html", params)?,
    );
    code.file(format!("css/{app_id}.css"), engine.render("app/app.css", params)?);
    code.file(format!("js/{app_id}.js"), engine.render("app/app.js", params)?);
    code.file("templates/actions/component/ui_wrapper.html", ui_wrapper);

    let written = code.write_to(&app_dir)?;
    let headline = format!(
        "Application {} ({app_id}) created: {}\nLocalization configured (BackendLoc).\n\nFiles:",
        params.app_name,
        app_dir.display()
    );
    Ok(summary(&headline, &written))
}

/// Creates `wa-apps/<name>/` inside `webasyst_path` with frontend routing.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the application
/// directory is present, or an I/O or template error.
pub fn create_generic_app(
    engine: &TemplateEngine<'_>,
    params: &CreateGenericAppParams,
) -> Result<String> {
    let layout = ProjectLayout::new(&params.webasyst_path);
    let app_dir = layout.app_dir(&params.name);
    ensure_absent(&app_dir, format!("Application '{}'", params.name))?;

    let defaults = params.features.is_empty();
    let frontend = defaults || params.has_feature("frontend");
    let ctx = json!({
        "name": params.name,
        "title": params.title,
        "description": params.description,
        "frontend": frontend,
        "themes": defaults || params.has_feature("themes"),
        "plugins": params.has_feature("plugins"),
    });

    let name = &params.name;
    let mut code = GeneratedCode::with_dirs(GENERIC_APP_DIRS);
    code.file("lib/config/app.php", engine.render("generic_app/app.php", &ctx)?);
    code.file(
        format!("lib/actions/backend/{name}Backend.action.php"),
        engine.render("generic_app/backend.action.php", &ctx)?,
    );
    code.file(
        "templates/actions/backend/Backend.html",
        engine.render("generic_app/backend.html", &ctx)?,
    );
    if frontend {
        code.file("lib/config/routing.php", engine.render("generic_app/routing.php", &ctx)?);
        code.file(
            format!("lib/actions/frontend/{name}Frontend.action.php"),
            engine.render("generic_app/frontend.action.php", &ctx)?,
        );
    }

    let written = code.write_to(&app_dir)?;
    let headline = format!("Application \"{}\" created: {}", params.title, app_dir.display());
    Ok(summary(&headline, &written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn generic(features: &[&str], root: &std::path::Path) -> CreateGenericAppParams {
        CreateGenericAppParams {
            name: "notes".into(),
            title: "Notes".into(),
            description: String::new(),
            features: features.iter().map(|f| (*f).to_string()).collect(),
            webasyst_path: root.to_path_buf(),
        }
    }

    #[test]
    fn test_create_app_skeleton() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();
        let params = CreateAppParams {
            app_id: "blog".into(),
            app_name: "Blog".into(),
            description: "A blog".into(),
        };

        let text = create_app(&engine, &ProjectLayout::new(temp.path()), &params).unwrap();

        let app = temp.path().join("wa-apps/blog");
        for dir in APP_DIRS {
            assert!(app.join(dir).is_dir(), "missing {dir}");
        }
        assert!(app.join("lib/actions/backend/blogBackendLoc.action.php").is_file());
        assert!(app.join("lib/actions/backend/blogBackendLoc.controller.php").is_file());
        assert!(app.join("templates/actions/component/ui_wrapper.html").is_file());
        assert!(app.join("css/blog.css").is_file());
        assert!(text.starts_with("Application Blog (blog) created"));
    }

    #[test]
    fn test_generic_app_defaults_enable_frontend() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();
        create_generic_app(&engine, &generic(&[], temp.path())).unwrap();

        let app = temp.path().join("wa-apps/notes");
        let config = std::fs::read_to_string(app.join("lib/config/app.php")).unwrap();
        assert!(config.contains("'frontend' => true"));
        assert!(config.contains("'themes' => true"));
        assert!(!config.contains("'plugins'"));
        assert!(app.join("lib/config/routing.php").is_file());
        assert!(!app.join("templates/actions/component").exists());
    }

    #[test]
    fn test_generic_app_backend_only() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();
        create_generic_app(&engine, &generic(&["plugins"], temp.path())).unwrap();

        let app = temp.path().join("wa-apps/notes");
        let config = std::fs::read_to_string(app.join("lib/config/app.php")).unwrap();
        assert!(config.contains("'frontend' => false"));
        assert!(config.contains("'plugins' => true"));
        assert!(!app.join("lib/config/routing.php").exists());
    }
}
