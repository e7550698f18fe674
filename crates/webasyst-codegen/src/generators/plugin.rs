//! Application plugins.
//!
//! Three flavors share the `plugins/<id>/lib/config/plugin.php` convention:
//! a plugin for any installed application, a Site plugin with optional
//! frontend assets and a Shop-Script plugin.

use super::{default_true, ensure_absent, require_app, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;
use webasyst_core::naming::to_camel_case;
use webasyst_core::{ProjectLayout, Result};

/// Access restriction written into code directories of web-facing plugins.
pub(crate) const DENY_ALL: &str = "Deny from all\n";

const PLUGIN_DIRS: &[&str] = &["lib/config", "lib", "templates", "css", "js", "img", "locale"];

const SITE_PLUGIN_DIRS: &[&str] = &[
    "lib",
    "lib/config",
    "templates",
    "css",
    "js",
    "img",
    "locale",
    "locale/ru_RU",
];

/// Parameters for `create_plugin_structure`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePluginParams {
    /// Owning application identifier
    pub app_id: String,

    /// Plugin identifier
    pub plugin_id: String,

    /// Human-readable plugin name
    pub plugin_name: String,

    /// Also write `lib/config/settings.php`
    #[serde(default)]
    pub has_settings: bool,
}

/// One custom setting of a Site plugin.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PluginSetting {
    /// Setting key
    pub name: String,

    /// Label shown in the settings form
    #[serde(default)]
    pub title: String,

    /// Initial value; strings, numbers and booleans are accepted
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,

    /// `waHtmlControl` kind, e.g. `input`, `checkbox`, `select`
    #[serde(default, rename = "type")]
    pub control_type: Option<String>,
}

impl PluginSetting {
    /// Initial value as written into `settings.php`. Empty, zero, `false`
    /// and missing values all render as an empty string.
    #[must_use]
    pub fn default_text(&self) -> String {
        use serde_json::Value;
        match &self.default_value {
            None | Some(Value::Null | Value::Bool(false)) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => {
                String::new()
            }
            Some(other) => other.to_string(),
        }
    }
}

/// Parameters for `create_site_plugin`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateSitePluginParams {
    /// Plugin category, reported in the result
    #[serde(default = "default_plugin_type")]
    pub plugin_type: String,

    /// Plugin identifier
    pub plugin_name: String,

    /// Display title
    pub plugin_title: String,

    /// Short description stored in `plugin.php`
    #[serde(default)]
    pub description: String,

    /// Custom settings added after the `enabled` switch
    #[serde(default)]
    pub settings: Vec<PluginSetting>,

    /// Generate frontend CSS, JS and the `frontend_footer` hook
    #[serde(default = "default_true")]
    pub frontend_assets: bool,

    /// Generate `lib/config/settings.php` for the backend settings screen
    #[serde(default = "default_true")]
    pub admin_interface: bool,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

fn default_plugin_type() -> String {
    "widget".to_string()
}

/// Parameters for `create_shop_plugin`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateShopPluginParams {
    /// Plugin identifier
    pub plugin_name: String,

    /// Display title
    pub plugin_title: String,

    /// Short description stored in `plugin.php`
    #[serde(default)]
    pub description: String,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

/// Creates `wa-apps/<app_id>/plugins/<plugin_id>/`.
///
/// The plugin class is named `<app_id><PluginId>Plugin`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::NotFound`] if the application is missing
/// and [`webasyst_core::Error::AlreadyExists`] if the plugin directory is
/// present.
pub fn create_plugin(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &CreatePluginParams,
) -> Result<String> {
    let CreatePluginParams {
        app_id, plugin_id, ..
    } = params;
    require_app(layout, app_id)?;
    let plugin_dir = layout.plugin_dir(app_id, plugin_id);
    ensure_absent(&plugin_dir, format!("Plugin '{plugin_id}'"))?;

    let class_name = format!("{app_id}{}Plugin", to_camel_case(plugin_id));
    debug!(app_id = %app_id, class = %class_name, "creating plugin");

    let mut code = GeneratedCode::with_dirs(PLUGIN_DIRS);
    code.file(
        "lib/config/plugin.php",
        engine.render(
            "plugin/plugin.php",
            &json!({"plugin_name": params.plugin_name, "plugin_id": plugin_id}),
        )?,
    );
    code.file(
        format!("lib/{class_name}.class.php"),
        engine.render("plugin/class.php", &json!({"class_name": class_name}))?,
    );
    if params.has_settings {
        code.file("lib/config/settings.php", engine.render("plugin/settings.php", &json!({}))?);
    }

    let written = code.write_to(&plugin_dir)?;
    let headline = format!(
        "Plugin {} ({plugin_id}) created for {app_id}: {}",
        params.plugin_name,
        plugin_dir.display()
    );
    Ok(summary(&headline, &written))
}

/// Creates `wa-apps/site/plugins/<plugin_name>/` inside `webasyst_path`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the plugin directory
/// is present, or an I/O or template error.
pub fn create_site_plugin(
    engine: &TemplateEngine<'_>,
    params: &CreateSitePluginParams,
) -> Result<String> {
    let layout = ProjectLayout::new(&params.webasyst_path);
    let name = &params.plugin_name;
    let plugin_dir = layout.plugin_dir("site", name);
    ensure_absent(&plugin_dir, format!("Site plugin '{name}'"))?;

    let class_name = format!("site{}Plugin", to_camel_case(name));
    let ctx = json!({
        "plugin_name": name,
        "plugin_title": params.plugin_title,
        "description": params.description,
        "frontend_assets": params.frontend_assets,
        "class_name": class_name,
    });

    let mut code = GeneratedCode::with_dirs(SITE_PLUGIN_DIRS);
    code.file("lib/config/plugin.php", engine.render("site/plugin.php", &ctx)?);
    code.file(
        format!("lib/{class_name}.class.php"),
        engine.render("site/plugin.class.php", &ctx)?,
    );
    if params.admin_interface {
        let settings: Vec<_> = params
            .settings
            .iter()
            .map(|s| {
                json!({
                    "name": s.name,
                    "title": s.title,
                    "default_value": s.default_text(),
                    "control_type": s.control_type.as_deref().unwrap_or("input").to_uppercase(),
                })
            })
            .collect();
        code.file(
            "lib/config/settings.php",
            engine.render("site/settings.php", &json!({"settings": settings}))?,
        );
    }
    if params.frontend_assets {
        code.file("css/frontend.css", engine.render("site/frontend.css", &ctx)?);
        code.file("js/frontend.js", engine.render("site/frontend.js", &ctx)?);
        code.file(
            "templates/frontend_footer.html",
            engine.render("site/frontend_footer.html", &ctx)?,
        );
    }
    code.file("lib/.htaccess", DENY_ALL);
    code.file("templates/.htaccess", DENY_ALL);

    let written = code.write_to(&plugin_dir)?;
    let headline = format!(
        "Site plugin \"{}\" ({}) created: {}",
        params.plugin_title,
        params.plugin_type,
        plugin_dir.display()
    );
    Ok(summary(&headline, &written))
}

/// Creates `wa-apps/shop/plugins/<plugin_name>/` inside `webasyst_path`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the plugin directory
/// is present, or an I/O or template error.
pub fn create_shop_plugin(
    engine: &TemplateEngine<'_>,
    params: &CreateShopPluginParams,
) -> Result<String> {
    let layout = ProjectLayout::new(&params.webasyst_path);
    let name = &params.plugin_name;
    let plugin_dir = layout.plugin_dir("shop", name);
    ensure_absent(&plugin_dir, format!("Shop plugin '{name}'"))?;

    let class_name = format!("shop{}Plugin", to_camel_case(name));

    let mut code = GeneratedCode::with_dirs(PLUGIN_DIRS);
    code.file("lib/config/plugin.php", engine.render("shop/plugin.php", params)?);
    code.file(
        format!("lib/{class_name}.class.php"),
        engine.render("shop/plugin.class.php", &json!({"class_name": class_name}))?,
    );

    let written = code.write_to(&plugin_dir)?;
    let headline = format!(
        "Shop plugin \"{}\" created: {}",
        params.plugin_title,
        plugin_dir.display()
    );
    Ok(summary(&headline, &written))
}
