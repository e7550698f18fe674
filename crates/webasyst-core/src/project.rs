//! Read-only inspection of an installation: applications, plugins, themes,
//! widgets and configuration files.

use crate::layout::{ProjectLayout, SYSTEM_APP_ID};
use crate::php_config::{ConfigMap, ConfigValue, read_php_config};
use crate::{Error, Result, fs};
use serde::Serialize;
use std::path::Path;

/// Maximum number of characters returned from the system config file.
pub const SYSTEM_CONFIG_PREVIEW_CHARS: usize = 2000;

const DEFAULT_VERSION: &str = "0.0.1";

/// Name and version of an installed extension (application, plugin, widget).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionSummary {
    /// Directory name
    pub id: String,
    /// Display name, falling back to the id
    pub name: String,
    /// Declared version, falling back to `0.0.1`
    pub version: String,
}

impl ExtensionSummary {
    fn from_config(id: &str, config: &ConfigMap) -> Self {
        let field = |key: &str, fallback: &str| {
            config
                .get(key)
                .map_or_else(|| fallback.to_string(), ConfigValue::to_string)
        };
        Self {
            id: id.to_string(),
            name: field("name", id),
            version: field("version", DEFAULT_VERSION),
        }
    }
}

/// Parsed configuration of a single extension plus its location.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionInfo {
    /// Directory name
    pub id: String,
    /// Owning application, for plugins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Flat values read from the config file
    #[serde(flatten)]
    pub config: ConfigMap,
    /// Absolute directory of the extension
    pub path: String,
}

impl ExtensionInfo {
    /// Folds the config over the identity fields: a config `id` (or `app_id`)
    /// replaces the directory name, while `path` always stays the real
    /// directory. Serialized keys stay unique.
    fn new(id: &str, app_id: Option<&str>, mut config: ConfigMap, path: &Path) -> Self {
        let id = config
            .remove("id")
            .map_or_else(|| id.to_string(), |v| v.to_string());
        let app_id = app_id.map(|owner| {
            config
                .remove("app_id")
                .map_or_else(|| owner.to_string(), |v| v.to_string())
        });
        config.remove("path");
        Self {
            id,
            app_id,
            config,
            path: path.display().to_string(),
        }
    }
}

/// Reads a config file, treating an unparseable file as empty.
fn read_config_lenient(path: &Path) -> ConfigMap {
    read_php_config(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "failed to read config");
        ConfigMap::new()
    })
}

/// Lists applications that have a `lib/config/app.php`.
///
/// The system application `webasyst` is skipped unless `include_system`.
///
/// # Errors
///
/// Returns an error if `wa-apps` cannot be read.
pub fn list_apps(layout: &ProjectLayout, include_system: bool) -> Result<Vec<ExtensionSummary>> {
    let mut apps = Vec::new();
    for app_id in fs::list_dir(&layout.apps_dir())? {
        let config_path = layout.app_config(&app_id);
        if !fs::exists(&config_path) {
            continue;
        }
        if app_id == SYSTEM_APP_ID && !include_system {
            continue;
        }
        let config = read_config_lenient(&config_path);
        apps.push(ExtensionSummary::from_config(&app_id, &config));
    }
    Ok(apps)
}

/// Returns the parsed `app.php` of one application.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the application has no config file.
pub fn app_info(layout: &ProjectLayout, app_id: &str) -> Result<ExtensionInfo> {
    let config_path = layout.app_config(app_id);
    if !fs::exists(&config_path) {
        return Err(Error::NotFound {
            resource: format!("Application '{app_id}'"),
        });
    }
    Ok(ExtensionInfo::new(
        app_id,
        None,
        read_config_lenient(&config_path),
        &layout.app_dir(app_id),
    ))
}

/// Lists plugins of an application. A missing `plugins` directory yields
/// an empty list.
///
/// # Errors
///
/// Returns an error if the plugins directory cannot be read.
pub fn list_plugins(layout: &ProjectLayout, app_id: &str) -> Result<Vec<ExtensionSummary>> {
    let mut plugins = Vec::new();
    for plugin_id in fs::list_subdirs(&layout.plugins_dir(app_id))? {
        let config_path = layout.plugin_config(app_id, &plugin_id);
        if fs::exists(&config_path) {
            let config = read_config_lenient(&config_path);
            plugins.push(ExtensionSummary::from_config(&plugin_id, &config));
        }
    }
    Ok(plugins)
}

/// Returns the parsed `plugin.php` of one plugin.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the plugin has no config file.
pub fn plugin_info(layout: &ProjectLayout, app_id: &str, plugin_id: &str) -> Result<ExtensionInfo> {
    let config_path = layout.plugin_config(app_id, plugin_id);
    if !fs::exists(&config_path) {
        return Err(Error::NotFound {
            resource: format!("Plugin '{plugin_id}' of application '{app_id}'"),
        });
    }
    Ok(ExtensionInfo::new(
        plugin_id,
        Some(app_id),
        read_config_lenient(&config_path),
        &layout.plugin_dir(app_id, plugin_id),
    ))
}

/// Lists theme ids of an application (directories holding `theme.xml`).
///
/// # Errors
///
/// Returns an error if the themes directory cannot be read.
pub fn list_themes(layout: &ProjectLayout, app_id: &str) -> Result<Vec<String>> {
    let themes_dir = layout.themes_dir(app_id);
    Ok(fs::list_subdirs(&themes_dir)?
        .into_iter()
        .filter(|id| fs::exists(&themes_dir.join(id).join("theme.xml")))
        .collect())
}

/// Lists widgets of an application (directories holding
/// `lib/config/widget.php`). The version field is not reported for widgets.
///
/// # Errors
///
/// Returns an error if the widgets directory cannot be read.
pub fn list_widgets(layout: &ProjectLayout, app_id: &str) -> Result<Vec<ExtensionSummary>> {
    let mut widgets = Vec::new();
    for widget_id in fs::list_subdirs(&layout.widgets_dir(app_id))? {
        let config_path = layout
            .widget_dir(app_id, &widget_id)
            .join("lib/config/widget.php");
        if fs::exists(&config_path) {
            let config = read_config_lenient(&config_path);
            widgets.push(ExtensionSummary::from_config(&widget_id, &config));
        }
    }
    Ok(widgets)
}

/// Returns the raw routing file of an application or of the installation.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the routing file is missing.
pub fn routing_config(layout: &ProjectLayout, app_id: Option<&str>) -> Result<String> {
    let path = layout.routing_config(app_id);
    if !fs::exists(&path) {
        return Err(Error::NotFound {
            resource: "Routing configuration".to_string(),
        });
    }
    fs::read_file(&path)
}

/// Returns the first [`SYSTEM_CONFIG_PREVIEW_CHARS`] characters of
/// `wa-config/SystemConfig.class.php`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file is missing.
pub fn system_config_preview(layout: &ProjectLayout) -> Result<String> {
    let path = layout.system_config();
    if !fs::exists(&path) {
        return Err(Error::NotFound {
            resource: "System configuration".to_string(),
        });
    }
    let content = fs::read_file(&path)?;
    Ok(content.chars().take(SYSTEM_CONFIG_PREVIEW_CHARS).collect())
}
