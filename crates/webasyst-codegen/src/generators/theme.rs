//! Design themes.
//!
//! Every theme directory holds the same four files: `theme.xml` descriptor,
//! `index.html` entry view, `theme.css` and an empty `cover.png`
//! placeholder. The Site and Shop-Script variants differ in their entry view
//! and take their color palette from the caller.

use super::{default_true, ensure_absent, require_app, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use webasyst_core::{ProjectLayout, Result};

/// Prototype name meaning "no parent theme".
pub const DEFAULT_PROTOTYPE: &str = "default";

const PRIMARY_FALLBACK: &str = "var(--accent-color)";

/// Parameters for `create_theme`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateThemeParams {
    /// Owning application identifier
    pub app_id: String,

    /// Theme identifier
    pub theme_id: String,

    /// Display name
    pub theme_name: String,

    /// Parent theme to inherit from; `default` means none
    #[serde(default = "default_prototype")]
    pub prototype: String,
}

fn default_prototype() -> String {
    DEFAULT_PROTOTYPE.to_string()
}

/// Parameters for `create_site_theme`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateSiteThemeParams {
    /// Theme identifier
    pub theme_name: String,

    /// Display title
    pub theme_title: String,

    /// Style flavor added as a body class, e.g. `modern`, `classic`
    #[serde(default = "default_style_type")]
    pub style_type: String,

    /// CSS custom properties, e.g. `{"primary": "#0a84ff"}`
    #[serde(default)]
    pub color_scheme: BTreeMap<String, String>,

    /// Emit tablet and phone media queries
    #[serde(default = "default_true")]
    pub responsive_breakpoints: bool,

    /// Emit a `prefers-color-scheme: dark` block
    #[serde(default)]
    pub dark_mode: bool,

    /// Emit right-to-left direction support
    #[serde(default)]
    pub rtl_support: bool,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

/// Parameters for `create_shop_theme`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateShopThemeParams {
    /// Theme identifier
    pub theme_name: String,

    /// Display title
    pub theme_title: String,

    /// Style flavor
    #[serde(default = "default_style_type")]
    pub style_type: String,

    /// CSS custom properties, e.g. `{"primary": "#0a84ff"}`
    #[serde(default)]
    pub color_scheme: BTreeMap<String, String>,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

fn default_style_type() -> String {
    "modern".to_string()
}

/// Collects the palette, falling back to the system accent for `primary`.
fn palette(color_scheme: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut colors = color_scheme.clone();
    colors
        .entry("primary".to_string())
        .or_insert_with(|| PRIMARY_FALLBACK.to_string());
    colors
}

struct ThemeFiles<'a> {
    dir: &'a Path,
    descriptor: Value,
    index_template: &'a str,
    index_ctx: Value,
    css_ctx: Value,
}

fn write_theme(engine: &TemplateEngine<'_>, files: &ThemeFiles<'_>) -> Result<Vec<PathBuf>> {
    let mut code = GeneratedCode::new();
    code.file("theme.xml", engine.render("theme/theme.xml", &files.descriptor)?);
    code.file("index.html", engine.render(files.index_template, &files.index_ctx)?);
    code.file("theme.css", engine.render("theme/theme.css", &files.css_ctx)?);
    code.file("cover.png", "");
    code.write_to(files.dir)
}

/// Creates `wa-apps/<app_id>/themes/<theme_id>/`.
///
/// A `prototype` other than `default` is recorded as the parent theme in
/// `theme.xml`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::NotFound`] if the application is missing
/// and [`webasyst_core::Error::AlreadyExists`] if the theme directory is
/// present.
pub fn create_theme(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &CreateThemeParams,
) -> Result<String> {
    let CreateThemeParams {
        app_id,
        theme_id,
        theme_name,
        prototype,
    } = params;
    require_app(layout, app_id)?;
    let theme_dir = layout.theme_dir(app_id, theme_id);
    ensure_absent(&theme_dir, format!("Theme '{theme_id}'"))?;

    let parent = (prototype.as_str() != DEFAULT_PROTOTYPE && !prototype.is_empty())
        .then_some(prototype.as_str());
    let written = write_theme(
        engine,
        &ThemeFiles {
            dir: &theme_dir,
            descriptor: json!({
                "theme_id": theme_id,
                "app_id": app_id,
                "theme_name": theme_name,
                "parent_theme_id": parent,
            }),
            index_template: "theme/index.html",
            index_ctx: json!({"theme_name": theme_name}),
            css_ctx: json!({
                "theme_name": theme_name,
                "colors": palette(&BTreeMap::new()),
                "responsive_breakpoints": false,
                "dark_mode": false,
                "rtl_support": false,
            }),
        },
    )?;

    let headline = format!(
        "Theme {theme_name} ({theme_id}) created for application {app_id}: {}",
        theme_dir.display()
    );
    Ok(summary(&headline, &written))
}

/// Creates `wa-apps/site/themes/<theme_name>/` inside `webasyst_path`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the theme directory is
/// present, or an I/O or template error.
pub fn create_site_theme(
    engine: &TemplateEngine<'_>,
    params: &CreateSiteThemeParams,
) -> Result<String> {
    let layout = ProjectLayout::new(&params.webasyst_path);
    let theme_dir = layout.theme_dir("site", &params.theme_name);
    ensure_absent(&theme_dir, format!("Site theme '{}'", params.theme_name))?;

    let title = &params.theme_title;
    let written = write_theme(
        engine,
        &ThemeFiles {
            dir: &theme_dir,
            descriptor: json!({
                "theme_id": params.theme_name,
                "app_id": "site",
                "theme_name": title,
                "parent_theme_id": null,
            }),
            index_template: "theme/site_index.html",
            index_ctx: json!({
                "theme_name": title,
                "rtl_support": params.rtl_support,
                "style_type": params.style_type,
            }),
            css_ctx: json!({
                "theme_name": title,
                "colors": palette(&params.color_scheme),
                "responsive_breakpoints": params.responsive_breakpoints,
                "dark_mode": params.dark_mode,
                "rtl_support": params.rtl_support,
            }),
        },
    )?;

    let headline = format!("Site theme \"{title}\" created: {}", theme_dir.display());
    Ok(summary(&headline, &written))
}

/// Creates `wa-apps/shop/themes/<theme_name>/` inside `webasyst_path`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the theme directory is
/// present, or an I/O or template error.
pub fn create_shop_theme(
    engine: &TemplateEngine<'_>,
    params: &CreateShopThemeParams,
) -> Result<String> {
    let layout = ProjectLayout::new(&params.webasyst_path);
    let theme_dir = layout.theme_dir("shop", &params.theme_name);
    ensure_absent(&theme_dir, format!("Shop theme '{}'", params.theme_name))?;

    let title = &params.theme_title;
    let written = write_theme(
        engine,
        &ThemeFiles {
            dir: &theme_dir,
            descriptor: json!({
                "theme_id": params.theme_name,
                "app_id": "shop",
                "theme_name": title,
                "parent_theme_id": null,
            }),
            index_template: "theme/shop_index.html",
            index_ctx: json!({"theme_name": title}),
            css_ctx: json!({
                "theme_name": format!("{title} ({})", params.style_type),
                "colors": palette(&params.color_scheme),
                "responsive_breakpoints": true,
                "dark_mode": false,
                "rtl_support": false,
            }),
        },
    )?;

    let headline = format!("Shop theme \"{title}\" created: {}", theme_dir.display());
    Ok(summary(&headline, &written))
}
