//! Webasyst UI 2.0 styling: color scheme stylesheets and the UI kit
//! bootstrap for an existing project.

use super::{default_true, ensure_absent, require_app, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write as _;
use std::path::PathBuf;
use webasyst_core::{ProjectLayout, Result, fs};

/// System fallbacks for the five scheme colors, in
/// primary, secondary, accent, text, background order.
pub const COLOR_DEFAULTS: [&str; 5] = [
    "var(--accent-color)",
    "var(--blue)",
    "var(--accent-color)",
    "var(--text-color)",
    "var(--background-color)",
];

/// Parameters for `generate_color_scheme`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ColorSchemeParams {
    /// Owning application identifier
    pub app_id: String,

    /// Scheme name, used in the file name `css/<scheme>-theme.css`
    #[serde(default = "default_scheme_name")]
    pub scheme_name: String,

    /// Primary color; defaults to `var(--accent-color)`
    pub primary_color: Option<String>,

    /// Secondary color; defaults to `var(--blue)`
    pub secondary_color: Option<String>,

    /// Accent color; defaults to `var(--accent-color)`
    pub accent_color: Option<String>,

    /// Text color; defaults to `var(--text-color)`
    pub text_color: Option<String>,

    /// Background color; defaults to `var(--background-color)`
    pub background_color: Option<String>,
}

fn default_scheme_name() -> String {
    "custom".to_string()
}

/// Parameters for `enable_webasyst_ui`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EnableUiParams {
    /// Kind of project the UI kit is added to (`app`, `plugin`, `theme`)
    pub project_type: String,

    /// Project directory
    pub target_path: PathBuf,

    /// Load the icon font
    #[serde(default = "default_true")]
    pub include_icons: bool,

    /// Load the UI component scripts
    #[serde(default = "default_true")]
    pub include_components: bool,

    /// Add a `:root` block for color overrides
    #[serde(default = "default_true")]
    pub include_color_scheme: bool,
}

/// Writes `css/<scheme>-theme.css` with `--<app>-*` custom properties.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::NotFound`] if the application is missing
/// and [`webasyst_core::Error::AlreadyExists`] if the stylesheet is present.
pub fn generate_color_scheme(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &ColorSchemeParams,
) -> Result<String> {
    let app_dir = require_app(layout, &params.app_id)?;
    let scheme = &params.scheme_name;
    let rel_path = format!("css/{scheme}-theme.css");
    ensure_absent(&app_dir.join(&rel_path), format!("Color scheme '{scheme}'"))?;

    let [primary, secondary, accent, text, background] = COLOR_DEFAULTS;
    let pick = |value: &Option<String>, fallback: &str| value.clone().unwrap_or_else(|| fallback.to_string());

    let mut code = GeneratedCode::new();
    code.file(
        rel_path.as_str(),
        engine.render(
            "style/color_scheme.css",
            &json!({
                "scheme_name": scheme,
                "app_id": params.app_id,
                "primary": pick(&params.primary_color, primary),
                "secondary": pick(&params.secondary_color, secondary),
                "accent": pick(&params.accent_color, accent),
                "text": pick(&params.text_color, text),
                "background": pick(&params.background_color, background),
            }),
        )?,
    );

    let written = code.write_to(&app_dir)?;
    let mut text = summary(&format!("Color scheme \"{scheme}\" created:"), &written);
    let _ = write!(
        text,
        "\n\nInclude it in a template:\n<link rel=\"stylesheet\" href=\"{{$wa_app_static_url}}{rel_path}\">"
    );
    Ok(text)
}

/// Adds `css/wa-ui-variables.css` and `templates/ui_wrapper.html` to a
/// project. Files that already exist are left untouched and reported.
///
/// # Errors
///
/// Returns an I/O or template error.
pub fn enable_webasyst_ui(engine: &TemplateEngine<'_>, params: &EnableUiParams) -> Result<String> {
    let target = &params.target_path;

    let mut code = GeneratedCode::with_dirs(&["css", "templates"]);
    let mut skipped = Vec::new();
    for (rel_path, template) in [
        ("css/wa-ui-variables.css", "style/ui_variables.css"),
        ("templates/ui_wrapper.html", "style/ui_wrapper.html"),
    ] {
        if fs::exists(&target.join(rel_path)) {
            skipped.push(rel_path);
        } else {
            code.file(rel_path, engine.render(template, params)?);
        }
    }

    let written = code.write_to(target)?;
    let mut text = summary(
        &format!("Webasyst UI 2.0 enabled for {}:", params.project_type),
        &written,
    );
    for rel_path in skipped {
        let _ = write!(text, "\nSkipped existing {rel_path}");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scheme(temp: &TempDir) -> ColorSchemeParams {
        std::fs::create_dir_all(temp.path().join("wa-apps/blog")).unwrap();
        ColorSchemeParams {
            app_id: "blog".into(),
            scheme_name: default_scheme_name(),
            primary_color: Some("#ff0000".into()),
            secondary_color: None,
            accent_color: None,
            text_color: None,
            background_color: None,
        }
    }

    #[test]
    fn test_color_scheme_defaults() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();

        let text = generate_color_scheme(&engine, &ProjectLayout::new(temp.path()), &scheme(&temp)).unwrap();

        let css = std::fs::read_to_string(temp.path().join("wa-apps/blog/css/custom-theme.css")).unwrap();
        assert!(css.contains("--blog-primary: #ff0000;"));
        assert!(css.contains("--blog-secondary: var(--blue);"));
        assert!(css.contains("--blog-accent: var(--accent-color);"));
        assert!(css.contains("--blog-text: var(--text-color);"));
        assert!(css.contains("--blog-bg: var(--background-color);"));
        assert!(text.ends_with(r#"<link rel="stylesheet" href="{$wa_app_static_url}css/custom-theme.css">"#));
    }

    #[test]
    fn test_color_scheme_conflict() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        let params = scheme(&temp);

        generate_color_scheme(&engine, &layout, &params).unwrap();
        assert!(generate_color_scheme(&engine, &layout, &params).unwrap_err().is_already_exists());
    }

    #[test]
    fn test_enable_ui_skips_existing_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("templates")).unwrap();
        std::fs::write(temp.path().join("templates/ui_wrapper.html"), "mine").unwrap();
        let engine = TemplateEngine::new().unwrap();
        let params = EnableUiParams {
            project_type: "app".into(),
            target_path: temp.path().to_path_buf(),
            include_icons: false,
            include_components: true,
            include_color_scheme: true,
        };

        let text = enable_webasyst_ui(&engine, &params).unwrap();

        assert!(text.contains("Skipped existing templates/ui_wrapper.html"));
        assert_eq!(
            std::fs::read_to_string(temp.path().join("templates/ui_wrapper.html")).unwrap(),
            "mine"
        );
        let css = std::fs::read_to_string(temp.path().join("css/wa-ui-variables.css")).unwrap();
        assert!(css.contains(":root"));
    }
}
