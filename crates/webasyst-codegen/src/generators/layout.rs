//! Desktop and mobile layout pair for an application.

use super::{default_true, require_app, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::fmt::Write as _;
use webasyst_core::naming::capitalize;
use webasyst_core::{Error, ProjectLayout, Result, fs};

/// Parameters for `create_responsive_layout`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ResponsiveLayoutParams {
    /// Owning application identifier
    pub app_id: String,

    /// Add a sidebar to the desktop layout
    #[serde(default = "default_true")]
    pub with_sidebar: bool,

    /// Add a bottom navigation bar to the mobile layout
    #[serde(default = "default_true")]
    pub with_bottombar: bool,
}

/// Creates `lib/layouts/<App>DesktopLayout.class.php`,
/// `<App>MobileLayout.class.php` and their templates.
///
/// The result text ends with the controller snippet that picks a layout by
/// device.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the application is missing and
/// [`Error::AlreadyExists`] if any layout file is present.
pub fn create_responsive_layout(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &ResponsiveLayoutParams,
) -> Result<String> {
    let app_id = &params.app_id;
    let app_dir = require_app(layout, app_id)?;
    let class_prefix = capitalize(app_id);

    let ctx = json!({
        "app_id": app_id,
        "class_prefix": class_prefix,
        "with_sidebar": params.with_sidebar,
        "with_bottombar": params.with_bottombar,
    });

    let mut code = GeneratedCode::new();
    code.file(
        format!("lib/layouts/{class_prefix}DesktopLayout.class.php"),
        engine.render("layout/desktop.class.php", &ctx)?,
    );
    code.file(
        format!("lib/layouts/{class_prefix}MobileLayout.class.php"),
        engine.render("layout/mobile.class.php", &ctx)?,
    );
    code.file("templates/layouts/Desktop.html", engine.render("layout/desktop.html", &ctx)?);
    code.file("templates/layouts/Mobile.html", engine.render("layout/mobile.html", &ctx)?);
    let snippet = engine.render("layout/dispatch.php", &ctx)?;

    for file in code.files() {
        let path = app_dir.join(file.path());
        if fs::exists(&path) {
            return Err(Error::AlreadyExists {
                resource: "Layout".to_string(),
                path,
            });
        }
    }

    let written = code.write_to(&app_dir)?;
    let mut text = summary(&format!("Responsive layouts created for {app_id}:"), &written);
    let _ = write!(text, "\n\nUse in a controller:\n\n{}", snippet.trim_end());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_pair() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("wa-apps/blog")).unwrap();
        let engine = TemplateEngine::new().unwrap();
        let params = ResponsiveLayoutParams {
            app_id: "blog".into(),
            with_sidebar: true,
            with_bottombar: false,
        };
        let layout = ProjectLayout::new(temp.path());

        let text = create_responsive_layout(&engine, &layout, &params).unwrap();

        let app = temp.path().join("wa-apps/blog");
        assert!(app.join("lib/layouts/BlogDesktopLayout.class.php").is_file());
        assert!(app.join("lib/layouts/BlogMobileLayout.class.php").is_file());
        let mobile = std::fs::read_to_string(app.join("templates/layouts/Mobile.html")).unwrap();
        assert!(!mobile.contains("bottombar"));
        assert!(text.contains("isMobile()"));
        assert!(text.contains("new BlogMobileLayout()"));

        let err = create_responsive_layout(&engine, &layout, &params).unwrap_err();
        assert!(err.is_already_exists());
    }
}
