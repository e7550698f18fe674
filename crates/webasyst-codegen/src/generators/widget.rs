//! Dashboard widgets and Site content widgets.

use super::{default_true, ensure_absent, require_app, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;
use webasyst_core::layout::SYSTEM_APP_ID;
use webasyst_core::naming::to_camel_case;
use webasyst_core::{ProjectLayout, Result};

const WIDGET_DIRS: &[&str] = &["lib/config", "lib", "templates", "img"];

const SITE_WIDGET_DIRS: &[&str] = &["lib", "templates", "css", "js", "img", "locale"];

/// Parameters for `create_widget`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateWidgetParams {
    /// Owning application; `webasyst` creates a system widget in `wa-widgets`
    pub app_id: String,

    /// Widget identifier
    pub widget_id: String,

    /// Human-readable widget name
    pub widget_name: String,

    /// Also write `lib/config/settings.php`
    #[serde(default)]
    pub has_settings: bool,
}

/// Parameters for `create_site_widget`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateSiteWidgetParams {
    /// Widget identifier
    pub widget_name: String,

    /// Display title
    pub widget_title: String,

    /// Widget category shown in the markup
    #[serde(default = "default_widget_type")]
    pub widget_type: String,

    /// Also write `lib/config/settings.php`
    #[serde(default = "default_true")]
    pub has_settings: bool,

    /// Allow the Site app to cache the rendered widget
    #[serde(default)]
    pub is_cacheable: bool,

    /// Add the responsive wrapper class
    #[serde(default = "default_true")]
    pub responsive: bool,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

fn default_widget_type() -> String {
    "content".to_string()
}

/// Returns the PHP class name of a dashboard widget.
///
/// System widgets use the bare id, application widgets are prefixed with
/// the application id.
///
/// # Examples
///
/// ```
/// use webasyst_codegen::generators::widget::widget_class_name;
///
/// assert_eq!(widget_class_name("webasyst", "clock"), "clockWidget");
/// assert_eq!(widget_class_name("shop", "sales_chart"), "shopSalesChartWidget");
/// ```
#[must_use]
pub fn widget_class_name(app_id: &str, widget_id: &str) -> String {
    if app_id == SYSTEM_APP_ID {
        format!("{widget_id}Widget")
    } else {
        format!("{app_id}{}Widget", to_camel_case(widget_id))
    }
}

/// Creates a dashboard widget.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::NotFound`] if a non-system owning
/// application is missing and [`webasyst_core::Error::AlreadyExists`] if the
/// widget directory is present.
pub fn create_widget(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &CreateWidgetParams,
) -> Result<String> {
    let CreateWidgetParams {
        app_id, widget_id, ..
    } = params;
    if app_id != SYSTEM_APP_ID {
        require_app(layout, app_id)?;
    }
    let widget_dir = layout.widget_dir(app_id, widget_id);
    ensure_absent(&widget_dir, format!("Widget '{widget_id}'"))?;

    let class_name = widget_class_name(app_id, widget_id);
    debug!(app_id = %app_id, class = %class_name, "creating widget");

    let mut code = GeneratedCode::with_dirs(WIDGET_DIRS);
    code.file(
        "lib/config/widget.php",
        engine.render(
            "widget/widget.php",
            &json!({"widget_name": params.widget_name, "widget_id": widget_id}),
        )?,
    );
    if params.has_settings {
        code.file("lib/config/settings.php", engine.render("widget/settings.php", &json!({}))?);
    }
    code.file(
        format!("lib/{class_name}.widget.php"),
        engine.render("widget/widget.class.php", &json!({"class_name": class_name}))?,
    );
    code.file("templates/Default.html", engine.render("widget/default.html", &json!({}))?);

    let written = code.write_to(&widget_dir)?;
    let headline = format!(
        "Widget {} ({widget_id}) created: {}",
        params.widget_name,
        widget_dir.display()
    );
    Ok(summary(&headline, &written))
}

/// Creates `wa-apps/site/widgets/<widget_name>/` inside `webasyst_path`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the widget directory
/// is present, or an I/O or template error.
pub fn create_site_widget(
    engine: &TemplateEngine<'_>,
    params: &CreateSiteWidgetParams,
) -> Result<String> {
    let layout = ProjectLayout::new(&params.webasyst_path);
    let name = &params.widget_name;
    let widget_dir = layout.widgets_dir("site").join(name);
    ensure_absent(&widget_dir, format!("Site widget '{name}'"))?;

    let class_name = format!("site{}Widget", to_camel_case(name));
    let ctx = json!({
        "class_name": class_name,
        "widget_name": name,
        "widget_title": params.widget_title,
        "widget_type": params.widget_type,
        "is_cacheable": params.is_cacheable,
        "responsive": params.responsive,
    });

    let mut code = GeneratedCode::with_dirs(SITE_WIDGET_DIRS);
    code.file(
        format!("lib/{class_name}.class.php"),
        engine.render("site/widget.class.php", &ctx)?,
    );
    code.file("templates/widget.html", engine.render("site/widget.html", &ctx)?);
    if params.has_settings {
        code.file("lib/config/settings.php", engine.render("widget/settings.php", &ctx)?);
    }

    let written = code.write_to(&widget_dir)?;
    let headline = format!(
        "Site widget \"{}\" created: {}",
        params.widget_title,
        widget_dir.display()
    );
    Ok(summary(&headline, &written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn params(app_id: &str) -> CreateWidgetParams {
        CreateWidgetParams {
            app_id: app_id.into(),
            widget_id: "clock".into(),
            widget_name: "Clock".into(),
            has_settings: true,
        }
    }

    #[test]
    fn test_system_widget_goes_to_wa_widgets() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();

        create_widget(&engine, &ProjectLayout::new(temp.path()), &params("webasyst")).unwrap();

        let dir = temp.path().join("wa-widgets/clock");
        assert!(dir.join("lib/clockWidget.widget.php").is_file());
        assert!(dir.join("lib/config/settings.php").is_file());
        assert!(dir.join("templates/Default.html").is_file());
    }

    #[test]
    fn test_app_widget_requires_app() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();

        let err = create_widget(&engine, &ProjectLayout::new(temp.path()), &params("blog")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_app_widget_path() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("wa-apps/blog")).unwrap();
        let engine = TemplateEngine::new().unwrap();

        create_widget(&engine, &ProjectLayout::new(temp.path()), &params("blog")).unwrap();
        assert!(
            temp.path()
                .join("wa-apps/blog/widgets/clock/lib/blogClockWidget.widget.php")
                .is_file()
        );
    }

    #[test]
    fn test_site_widget_markup() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();
        let params: CreateSiteWidgetParams = serde_json::from_value(json!({
            "widget_name": "news",
            "widget_title": "News",
            "is_cacheable": true,
            "webasyst_path": temp.path(),
        }))
        .unwrap();

        create_site_widget(&engine, &params).unwrap();

        let dir = temp.path().join("wa-apps/site/widgets/news");
        let class = std::fs::read_to_string(dir.join("lib/siteNewsWidget.class.php")).unwrap();
        assert!(class.contains("'cache' => true"));
        let html = std::fs::read_to_string(dir.join("templates/widget.html")).unwrap();
        assert!(html.contains("News"));
        assert!(html.contains("content"));
        assert!(dir.join("lib/config/settings.php").is_file());
    }
}
