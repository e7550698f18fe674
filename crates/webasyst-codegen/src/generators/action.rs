//! Actions and controllers.
//!
//! The [`ActionStyle`] picks the framework base class and the class and file
//! naming. Single styles write one class file per action name; multi styles
//! write one class file holding a method per name. View templates are
//! written only for the view-producing styles.

use super::{require_app, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use webasyst_core::naming::to_camel_case;
use webasyst_core::{Error, ProjectLayout, Result, fs};

/// Kind of action class to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyle {
    /// One `waViewAction` per name, with a view
    #[default]
    Action,
    /// One `waViewActions` class with a method per name, with views
    Actions,
    /// One `waLongActionController` per name
    Long,
    /// One `waJsonController` per name
    Json,
    /// One `waJsonActions` class with a method per name
    Jsons,
}

impl ActionStyle {
    /// Framework base class.
    #[must_use]
    pub const fn base_class(self) -> &'static str {
        match self {
            Self::Action => "waViewAction",
            Self::Actions => "waViewActions",
            Self::Long => "waLongActionController",
            Self::Json => "waJsonController",
            Self::Jsons => "waJsonActions",
        }
    }

    /// Returns `true` if all names share one class file.
    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::Actions | Self::Jsons)
    }

    /// Returns `true` if a view template accompanies each action.
    #[must_use]
    pub const fn has_view(self) -> bool {
        matches!(self, Self::Action | Self::Actions)
    }

    const fn class_suffix(self) -> &'static str {
        match self {
            Self::Json | Self::Jsons => "Controller",
            _ => "Action",
        }
    }
}

/// Parameters for `create_action`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateActionParams {
    /// Owning application identifier
    pub app_id: String,

    /// Module name, e.g. `backend` or `frontend`
    pub module: String,

    /// Class style
    #[serde(default)]
    pub action_type: ActionStyle,

    /// Action names, at least one
    pub action_names: Vec<String>,
}

/// Creates action classes under `lib/actions/<module>/` and, for view
/// styles, templates under `templates/actions/<module>/`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an empty name list,
/// [`Error::NotFound`] if the application is missing and
/// [`Error::AlreadyExists`] if any target file is present.
///
/// # Examples
///
/// ```
/// use webasyst_codegen::generators::action::{ActionStyle, CreateActionParams, create_action};
/// use webasyst_codegen::template_engine::TemplateEngine;
/// use webasyst_core::ProjectLayout;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// std::fs::create_dir_all(temp.path().join("wa-apps/blog")).unwrap();
/// let params = CreateActionParams {
///     app_id: "blog".into(),
///     module: "backend".into(),
///     action_type: ActionStyle::Json,
///     action_names: vec!["save".into()],
/// };
///
/// let engine = TemplateEngine::new().unwrap();
/// create_action(&engine, &ProjectLayout::new(temp.path()), &params).unwrap();
/// assert!(temp
///     .path()
///     .join("wa-apps/blog/lib/actions/backend/blogBackendSave.action.php")
///     .exists());
/// ```
pub fn create_action(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &CreateActionParams,
) -> Result<String> {
    if params.action_names.is_empty() {
        return Err(Error::InvalidArgument(
            "action_names must contain at least one name".to_string(),
        ));
    }
    let app_dir = require_app(layout, &params.app_id)?;

    let style = params.action_type;
    let app_id = &params.app_id;
    let module = &params.module;
    let module_camel = to_camel_case(module);

    let mut code = GeneratedCode::new();
    if style.is_multi() {
        code.file(
            format!("lib/actions/{module}/{app_id}{module_camel}.actions.php"),
            engine.render(
                "action/multi.php",
                &json!({
                    "class_name": format!("{app_id}{module_camel}Actions"),
                    "base_class": style.base_class(),
                    "methods": params.action_names,
                }),
            )?,
        );
    } else {
        for name in &params.action_names {
            let name_camel = to_camel_case(name);
            code.file(
                format!("lib/actions/{module}/{app_id}{module_camel}{name_camel}.action.php"),
                engine.render(
                    "action/single.php",
                    &json!({
                        "class_name": format!("{app_id}{module_camel}{name_camel}{}", style.class_suffix()),
                        "base_class": style.base_class(),
                    }),
                )?,
            );
        }
    }
    if style.has_view() {
        for name in &params.action_names {
            code.file(
                format!("templates/actions/{module}/{module_camel}{}.html", to_camel_case(name)),
                engine.render("action/view.html", &json!({"action_name": name}))?,
            );
        }
    }

    for file in code.files() {
        let path = app_dir.join(file.path());
        if fs::exists(&path) {
            return Err(Error::AlreadyExists {
                resource: "Action file".to_string(),
                path,
            });
        }
    }

    let written = code.write_to(&app_dir)?;
    Ok(summary("Created files:", &written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn run(root: &Path, style: ActionStyle, names: &[&str]) -> Result<String> {
        let engine = TemplateEngine::new().unwrap();
        let params = CreateActionParams {
            app_id: "blog".into(),
            module: "backend".into(),
            action_type: style,
            action_names: names.iter().map(|n| (*n).to_string()).collect(),
        };
        create_action(&engine, &ProjectLayout::new(root), &params)
    }

    fn app(temp: &TempDir) -> std::path::PathBuf {
        let app = temp.path().join("wa-apps/blog");
        std::fs::create_dir_all(&app).unwrap();
        app
    }

    #[test]
    fn test_single_action_with_view() {
        let temp = TempDir::new().unwrap();
        let app = app(&temp);

        run(temp.path(), ActionStyle::Action, &["post_list"]).unwrap();

        let class = std::fs::read_to_string(app.join("lib/actions/backend/blogBackendPostList.action.php")).unwrap();
        assert!(class.contains("class blogBackendPostListAction extends waViewAction"));
        let view = std::fs::read_to_string(app.join("templates/actions/backend/BackendPostList.html")).unwrap();
        assert_eq!(view, "{* post_list template *}\n");
    }

    #[test]
    fn test_long_action_has_no_view() {
        let temp = TempDir::new().unwrap();
        let app = app(&temp);

        run(temp.path(), ActionStyle::Long, &["import"]).unwrap();

        let class = std::fs::read_to_string(app.join("lib/actions/backend/blogBackendImport.action.php")).unwrap();
        assert!(class.contains("extends waLongActionController"));
        assert!(!app.join("templates").exists());
    }

    #[test]
    fn test_json_uses_controller_suffix() {
        let temp = TempDir::new().unwrap();
        let app = app(&temp);

        run(temp.path(), ActionStyle::Json, &["save"]).unwrap();
        let class = std::fs::read_to_string(app.join("lib/actions/backend/blogBackendSave.action.php")).unwrap();
        assert!(class.contains("class blogBackendSaveController extends waJsonController"));
    }

    #[test]
    fn test_second_run_conflicts_and_keeps_files() {
        let temp = TempDir::new().unwrap();
        let app = app(&temp);
        let class_path = app.join("lib/actions/backend/blogBackendSave.action.php");

        run(temp.path(), ActionStyle::Action, &["save"]).unwrap();
        std::fs::write(&class_path, "edited").unwrap();

        let err = run(temp.path(), ActionStyle::Action, &["save"]).unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(std::fs::read_to_string(&class_path).unwrap(), "edited");
    }

    #[test]
    fn test_empty_names_rejected() {
        let temp = TempDir::new().unwrap();
        app(&temp);
        let err = run(temp.path(), ActionStyle::Action, &[]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_style_parses_lowercase() {
        let style: ActionStyle = serde_json::from_value(json!("jsons")).unwrap();
        assert_eq!(style, ActionStyle::Jsons);
        assert!(serde_json::from_value::<ActionStyle>(json!("grid")).is_err());
    }
}
