//! Database model stubs.

use super::{ensure_absent, require_app, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use webasyst_core::naming::{model_class_name, model_file_name};
use webasyst_core::{ProjectLayout, Result, fs};

/// Parameters for `create_model`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateModelParams {
    /// Owning application identifier
    pub app_id: String,

    /// Database table the model is bound to
    pub table_name: String,
}

/// Creates a `waModel` subclass for `table_name`.
///
/// The file goes to `lib/model/` when the application already uses that
/// directory, otherwise to `lib/models/`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::NotFound`] if the application is missing
/// and [`webasyst_core::Error::AlreadyExists`] if the model file is present.
pub fn create_model(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &CreateModelParams,
) -> Result<String> {
    let CreateModelParams { app_id, table_name } = params;
    let app_dir = require_app(layout, app_id)?;

    let legacy_dir = app_dir.join("lib/model");
    let models_dir = if fs::is_dir(&legacy_dir) {
        legacy_dir
    } else {
        app_dir.join("lib/models")
    };

    let class_name = model_class_name(app_id, table_name);
    let file_name = model_file_name(app_id, table_name);
    ensure_absent(&models_dir.join(&file_name), format!("Model {class_name}"))?;

    let mut code = GeneratedCode::new();
    code.file(
        file_name,
        engine.render(
            "model/model.php",
            &json!({"class_name": class_name, "table_name": table_name}),
        )?,
    );

    let written = code.write_to(&models_dir)?;
    Ok(summary(&format!("Model {class_name} created:"), &written))
}
