//! Gettext catalogs for applications.

use super::require_app;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;
use webasyst_core::process::run_program;
use webasyst_core::{Error, ProjectLayout, Result, fs};

const MSGFMT_HINT: &str = "msgfmt is not available, install gettext";

/// Parameters for `generate_po_template` and `compile_mo`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LocaleParams {
    /// Application identifier
    pub app_id: String,

    /// Locale code, e.g. `ru_RU` or `en_US`
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "ru_RU".to_string()
}

/// Writes `locale/<locale>/LC_MESSAGES/<app_id>.po` with a catalog header.
///
/// An existing catalog is left untouched, so calling this again is safe.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the application is missing, or an I/O or
/// template error.
pub fn generate_po_template(
    engine: &TemplateEngine<'_>,
    layout: &ProjectLayout,
    params: &LocaleParams,
) -> Result<String> {
    require_app(layout, &params.app_id)?;
    let messages_dir = layout.messages_dir(&params.app_id, &params.locale);
    let po_path = messages_dir.join(format!("{}.po", params.app_id));

    if fs::exists(&po_path) {
        return Ok(format!("PO template already present: {}", po_path.display()));
    }

    let content = engine.render("locale/catalog.po", params)?;
    fs::ensure_dir(&messages_dir)?;
    fs::write_file(&po_path, &content)?;
    info!(path = %po_path.display(), "wrote catalog");

    Ok(format!("PO template prepared: {}", po_path.display()))
}

/// Compiles the `.po` catalog into `.mo` with `msgfmt`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the `.po` file is missing and
/// [`Error::ExternalTool`] if `msgfmt` is not installed or fails.
pub fn compile_mo(layout: &ProjectLayout, params: &LocaleParams) -> Result<String> {
    let messages_dir = layout.messages_dir(&params.app_id, &params.locale);
    let po_path = messages_dir.join(format!("{}.po", params.app_id));
    let mo_path = messages_dir.join(format!("{}.mo", params.app_id));

    if !fs::exists(&po_path) {
        return Err(Error::NotFound {
            resource: format!(
                "PO file {} (run generate_po_template first)",
                po_path.display()
            ),
        });
    }

    let po = po_path.to_string_lossy();
    let mo = mo_path.to_string_lossy();
    run_program("msgfmt", &[&*po, "-o", &*mo], &messages_dir, MSGFMT_HINT)?;

    Ok(format!("MO compiled: {}", mo_path.display()))
}
