//! Payment and shipping plugins under `wa-plugins/`.

use super::plugin::DENY_ALL;
use super::{ensure_absent, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use webasyst_core::layout::SystemPluginKind;
use webasyst_core::{ProjectLayout, Result};

const SYSTEM_PLUGIN_DIRS: &[&str] = &["lib", "lib/config", "img", "templates", "locale"];

/// Parameters for `create_payment_plugin` and `create_shipping_plugin`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateSystemPluginParams {
    /// Plugin identifier (latin letters)
    pub plugin_name: String,

    /// Display title
    pub plugin_title: String,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

/// Creates `wa-plugins/<payment|shipping>/<plugin_name>/`.
///
/// Shipping plugins get a `waShipping` subclass with rate calculation and
/// tracking stubs; payment plugins get a `waPayment` subclass with payment
/// form, callback and refund stubs plus the payment form template.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the plugin directory
/// is present, or an I/O or template error.
pub fn create_system_plugin(
    engine: &TemplateEngine<'_>,
    kind: SystemPluginKind,
    params: &CreateSystemPluginParams,
) -> Result<String> {
    let layout = ProjectLayout::new(&params.webasyst_path);
    let name = &params.plugin_name;
    let plugin_dir = layout.system_plugin_dir(kind, name);

    let (label, suffix, template) = match kind {
        SystemPluginKind::Payment => ("Payment", "Payment", "system_plugin/payment"),
        SystemPluginKind::Shipping => ("Shipping", "Shipping", "system_plugin/shipping"),
    };
    ensure_absent(&plugin_dir, format!("{label} plugin '{name}'"))?;

    let class_name = format!("{name}{suffix}");
    let ctx = json!({
        "plugin_name": name,
        "plugin_title": params.plugin_title,
        "class_name": class_name,
    });

    let mut code = GeneratedCode::with_dirs(SYSTEM_PLUGIN_DIRS);
    code.file("lib/config/plugin.php", engine.render(&format!("{template}.php"), &ctx)?);
    code.file(
        format!("lib/{class_name}.class.php"),
        engine.render(&format!("{template}.class.php"), &ctx)?,
    );
    if kind == SystemPluginKind::Payment {
        code.file(
            "templates/payment.html",
            engine.render("system_plugin/payment.html", &ctx)?,
        );
    }
    code.file("lib/.htaccess", DENY_ALL);
    code.file("templates/.htaccess", DENY_ALL);

    let written = code.write_to(&plugin_dir)?;
    let headline = format!(
        "{label} plugin \"{}\" created in wa-plugins/{}/{name}",
        params.plugin_title,
        kind.dir_name()
    );
    Ok(summary(&headline, &written))
}
