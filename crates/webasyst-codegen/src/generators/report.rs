//! Shop-Script sales reports.

use super::{ensure_absent, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use webasyst_core::naming::to_camel_case;
use webasyst_core::{ProjectLayout, Result};

/// Parameters for `create_shop_report`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateShopReportParams {
    /// Report key, e.g. `daily_sales`
    pub report_key: String,

    /// Report title
    pub report_title: String,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

/// Creates `wa-apps/shop/lib/reports/<Key>.report.php` with a
/// `shop<Key>Report` class.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the report file is
/// present, or an I/O or template error.
pub fn create_shop_report(
    engine: &TemplateEngine<'_>,
    params: &CreateShopReportParams,
) -> Result<String> {
    let camel = to_camel_case(&params.report_key);
    let reports_dir = ProjectLayout::new(&params.webasyst_path)
        .app_dir("shop")
        .join("lib/reports");
    let file_name = format!("{camel}.report.php");
    ensure_absent(
        &reports_dir.join(&file_name),
        format!("Report '{}'", params.report_key),
    )?;

    let mut code = GeneratedCode::new();
    code.file(
        file_name,
        engine.render(
            "shop/report.php",
            &json!({
                "report_title": params.report_title,
                "class_name": format!("shop{camel}Report"),
            }),
        )?,
    );

    let written = code.write_to(&reports_dir)?;
    Ok(summary(
        &format!("Report \"{}\" created:", params.report_title),
        &written,
    ))
}
