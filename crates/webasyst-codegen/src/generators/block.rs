//! Site page-builder blocks.

use super::{ensure_absent, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use webasyst_core::{ProjectLayout, Result};

/// Parameters for `create_site_block`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateSiteBlockParams {
    /// Block identifier
    pub block_name: String,

    /// Display title
    pub block_title: String,

    /// Builder category the block is listed under
    #[serde(default = "default_block_category")]
    pub block_category: String,

    /// Path to the Webasyst installation
    pub webasyst_path: PathBuf,
}

fn default_block_category() -> String {
    "content".to_string()
}

/// Creates `wa-apps/site/blocks/<block_name>/` with `block.php` and
/// `block.html`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the block directory is
/// present, or an I/O or template error.
pub fn create_site_block(
    engine: &TemplateEngine<'_>,
    params: &CreateSiteBlockParams,
) -> Result<String> {
    let block_dir = ProjectLayout::new(&params.webasyst_path)
        .app_dir("site")
        .join("blocks")
        .join(&params.block_name);
    ensure_absent(&block_dir, format!("Site block '{}'", params.block_name))?;

    let mut code = GeneratedCode::new();
    code.file("block.php", engine.render("site/block.php", params)?);
    code.file("block.html", engine.render("site/block.html", params)?);

    let written = code.write_to(&block_dir)?;
    let headline = format!(
        "Block \"{}\" created: {}",
        params.block_title,
        block_dir.display()
    );
    Ok(summary(&headline, &written))
}
