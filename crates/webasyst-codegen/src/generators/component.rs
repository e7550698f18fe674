//! Webasyst UI 2.0 component stubs.
//!
//! Each [`ComponentKind`] has a Smarty markup template; the interactive
//! kinds also ship a jQuery initialization script.

use super::{default_true, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::path::PathBuf;
use webasyst_core::{Error, Result, fs};

/// UI component catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Zebra table
    Table,
    /// Form with fields
    Form,
    /// Modal dialog
    Modal,
    /// Side drawer
    Drawer,
    /// Chip list
    Chips,
    /// Tile grid
    Bricks,
    /// File upload box
    Upload,
    /// Mobile bottom navigation
    Bottombar,
    /// Avatar list
    UserpicList,
    /// Range slider
    Slider,
    /// Segmented toggle
    Toggle,
    /// On/off switch
    Switch,
    /// Skeleton loader
    Skeleton,
    /// Tab strip
    Tabs,
    /// Progress bar
    Progressbar,
    /// Tooltip
    Tooltip,
    /// Autocomplete input
    Autocomplete,
    /// Menu
    Menu,
    /// Alert banner
    Alert,
    /// Pager
    Paging,
    /// Breadcrumb trail
    Breadcrumbs,
    /// Loading spinner
    Spinner,
    /// Dropdown
    Dropdown,
    /// Card
    Card,
}

impl ComponentKind {
    /// Every kind, in catalog order.
    pub const ALL: [Self; 24] = [
        Self::Table,
        Self::Form,
        Self::Modal,
        Self::Drawer,
        Self::Chips,
        Self::Bricks,
        Self::Upload,
        Self::Bottombar,
        Self::UserpicList,
        Self::Slider,
        Self::Toggle,
        Self::Switch,
        Self::Skeleton,
        Self::Tabs,
        Self::Progressbar,
        Self::Tooltip,
        Self::Autocomplete,
        Self::Menu,
        Self::Alert,
        Self::Paging,
        Self::Breadcrumbs,
        Self::Spinner,
        Self::Dropdown,
        Self::Card,
    ];

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Form => "form",
            Self::Modal => "modal",
            Self::Drawer => "drawer",
            Self::Chips => "chips",
            Self::Bricks => "bricks",
            Self::Upload => "upload",
            Self::Bottombar => "bottombar",
            Self::UserpicList => "userpic_list",
            Self::Slider => "slider",
            Self::Toggle => "toggle",
            Self::Switch => "switch",
            Self::Skeleton => "skeleton",
            Self::Tabs => "tabs",
            Self::Progressbar => "progressbar",
            Self::Tooltip => "tooltip",
            Self::Autocomplete => "autocomplete",
            Self::Menu => "menu",
            Self::Alert => "alert",
            Self::Paging => "paging",
            Self::Breadcrumbs => "breadcrumbs",
            Self::Spinner => "spinner",
            Self::Dropdown => "dropdown",
            Self::Card => "card",
        }
    }

    /// Returns `true` if the kind ships an initialization script.
    #[must_use]
    pub const fn has_script(self) -> bool {
        matches!(
            self,
            Self::Modal
                | Self::Drawer
                | Self::Upload
                | Self::Slider
                | Self::Toggle
                | Self::Switch
                | Self::Tabs
                | Self::Progressbar
                | Self::Tooltip
                | Self::Autocomplete
                | Self::Dropdown
        )
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for `create_ui_component`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateComponentParams {
    /// Component kind from the catalog
    pub component_type: ComponentKind,

    /// Component name, used for file names and element ids
    pub component_name: String,

    /// Project directory
    pub target_path: PathBuf,

    /// Write the initialization script for interactive kinds
    #[serde(default = "default_true")]
    pub with_js: bool,
}

/// Writes `templates/components/<name>.html` and, for interactive kinds
/// with `with_js`, `js/components/<name>.js`.
///
/// # Errors
///
/// Returns [`Error::AlreadyExists`] if either target file is present, or an
/// I/O or template error.
///
/// # Examples
///
/// ```
/// use webasyst_codegen::generators::component::{ComponentKind, CreateComponentParams, create_component};
/// use webasyst_codegen::template_engine::TemplateEngine;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let params = CreateComponentParams {
///     component_type: ComponentKind::Table,
///     component_name: "orders".into(),
///     target_path: temp.path().to_path_buf(),
///     with_js: true,
/// };
///
/// create_component(&TemplateEngine::new().unwrap(), &params).unwrap();
/// assert!(temp.path().join("templates/components/orders.html").exists());
/// assert!(!temp.path().join("js").exists());
/// ```
pub fn create_component(
    engine: &TemplateEngine<'_>,
    params: &CreateComponentParams,
) -> Result<String> {
    let kind = params.component_type;
    let name = &params.component_name;
    let ctx = json!({
        "name": name,
        "js_name": name.replace('-', "_"),
    });

    let mut code = GeneratedCode::new();
    code.file(
        format!("templates/components/{name}.html"),
        engine.render(&format!("component/{kind}.html"), &ctx)?,
    );
    let with_script = params.with_js && kind.has_script();
    if with_script {
        code.file(
            format!("js/components/{name}.js"),
            engine.render(&format!("component/{kind}.js"), &ctx)?,
        );
    }

    for file in code.files() {
        let path = params.target_path.join(file.path());
        if fs::exists(&path) {
            return Err(Error::AlreadyExists {
                resource: format!("Component '{name}'"),
                path,
            });
        }
    }

    let written = code.write_to(&params.target_path)?;
    let headline = if with_script {
        format!("Component {kind} \"{name}\" created with JS initialization:")
    } else {
        format!("Component {kind} \"{name}\" created:")
    };
    Ok(summary(&headline, &written))
}
