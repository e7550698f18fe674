//! Tool registry: the ordered, immutable catalog of tools the server offers.
//!
//! Each tool is registered from a typed handler `Fn(&ToolContext, P)`. The
//! builder derives the input schema from `P` and wraps the handler in an
//! adapter that decodes the JSON arguments into `P` first, so the schema a
//! client sees and the decoding the server performs never drift apart.

use crate::dispatcher::ToolContext;
use crate::handlers;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::warn;
use webasyst_codegen::generators::{
    action, app, block, component, devops, layout, locale, model, plugin, report, style,
    system_plugin, theme, widget,
};
use webasyst_core::layout::SystemPluginKind;
use webasyst_core::{Error, Result};

type Handler = Box<dyn Fn(&ToolContext, JsonObject) -> Result<String> + Send + Sync>;

/// A tool definition paired with its handler.
pub struct RegisteredTool {
    definition: Tool,
    handler: Handler,
}

impl RegisteredTool {
    /// Definition advertised to clients.
    #[must_use]
    pub const fn definition(&self) -> &Tool {
        &self.definition
    }

    /// Tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Decodes `arguments` and runs the handler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the arguments do not match the
    /// tool's parameter record, or whatever the handler reports.
    pub fn invoke(&self, context: &ToolContext, arguments: JsonObject) -> Result<String> {
        (self.handler)(context, arguments)
    }
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("name", &self.definition.name)
            .finish_non_exhaustive()
    }
}

/// Ordered tool catalog, built once and shared read-only.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Starts an empty registry.
    #[must_use]
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// Registered tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.tools.iter()
    }

    /// Tool definitions in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.definition.clone()).collect()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns `true` if no tool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Every tool of the Webasyst server.
    #[must_use]
    pub fn builtin() -> Self {
        Self::builder()
            // Installation readers
            .tool(
                "list_webasyst_apps",
                "List installed Webasyst applications with their names and versions",
                handlers::list_webasyst_apps,
            )
            .tool(
                "get_app_info",
                "Show the parsed lib/config/app.php of an application",
                handlers::get_app_info,
            )
            .tool(
                "list_app_plugins",
                "List the plugins installed for an application",
                handlers::list_app_plugins,
            )
            .tool(
                "get_plugin_info",
                "Show the parsed lib/config/plugin.php of a plugin",
                handlers::get_plugin_info,
            )
            .tool(
                "list_app_themes",
                "List the design themes of an application",
                handlers::list_app_themes,
            )
            .tool(
                "list_app_widgets",
                "List the dashboard widgets of an application",
                handlers::list_app_widgets,
            )
            .tool(
                "get_routing_config",
                "Print the routing config of an application or of the installation",
                handlers::get_routing_config,
            )
            .tool(
                "get_system_config",
                "Print the beginning of wa-config/SystemConfig.class.php",
                handlers::get_system_config,
            )
            .tool(
                "run_webasyst_cli",
                "Run a cli.php command in the installation root",
                handlers::run_webasyst_cli,
            )
            // Application scaffolding
            .tool(
                "create_app_structure",
                "Create a localized application skeleton with backend actions and UI 2.0 wrapper",
                |ctx, p: app::CreateAppParams| app::create_app(ctx.engine(), &ctx.layout()?, &p),
            )
            .tool(
                "create_generic_app",
                "Create an application skeleton with optional frontend, themes and plugins support",
                |ctx, p: app::CreateGenericAppParams| app::create_generic_app(ctx.engine(), &p),
            )
            .tool(
                "create_plugin_structure",
                "Create a plugin skeleton for an installed application",
                |ctx, p: plugin::CreatePluginParams| {
                    plugin::create_plugin(ctx.engine(), &ctx.layout()?, &p)
                },
            )
            .tool(
                "create_action",
                "Create a controller (action, actions, long, json or jsons) with its views",
                |ctx, p: action::CreateActionParams| {
                    action::create_action(ctx.engine(), &ctx.layout()?, &p)
                },
            )
            .tool(
                "create_model",
                "Create a waModel subclass for a database table",
                |ctx, p: model::CreateModelParams| {
                    model::create_model(ctx.engine(), &ctx.layout()?, &p)
                },
            )
            .tool(
                "create_widget",
                "Create a dashboard widget for an application or for the system",
                |ctx, p: widget::CreateWidgetParams| {
                    widget::create_widget(ctx.engine(), &ctx.layout()?, &p)
                },
            )
            .tool(
                "create_theme",
                "Create a design theme for an installed application",
                |ctx, p: theme::CreateThemeParams| {
                    theme::create_theme(ctx.engine(), &ctx.layout()?, &p)
                },
            )
            // Site and Shop-Script extensions
            .tool(
                "create_site_plugin",
                "Create a Site plugin with handlers, settings and optional frontend assets",
                |ctx, p: plugin::CreateSitePluginParams| plugin::create_site_plugin(ctx.engine(), &p),
            )
            .tool(
                "create_site_widget",
                "Create a Site widget",
                |ctx, p: widget::CreateSiteWidgetParams| widget::create_site_widget(ctx.engine(), &p),
            )
            .tool(
                "create_site_block",
                "Create a Site editor block",
                |ctx, p: block::CreateSiteBlockParams| block::create_site_block(ctx.engine(), &p),
            )
            .tool(
                "create_site_theme",
                "Create a Site theme with color scheme and responsive options",
                |ctx, p: theme::CreateSiteThemeParams| theme::create_site_theme(ctx.engine(), &p),
            )
            .tool(
                "create_shop_plugin",
                "Create a Shop-Script plugin",
                |ctx, p: plugin::CreateShopPluginParams| plugin::create_shop_plugin(ctx.engine(), &p),
            )
            .tool(
                "create_shop_theme",
                "Create a Shop-Script storefront theme",
                |ctx, p: theme::CreateShopThemeParams| theme::create_shop_theme(ctx.engine(), &p),
            )
            .tool(
                "create_shop_report",
                "Create a Shop-Script report class",
                |ctx, p: report::CreateShopReportParams| report::create_shop_report(ctx.engine(), &p),
            )
            .tool(
                "create_payment_plugin",
                "Create a payment system plugin under wa-plugins/payment",
                |ctx, p: system_plugin::CreateSystemPluginParams| {
                    system_plugin::create_system_plugin(ctx.engine(), SystemPluginKind::Payment, &p)
                },
            )
            .tool(
                "create_shipping_plugin",
                "Create a shipping plugin under wa-plugins/shipping",
                |ctx, p: system_plugin::CreateSystemPluginParams| {
                    system_plugin::create_system_plugin(ctx.engine(), SystemPluginKind::Shipping, &p)
                },
            )
            // UI 2.0
            .tool(
                "create_ui_component",
                "Create a Webasyst UI 2.0 component template with optional JS initialization",
                |ctx, p: component::CreateComponentParams| component::create_component(ctx.engine(), &p),
            )
            .tool(
                "create_responsive_layout",
                "Create desktop and mobile layouts for an application",
                |ctx, p: layout::ResponsiveLayoutParams| {
                    layout::create_responsive_layout(ctx.engine(), &ctx.layout()?, &p)
                },
            )
            .tool(
                "generate_color_scheme",
                "Generate a CSS color scheme built on UI 2.0 variables",
                |ctx, p: style::ColorSchemeParams| {
                    style::generate_color_scheme(ctx.engine(), &ctx.layout()?, &p)
                },
            )
            .tool(
                "enable_webasyst_ui",
                "Add the UI 2.0 variables stylesheet and wrapper template to a project",
                |ctx, p: style::EnableUiParams| style::enable_webasyst_ui(ctx.engine(), &p),
            )
            .tool(
                "validate_ui_usage",
                "Find hard-coded colors and legacy markup in a project",
                handlers::validate_ui_usage,
            )
            // Localization
            .tool(
                "generate_po_template",
                "Create the gettext catalog of an application for a locale",
                |ctx, p: locale::LocaleParams| {
                    locale::generate_po_template(ctx.engine(), &ctx.layout()?, &p)
                },
            )
            .tool(
                "compile_mo",
                "Compile the .po catalog of an application with msgfmt",
                |ctx, p: locale::LocaleParams| locale::compile_mo(&ctx.layout()?, &p),
            )
            // Project audits and deployment
            .tool(
                "analyze_project",
                "Count applications, plugins, themes and widgets of an installation",
                handlers::analyze_project,
            )
            .tool(
                "check_project_compliance",
                "Check that a project has the entries required for publication",
                handlers::check_project_compliance,
            )
            .tool(
                "setup_seo_optimization",
                "Create robots.txt, sitemap.xml and analytics counters for a site",
                |ctx, p: devops::SeoParams| devops::setup_seo(ctx.engine(), &p),
            )
            .tool(
                "generate_nginx_vhost",
                "Generate an nginx server block for an installation",
                |ctx, p: devops::NginxVhostParams| {
                    devops::generate_nginx_vhost(ctx.engine(), ctx.start_dir(), &p)
                },
            )
            .tool(
                "generate_htaccess",
                "Generate Apache rewrite rules for an installation",
                |ctx, p: devops::HtaccessParams| devops::generate_htaccess(ctx.engine(), &p),
            )
            .tool(
                "prepare_release_bundle",
                "Archive a project directory with zip",
                |_ctx, p: devops::ReleaseBundleParams| devops::prepare_release_bundle(&p),
            )
            .build()
    }
}

impl<'a> IntoIterator for &'a ToolRegistry {
    type Item = &'a RegisteredTool;
    type IntoIter = std::slice::Iter<'a, RegisteredTool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}

/// Builder for [`ToolRegistry`].
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistryBuilder {
    /// Registers a tool whose arguments decode into `P`.
    ///
    /// Registering a name twice replaces the earlier handler in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde::Deserialize;
    /// use webasyst_mcp::registry::ToolRegistry;
    ///
    /// #[derive(Deserialize, schemars::JsonSchema)]
    /// struct Greet {
    ///     name: String,
    /// }
    ///
    /// let registry = ToolRegistry::builder()
    ///     .tool("greet", "Say hello", |_ctx, p: Greet| Ok(format!("Hello, {}", p.name)))
    ///     .build();
    ///
    /// let schema = &registry.get("greet").unwrap().definition().input_schema;
    /// assert!(schema["properties"].get("name").is_some());
    /// ```
    #[must_use]
    pub fn tool<P, F>(mut self, name: &'static str, description: &'static str, handler: F) -> Self
    where
        P: DeserializeOwned + JsonSchema + 'static,
        F: Fn(&ToolContext, P) -> Result<String> + Send + Sync + 'static,
    {
        let handler: Handler = Box::new(move |context: &ToolContext, arguments: JsonObject| {
            let params: P = serde_json::from_value(Value::Object(arguments))
                .map_err(|e| Error::InvalidArgument(e.to_string()))?;
            handler(context, params)
        });
        let tool = RegisteredTool {
            definition: Tool::new(name, description, input_schema::<P>()),
            handler,
        };

        if let Some(slot) = self.tools.iter_mut().find(|t| t.name() == name) {
            warn!(tool = name, "tool registered twice, replacing earlier handler");
            *slot = tool;
        } else {
            self.tools.push(tool);
        }
        self
    }

    /// Freezes the catalog.
    #[must_use]
    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}

/// JSON Schema of `P` as an object, as the protocol requires.
fn input_schema<P: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(P)) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => {
            let mut map = JsonObject::new();
            map.insert("type".to_string(), Value::String("object".to_string()));
            Arc::new(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const EXPECTED_TOOLS: [&str; 38] = [
        "list_webasyst_apps",
        "get_app_info",
        "list_app_plugins",
        "get_plugin_info",
        "list_app_themes",
        "list_app_widgets",
        "get_routing_config",
        "get_system_config",
        "run_webasyst_cli",
        "create_app_structure",
        "create_generic_app",
        "create_plugin_structure",
        "create_action",
        "create_model",
        "create_widget",
        "create_theme",
        "create_site_plugin",
        "create_site_widget",
        "create_site_block",
        "create_site_theme",
        "create_shop_plugin",
        "create_shop_theme",
        "create_shop_report",
        "create_payment_plugin",
        "create_shipping_plugin",
        "create_ui_component",
        "create_responsive_layout",
        "generate_color_scheme",
        "enable_webasyst_ui",
        "validate_ui_usage",
        "generate_po_template",
        "compile_mo",
        "analyze_project",
        "check_project_compliance",
        "setup_seo_optimization",
        "generate_nginx_vhost",
        "generate_htaccess",
        "prepare_release_bundle",
    ];

    #[test]
    fn test_builtin_names_unique() {
        let registry = ToolRegistry::builtin();
        let names: HashSet<&str> = registry.iter().map(RegisteredTool::name).collect();
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn test_builtin_catalog() {
        let registry = ToolRegistry::builtin();
        assert_eq!(registry.len(), EXPECTED_TOOLS.len());
        for name in EXPECTED_TOOLS {
            let tool = registry.get(name).unwrap_or_else(|| panic!("{name} missing"));
            assert_eq!(tool.name(), name);
        }
    }

    #[test]
    fn test_schemas_are_objects() {
        let registry = ToolRegistry::builtin();
        for tool in registry.iter() {
            let schema = &tool.definition().input_schema;
            assert_eq!(schema.get("type"), Some(&Value::from("object")), "{}", tool.name());
        }
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let registry = ToolRegistry::builtin();
        let schema = &registry.get("create_model").unwrap().definition().input_schema;
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"app_id"));
        assert!(required.contains(&"table_name"));
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        #[derive(serde::Deserialize, JsonSchema)]
        struct Empty {}

        let registry = ToolRegistry::builder()
            .tool("a", "first", |_ctx, _p: Empty| Ok("first".into()))
            .tool("b", "other", |_ctx, _p: Empty| Ok("b".into()))
            .tool("a", "second", |_ctx, _p: Empty| Ok("second".into()))
            .build();

        assert_eq!(registry.len(), 2);
        let names: Vec<&str> = registry.iter().map(RegisteredTool::name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(
            registry.get("a").unwrap().definition().description.as_deref(),
            Some("second")
        );
    }
}
