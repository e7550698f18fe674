//! Template engine for scaffolding using Handlebars.
//!
//! All templates are compiled into the binary and registered once. Rendering
//! is strict: a context missing a referenced field is an error rather than
//! an empty string. HTML escaping is off because the output is PHP, Smarty,
//! CSS and JavaScript source, and values are interpolated verbatim.
//!
//! # Examples
//!
//! ```
//! use webasyst_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let php = engine
//!     .render("model/model.php", &json!({"class_name": "ShopProductModel", "table_name": "shop_product"}))
//!     .unwrap();
//! assert!(php.contains("class ShopProductModel extends waModel"));
//! ```

use handlebars::Handlebars;
use serde::Serialize;
use webasyst_core::{Error, Result};

/// Built-in templates as `(name, source)` pairs.
const TEMPLATES: &[(&str, &str)] = &[
    // Application skeleton
    ("app/app.php", include_str!("../templates/app/app.php.hbs")),
    ("app/backend_loc.action.php", include_str!("../templates/app/backend_loc.action.php.hbs")),
    ("app/backend_loc.controller.php", include_str!("../templates/app/backend_loc.controller.php.hbs")),
    ("app/backend_loc.html", include_str!("../templates/app/backend_loc.html.hbs")),
    ("app/backend.action.php", include_str!("../templates/app/backend.action.php.hbs")),
    ("app/ui_wrapper.html", include_str!("../templates/app/ui_wrapper.html.hbs")),
    ("app/backend.html", include_str!("../templates/app/backend.html.hbs")),
    ("app/app.css", include_str!("../templates/app/app.css.hbs")),
    ("app/app.js", include_str!("../templates/app/app.js.hbs")),
    // Frontend-enabled application
    ("generic_app/app.php", include_str!("../templates/generic_app/app.php.hbs")),
    ("generic_app/routing.php", include_str!("../templates/generic_app/routing.php.hbs")),
    ("generic_app/backend.action.php", include_str!("../templates/generic_app/backend.action.php.hbs")),
    ("generic_app/frontend.action.php", include_str!("../templates/generic_app/frontend.action.php.hbs")),
    ("generic_app/backend.html", include_str!("../templates/generic_app/backend.html.hbs")),
    // Application plugin
    ("plugin/plugin.php", include_str!("../templates/plugin/plugin.php.hbs")),
    ("plugin/class.php", include_str!("../templates/plugin/class.php.hbs")),
    ("plugin/settings.php", include_str!("../templates/plugin/settings.php.hbs")),
    // Site app extensions
    ("site/plugin.php", include_str!("../templates/site/plugin.php.hbs")),
    ("site/plugin.class.php", include_str!("../templates/site/plugin.class.php.hbs")),
    ("site/settings.php", include_str!("../templates/site/settings.php.hbs")),
    ("site/frontend.css", include_str!("../templates/site/frontend.css.hbs")),
    ("site/frontend.js", include_str!("../templates/site/frontend.js.hbs")),
    ("site/frontend_footer.html", include_str!("../templates/site/frontend_footer.html.hbs")),
    ("site/widget.class.php", include_str!("../templates/site/widget.class.php.hbs")),
    ("site/widget.html", include_str!("../templates/site/widget.html.hbs")),
    ("site/block.php", include_str!("../templates/site/block.php.hbs")),
    ("site/block.html", include_str!("../templates/site/block.html.hbs")),
    // Shop-Script extensions
    ("shop/plugin.php", include_str!("../templates/shop/plugin.php.hbs")),
    ("shop/plugin.class.php", include_str!("../templates/shop/plugin.class.php.hbs")),
    ("shop/report.php", include_str!("../templates/shop/report.php.hbs")),
    // Dashboard widget
    ("widget/widget.php", include_str!("../templates/widget/widget.php.hbs")),
    ("widget/settings.php", include_str!("../templates/widget/settings.php.hbs")),
    ("widget/widget.class.php", include_str!("../templates/widget/widget.class.php.hbs")),
    ("widget/default.html", include_str!("../templates/widget/default.html.hbs")),
    // Themes
    ("theme/theme.xml", include_str!("../templates/theme/theme.xml.hbs")),
    ("theme/index.html", include_str!("../templates/theme/index.html.hbs")),
    ("theme/site_index.html", include_str!("../templates/theme/site_index.html.hbs")),
    ("theme/shop_index.html", include_str!("../templates/theme/shop_index.html.hbs")),
    ("theme/theme.css", include_str!("../templates/theme/theme.css.hbs")),
    // Actions and models
    ("action/single.php", include_str!("../templates/action/single.php.hbs")),
    ("action/multi.php", include_str!("../templates/action/multi.php.hbs")),
    ("action/view.html", include_str!("../templates/action/view.html.hbs")),
    ("model/model.php", include_str!("../templates/model/model.php.hbs")),
    // wa-plugins
    ("system_plugin/shipping.php", include_str!("../templates/system_plugin/shipping.php.hbs")),
    ("system_plugin/shipping.class.php", include_str!("../templates/system_plugin/shipping.class.php.hbs")),
    ("system_plugin/payment.php", include_str!("../templates/system_plugin/payment.php.hbs")),
    ("system_plugin/payment.class.php", include_str!("../templates/system_plugin/payment.class.php.hbs")),
    ("system_plugin/payment.html", include_str!("../templates/system_plugin/payment.html.hbs")),
    // Responsive layouts
    ("layout/desktop.class.php", include_str!("../templates/layout/desktop.class.php.hbs")),
    ("layout/mobile.class.php", include_str!("../templates/layout/mobile.class.php.hbs")),
    ("layout/desktop.html", include_str!("../templates/layout/desktop.html.hbs")),
    ("layout/mobile.html", include_str!("../templates/layout/mobile.html.hbs")),
    ("layout/dispatch.php", include_str!("../templates/layout/dispatch.php.hbs")),
    // Styles and UI kit
    ("style/color_scheme.css", include_str!("../templates/style/color_scheme.css.hbs")),
    ("style/ui_variables.css", include_str!("../templates/style/ui_variables.css.hbs")),
    ("style/ui_wrapper.html", include_str!("../templates/style/ui_wrapper.html.hbs")),
    // Localization
    ("locale/catalog.po", include_str!("../templates/locale/catalog.po.hbs")),
    // Deployment
    ("devops/nginx.conf", include_str!("../templates/devops/nginx.conf.hbs")),
    ("devops/htaccess", include_str!("../templates/devops/htaccess.hbs")),
    ("devops/robots.txt", include_str!("../templates/devops/robots.txt.hbs")),
    ("devops/sitemap.xml", include_str!("../templates/devops/sitemap.xml.hbs")),
    ("devops/analytics.html", include_str!("../templates/devops/analytics.html.hbs")),
    // UI components
    ("component/table.html", include_str!("../templates/component/table.html.hbs")),
    ("component/form.html", include_str!("../templates/component/form.html.hbs")),
    ("component/modal.html", include_str!("../templates/component/modal.html.hbs")),
    ("component/modal.js", include_str!("../templates/component/modal.js.hbs")),
    ("component/drawer.html", include_str!("../templates/component/drawer.html.hbs")),
    ("component/drawer.js", include_str!("../templates/component/drawer.js.hbs")),
    ("component/chips.html", include_str!("../templates/component/chips.html.hbs")),
    ("component/bricks.html", include_str!("../templates/component/bricks.html.hbs")),
    ("component/upload.html", include_str!("../templates/component/upload.html.hbs")),
    ("component/upload.js", include_str!("../templates/component/upload.js.hbs")),
    ("component/bottombar.html", include_str!("../templates/component/bottombar.html.hbs")),
    ("component/userpic_list.html", include_str!("../templates/component/userpic_list.html.hbs")),
    ("component/slider.html", include_str!("../templates/component/slider.html.hbs")),
    ("component/slider.js", include_str!("../templates/component/slider.js.hbs")),
    ("component/toggle.html", include_str!("../templates/component/toggle.html.hbs")),
    ("component/toggle.js", include_str!("../templates/component/toggle.js.hbs")),
    ("component/switch.html", include_str!("../templates/component/switch.html.hbs")),
    ("component/switch.js", include_str!("../templates/component/switch.js.hbs")),
    ("component/skeleton.html", include_str!("../templates/component/skeleton.html.hbs")),
    ("component/tabs.html", include_str!("../templates/component/tabs.html.hbs")),
    ("component/tabs.js", include_str!("../templates/component/tabs.js.hbs")),
    ("component/progressbar.html", include_str!("../templates/component/progressbar.html.hbs")),
    ("component/progressbar.js", include_str!("../templates/component/progressbar.js.hbs")),
    ("component/tooltip.html", include_str!("../templates/component/tooltip.html.hbs")),
    ("component/tooltip.js", include_str!("../templates/component/tooltip.js.hbs")),
    ("component/autocomplete.html", include_str!("../templates/component/autocomplete.html.hbs")),
    ("component/autocomplete.js", include_str!("../templates/component/autocomplete.js.hbs")),
    ("component/menu.html", include_str!("../templates/component/menu.html.hbs")),
    ("component/alert.html", include_str!("../templates/component/alert.html.hbs")),
    ("component/paging.html", include_str!("../templates/component/paging.html.hbs")),
    ("component/breadcrumbs.html", include_str!("../templates/component/breadcrumbs.html.hbs")),
    ("component/spinner.html", include_str!("../templates/component/spinner.html.hbs")),
    ("component/dropdown.html", include_str!("../templates/component/dropdown.html.hbs")),
    ("component/dropdown.js", include_str!("../templates/component/dropdown.js.hbs")),
    ("component/card.html", include_str!("../templates/component/card.html.hbs")),
];

/// Template engine for scaffolding.
///
/// Wraps Handlebars with every built-in template pre-registered.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; one instance is shared by all tool
/// handlers.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with all built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if a built-in template fails to compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);

        // Output is source code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::Template {
                    message: format!("failed to register template '{name}': {e}"),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the template is unknown or the context
    /// lacks a referenced field.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::Template {
                message: format!("failed to render template '{template_name}': {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, template_name: &str) -> bool {
        self.handlebars.has_template(template_name)
    }
}
