//! Directory conventions of a Webasyst installation.
//!
//! Every generator and reader resolves its paths through [`ProjectLayout`],
//! so the on-disk contract lives in one place.
//!
//! # Examples
//!
//! ```
//! use webasyst_core::layout::ProjectLayout;
//! use std::path::Path;
//!
//! let layout = ProjectLayout::new("/srv/www");
//! assert_eq!(layout.app_dir("blog"), Path::new("/srv/www/wa-apps/blog"));
//! assert_eq!(
//!     layout.widget_dir("webasyst", "clock"),
//!     Path::new("/srv/www/wa-widgets/clock"),
//! );
//! ```

use std::path::{Path, PathBuf};

/// Application id whose widgets live in the shared `wa-widgets` directory.
pub const SYSTEM_APP_ID: &str = "webasyst";

/// Sub-system that hosts system-wide plugins under `wa-plugins/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPluginKind {
    /// Payment gateways
    Payment,
    /// Shipping calculators
    Shipping,
}

impl SystemPluginKind {
    /// Directory name under `wa-plugins/`.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Shipping => "shipping",
        }
    }
}

/// Path conventions rooted at a Webasyst installation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Creates a layout for the installation at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Installation root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `wa-apps/`
    #[must_use]
    pub fn apps_dir(&self) -> PathBuf {
        self.root.join("wa-apps")
    }

    /// `wa-apps/<app>/`
    #[must_use]
    pub fn app_dir(&self, app_id: &str) -> PathBuf {
        self.apps_dir().join(app_id)
    }

    /// `wa-apps/<app>/lib/config/app.php`
    #[must_use]
    pub fn app_config(&self, app_id: &str) -> PathBuf {
        self.app_dir(app_id).join("lib/config/app.php")
    }

    /// `wa-apps/<app>/plugins/`
    #[must_use]
    pub fn plugins_dir(&self, app_id: &str) -> PathBuf {
        self.app_dir(app_id).join("plugins")
    }

    /// `wa-apps/<app>/plugins/<plugin>/`
    #[must_use]
    pub fn plugin_dir(&self, app_id: &str, plugin_id: &str) -> PathBuf {
        self.plugins_dir(app_id).join(plugin_id)
    }

    /// `wa-apps/<app>/plugins/<plugin>/lib/config/plugin.php`
    #[must_use]
    pub fn plugin_config(&self, app_id: &str, plugin_id: &str) -> PathBuf {
        self.plugin_dir(app_id, plugin_id)
            .join("lib/config/plugin.php")
    }

    /// `wa-apps/<app>/themes/`
    #[must_use]
    pub fn themes_dir(&self, app_id: &str) -> PathBuf {
        self.app_dir(app_id).join("themes")
    }

    /// `wa-apps/<app>/themes/<theme>/`
    #[must_use]
    pub fn theme_dir(&self, app_id: &str, theme_id: &str) -> PathBuf {
        self.themes_dir(app_id).join(theme_id)
    }

    /// Directory holding the widgets of `app_id`.
    ///
    /// System widgets live in `wa-widgets/`, application widgets in
    /// `wa-apps/<app>/widgets/`.
    #[must_use]
    pub fn widgets_dir(&self, app_id: &str) -> PathBuf {
        if app_id == SYSTEM_APP_ID {
            self.root.join("wa-widgets")
        } else {
            self.app_dir(app_id).join("widgets")
        }
    }

    /// Directory of one widget, see [`ProjectLayout::widgets_dir`].
    #[must_use]
    pub fn widget_dir(&self, app_id: &str, widget_id: &str) -> PathBuf {
        self.widgets_dir(app_id).join(widget_id)
    }

    /// `wa-plugins/<kind>/<plugin>/`
    #[must_use]
    pub fn system_plugin_dir(&self, kind: SystemPluginKind, plugin_id: &str) -> PathBuf {
        self.root
            .join("wa-plugins")
            .join(kind.dir_name())
            .join(plugin_id)
    }

    /// `wa-apps/<app>/locale/<locale>/LC_MESSAGES/`
    #[must_use]
    pub fn messages_dir(&self, app_id: &str, locale: &str) -> PathBuf {
        self.app_dir(app_id)
            .join("locale")
            .join(locale)
            .join("LC_MESSAGES")
    }

    /// Routing file of an application, or the global one when `app_id` is `None`.
    #[must_use]
    pub fn routing_config(&self, app_id: Option<&str>) -> PathBuf {
        match app_id {
            Some(app_id) => self.app_dir(app_id).join("lib/config/routing.php"),
            None => self.root.join("wa-config/routing.php"),
        }
    }

    /// `wa-config/SystemConfig.class.php`
    #[must_use]
    pub fn system_config(&self) -> PathBuf {
        self.root.join("wa-config/SystemConfig.class.php")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_widgets_dir() {
        let layout = ProjectLayout::new("/r");
        assert_eq!(
            layout.widget_dir("shop", "sales"),
            Path::new("/r/wa-apps/shop/widgets/sales")
        );
    }

    #[test]
    fn test_system_plugin_dir() {
        let layout = ProjectLayout::new("/r");
        assert_eq!(
            layout.system_plugin_dir(SystemPluginKind::Shipping, "courier"),
            Path::new("/r/wa-plugins/shipping/courier")
        );
    }

    #[test]
    fn test_routing_config_global_and_app() {
        let layout = ProjectLayout::new("/r");
        assert_eq!(
            layout.routing_config(None),
            Path::new("/r/wa-config/routing.php")
        );
        assert_eq!(
            layout.routing_config(Some("blog")),
            Path::new("/r/wa-apps/blog/lib/config/routing.php")
        );
    }

    #[test]
    fn test_messages_dir() {
        let layout = ProjectLayout::new("/r");
        assert_eq!(
            layout.messages_dir("blog", "ru_RU"),
            Path::new("/r/wa-apps/blog/locale/ru_RU/LC_MESSAGES")
        );
    }
}
