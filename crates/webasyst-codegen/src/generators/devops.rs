//! Deployment helpers: web server configs, SEO files and release archives.

use super::{ensure_absent, summary};
use crate::GeneratedCode;
use crate::template_engine::TemplateEngine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use webasyst_core::process::run_program;
use webasyst_core::{Result, fs};

const ZIP_HINT: &str = "zip is not available, install it to build release archives";

/// Parameters for `generate_nginx_vhost`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NginxVhostParams {
    /// Server name
    pub domain: String,

    /// Document root of the installation
    pub root_path: String,

    /// PHP-FPM version in the socket path
    #[serde(default = "default_php_version")]
    pub php_version: String,
}

fn default_php_version() -> String {
    "8.2".to_string()
}

/// Parameters for `generate_htaccess`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HtaccessParams {
    /// Installation directory that receives `.htaccess`
    pub root_path: PathBuf,
}

/// Parameters for `setup_seo_optimization`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SeoParams {
    /// Public site directory
    pub site_path: PathBuf,

    /// Files to produce: `robots`, `sitemap`, `analytics`. Empty produces
    /// all that apply.
    #[serde(default)]
    pub features: Vec<String>,

    /// Analytics counters by provider name, rendered into
    /// `templates/analytics.html`
    #[serde(default)]
    pub analytics_codes: BTreeMap<String, String>,

    /// Sitemap URL advertised in `robots.txt`
    #[serde(default)]
    pub sitemap_url: Option<String>,
}

impl SeoParams {
    fn wants(&self, feature: &str) -> bool {
        self.features.is_empty() || self.features.iter().any(|f| f == feature)
    }
}

/// Parameters for `prepare_release_bundle`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReleaseBundleParams {
    /// Project directory to archive
    pub project_path: PathBuf,

    /// Archive path; relative paths are resolved against `project_path`
    #[serde(default = "default_bundle_name")]
    pub output: PathBuf,
}

fn default_bundle_name() -> PathBuf {
    PathBuf::from("webasyst-bundle.zip")
}

/// Writes `<domain>.nginx.conf` into `out_dir`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the file is present,
/// or an I/O or template error.
pub fn generate_nginx_vhost(
    engine: &TemplateEngine<'_>,
    out_dir: &Path,
    params: &NginxVhostParams,
) -> Result<String> {
    let file_name = format!("{}.nginx.conf", params.domain);
    ensure_absent(&out_dir.join(&file_name), "Nginx vhost")?;

    let mut code = GeneratedCode::new();
    code.file(file_name, engine.render("devops/nginx.conf", params)?);
    let written = code.write_to(out_dir)?;
    Ok(summary("Nginx vhost created:", &written))
}

/// Writes the front-controller rewrite rules to `<root_path>/.htaccess`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::AlreadyExists`] if the file is present,
/// or an I/O or template error.
pub fn generate_htaccess(engine: &TemplateEngine<'_>, params: &HtaccessParams) -> Result<String> {
    ensure_absent(&params.root_path.join(".htaccess"), ".htaccess")?;

    let mut code = GeneratedCode::new();
    code.file(".htaccess", engine.render("devops/htaccess", &json!({}))?);
    let written = code.write_to(&params.root_path)?;
    Ok(summary(".htaccess created:", &written))
}

/// Writes `robots.txt`, `sitemap.xml` and the analytics include into the
/// site directory. Files that already exist are left untouched and reported.
///
/// # Errors
///
/// Returns an I/O or template error.
pub fn setup_seo(engine: &TemplateEngine<'_>, params: &SeoParams) -> Result<String> {
    let mut planned = Vec::new();
    if params.wants("robots") {
        planned.push((
            "robots.txt",
            engine.render("devops/robots.txt", &json!({"sitemap_url": params.sitemap_url}))?,
        ));
    }
    if params.wants("sitemap") {
        planned.push(("sitemap.xml", engine.render("devops/sitemap.xml", &json!({}))?));
    }
    if params.wants("analytics") && !params.analytics_codes.is_empty() {
        planned.push((
            "templates/analytics.html",
            engine.render(
                "devops/analytics.html",
                &json!({"counters": params.analytics_codes}),
            )?,
        ));
    }

    let mut code = GeneratedCode::new();
    let mut skipped = Vec::new();
    for (rel_path, content) in planned {
        if fs::exists(&params.site_path.join(rel_path)) {
            skipped.push(rel_path);
        } else {
            code.file(rel_path, content);
        }
    }

    let written = code.write_to(&params.site_path)?;
    let mut text = summary(
        &format!("SEO setup done in {}:", params.site_path.display()),
        &written,
    );
    for rel_path in skipped {
        let _ = write!(text, "\nSkipped existing {rel_path}");
    }
    Ok(text)
}

/// Resolves the archive path of a release bundle.
///
/// # Examples
///
/// ```
/// use webasyst_codegen::generators::devops::bundle_path;
/// use std::path::Path;
///
/// assert_eq!(
///     bundle_path(Path::new("/srv/app"), Path::new("out.zip")),
///     Path::new("/srv/app/out.zip"),
/// );
/// assert_eq!(
///     bundle_path(Path::new("/srv/app"), Path::new("/tmp/out.zip")),
///     Path::new("/tmp/out.zip"),
/// );
/// ```
#[must_use]
pub fn bundle_path(project_path: &Path, output: &Path) -> PathBuf {
    if output.is_absolute() {
        output.to_path_buf()
    } else {
        project_path.join(output)
    }
}

/// Archives the project directory with `zip -r`.
///
/// # Errors
///
/// Returns [`webasyst_core::Error::ExternalTool`] if `zip` is missing or
/// fails.
pub fn prepare_release_bundle(params: &ReleaseBundleParams) -> Result<String> {
    let out = bundle_path(&params.project_path, &params.output);
    let out_arg = out.to_string_lossy();
    run_program("zip", &["-r", &*out_arg, "."], &params.project_path, ZIP_HINT)?;
    Ok(format!("Archive ready: {}", out.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_nginx_vhost() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();
        let params = NginxVhostParams {
            domain: "shop.example.com".into(),
            root_path: "/var/www/shop".into(),
            php_version: default_php_version(),
        };

        generate_nginx_vhost(&engine, temp.path(), &params).unwrap();

        let conf = std::fs::read_to_string(temp.path().join("shop.example.com.nginx.conf")).unwrap();
        assert!(conf.contains("server_name shop.example.com;"));
        assert!(conf.contains("root /var/www/shop;"));
        assert!(conf.contains("php8.2-fpm.sock"));
        assert!(
            generate_nginx_vhost(&engine, temp.path(), &params)
                .unwrap_err()
                .is_already_exists()
        );
    }

    #[test]
    fn test_htaccess() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();
        let params = HtaccessParams {
            root_path: temp.path().to_path_buf(),
        };

        generate_htaccess(&engine, &params).unwrap();
        let rules = std::fs::read_to_string(temp.path().join(".htaccess")).unwrap();
        assert!(rules.contains("RewriteEngine On"));
        assert!(generate_htaccess(&engine, &params).unwrap_err().is_already_exists());
    }

    #[test]
    fn test_seo_skips_existing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("robots.txt"), "custom").unwrap();
        let engine = TemplateEngine::new().unwrap();
        let params: SeoParams = serde_json::from_value(json!({
            "site_path": temp.path(),
            "analytics_codes": {"metrika": "<script>ym(1)</script>"},
        }))
        .unwrap();

        let text = setup_seo(&engine, &params).unwrap();

        assert!(text.contains("Skipped existing robots.txt"));
        assert_eq!(std::fs::read_to_string(temp.path().join("robots.txt")).unwrap(), "custom");
        assert!(temp.path().join("sitemap.xml").is_file());
        let analytics = std::fs::read_to_string(temp.path().join("templates/analytics.html")).unwrap();
        assert!(analytics.contains("<script>ym(1)</script>"));
    }

    #[test]
    fn test_seo_features_filter() {
        let temp = TempDir::new().unwrap();
        let engine = TemplateEngine::new().unwrap();
        let params: SeoParams = serde_json::from_value(json!({
            "site_path": temp.path(),
            "features": ["robots"],
            "sitemap_url": "https://example.com/sitemap.xml",
        }))
        .unwrap();

        setup_seo(&engine, &params).unwrap();

        let robots = std::fs::read_to_string(temp.path().join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
        assert!(!temp.path().join("sitemap.xml").exists());
    }
}
