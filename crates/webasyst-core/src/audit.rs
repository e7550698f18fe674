//! Static checks over a project directory: extension counts, required
//! entries, and Webasyst UI 2.0 style violations.

use crate::{Result, fs};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Entries every application needs for the UI wrapper and localization.
pub const REQUIRED_ENTRIES: [&str; 3] = ["templates/ui_wrapper.html", "lib/actions/backend", "locale"];

/// File written next to the project when a report is requested.
pub const ANALYSIS_REPORT_FILE: &str = "mcp-analysis.txt";

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]+").expect("valid regex"));
static RGB_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rgb\([^)]+\)").expect("valid regex"));
static RGBA_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rgba\([^)]+\)").expect("valid regex"));

static LEGACY_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r#"class="[^"]*btn[^"]*""#).expect("valid regex"),
            r#"Use class="button" instead of "btn""#,
        ),
        (
            Regex::new(r#"(?i)style="[^"]*color:\s*#"#).expect("valid regex"),
            "Move inline color styles to CSS with variables",
        ),
        (
            Regex::new(r#"(?i)style="[^"]*background:\s*#"#).expect("valid regex"),
            "Move inline background styles to CSS with variables",
        ),
    ]
});

/// Extension counts of an installation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectSummary {
    /// Directories under `wa-apps` with an `app.php`
    pub apps: usize,
    /// Entries under `wa-apps/*/plugins`
    pub plugins: usize,
    /// Entries under `wa-apps/*/themes`
    pub themes: usize,
    /// Entries under `wa-apps/*/widgets`
    pub widgets: usize,
}

impl ProjectSummary {
    /// Renders the summary as report text headed by `analysis_type`.
    #[must_use]
    pub fn report(&self, analysis_type: &str) -> String {
        format!(
            "Analysis: {analysis_type}\nApplications: {}\nPlugins: {}\nThemes: {}\nWidgets: {}",
            self.apps, self.plugins, self.themes, self.widgets
        )
    }
}

/// Counts applications, plugins, themes and widgets under `project_path`.
///
/// A project without `wa-apps` has all counts at zero.
///
/// # Errors
///
/// Returns an error if an existing directory cannot be read.
pub fn summarize_project(project_path: &Path) -> Result<ProjectSummary> {
    let mut summary = ProjectSummary::default();
    let apps_dir = project_path.join("wa-apps");
    if !fs::exists(&apps_dir) {
        return Ok(summary);
    }

    let count = |dir: PathBuf| -> Result<usize> {
        if fs::is_dir(&dir) {
            Ok(fs::list_dir(&dir)?.len())
        } else {
            Ok(0)
        }
    };

    for app_id in fs::list_dir(&apps_dir)? {
        let app_dir = apps_dir.join(&app_id);
        if fs::exists(&app_dir.join("lib/config/app.php")) {
            summary.apps += 1;
        }
        summary.plugins += count(app_dir.join("plugins"))?;
        summary.themes += count(app_dir.join("themes"))?;
        summary.widgets += count(app_dir.join("widgets"))?;
    }
    Ok(summary)
}

/// Returns the [`REQUIRED_ENTRIES`] missing from `project_path`.
#[must_use]
pub fn missing_required_entries(project_path: &Path) -> Vec<&'static str> {
    REQUIRED_ENTRIES
        .into_iter()
        .filter(|entry| !fs::exists(&project_path.join(entry)))
        .collect()
}

/// Kind of UI guideline violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiIssueKind {
    /// Literal color value in a stylesheet
    HardcodedColor,
    /// Pre-2.0 markup in a template
    LegacyPattern,
}

/// One UI guideline violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiIssue {
    /// File the issue was found in
    pub file: PathBuf,
    /// One-based line number
    pub line: usize,
    /// Issue category
    pub kind: UiIssueKind,
    /// Human readable description
    pub message: String,
}

/// Options for [`validate_ui`].
#[derive(Debug, Clone, Copy)]
pub struct UiCheckOptions {
    /// Scan stylesheets for literal colors
    pub check_colors: bool,
    /// Scan templates for legacy markup
    pub check_components: bool,
    /// Collect replacement suggestions for colors
    pub fix_suggestions: bool,
}

impl Default for UiCheckOptions {
    fn default() -> Self {
        Self {
            check_colors: true,
            check_components: true,
            fix_suggestions: true,
        }
    }
}

/// Result of [`validate_ui`].
#[derive(Debug, Clone, Default)]
pub struct UiReport {
    /// Every violation found, stylesheets first
    pub issues: Vec<UiIssue>,
    /// Replacement hints for color issues
    pub suggestions: Vec<String>,
}

impl UiReport {
    /// Returns `true` if no violation was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for UiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return f.write_str("UI validation passed! No issues found.");
        }
        write!(f, "Found {} issue(s):\n\n", self.issues.len())?;
        let lines: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}:{} - {}", i.file.display(), i.line, i.message))
            .collect();
        f.write_str(&lines.join("\n"))?;
        if !self.suggestions.is_empty() {
            write!(f, "\n\nSuggestions:\n{}", self.suggestions.join("\n"))?;
        }
        Ok(())
    }
}

/// Checks stylesheets in `css/` and templates under `templates/` against
/// the Webasyst UI 2.0 conventions.
///
/// # Errors
///
/// Returns an error if a stylesheet or template cannot be read. Files that
/// are not valid UTF-8 are still checked.
pub fn validate_ui(project_path: &Path, options: UiCheckOptions) -> Result<UiReport> {
    let mut report = UiReport::default();

    if options.check_colors {
        let css_dir = project_path.join("css");
        let mut stylesheets: Vec<PathBuf> = Vec::new();
        if fs::is_dir(&css_dir) {
            for name in fs::list_dir(&css_dir)? {
                if name.ends_with(".css") || name.ends_with(".styl") {
                    stylesheets.push(css_dir.join(name));
                }
            }
        }
        for path in stylesheets {
            check_stylesheet(&path, options.fix_suggestions, &mut report)?;
        }
    }

    if options.check_components {
        let templates_dir = project_path.join("templates");
        if fs::is_dir(&templates_dir) {
            let templates = WalkDir::new(&templates_dir)
                .into_iter()
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.file_name().to_string_lossy().ends_with(".html"));
            for entry in templates {
                check_template(entry.path(), &mut report)?;
            }
        }
    }

    Ok(report)
}

fn check_stylesheet(path: &Path, fix_suggestions: bool, report: &mut UiReport) -> Result<()> {
    let content = fs::read_file_lossy(path)?;
    for (idx, line) in content.split('\n').enumerate() {
        if line.contains("var(") {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with("/*") || trimmed.starts_with("//") {
            continue;
        }

        let hex = HEX_COLOR
            .find_iter(line)
            .filter(|m| (4..=7).contains(&m.as_str().len()))
            .map(|m| (m.as_str(), "HEX color"));
        let rgb = RGB_COLOR.find_iter(line).map(|m| (m.as_str(), "RGB color"));
        let rgba = RGBA_COLOR.find_iter(line).map(|m| (m.as_str(), "RGBA color"));

        for (value, label) in hex.chain(rgb).chain(rgba) {
            report.issues.push(UiIssue {
                file: path.to_path_buf(),
                line: idx + 1,
                kind: UiIssueKind::HardcodedColor,
                message: format!("Hardcoded {label}: {value}"),
            });
            if fix_suggestions {
                report.suggestions.push(format!(
                    "Line {}: Replace \"{value}\" with CSS variable like var(--text-color), var(--accent-color), etc.",
                    idx + 1
                ));
            }
        }
    }
    Ok(())
}

fn check_template(path: &Path, report: &mut UiReport) -> Result<()> {
    let content = fs::read_file_lossy(path)?;
    for (idx, line) in content.split('\n').enumerate() {
        for (pattern, suggestion) in LEGACY_PATTERNS.iter() {
            if pattern.is_match(line) {
                report.issues.push(UiIssue {
                    file: path.to_path_buf(),
                    line: idx + 1,
                    kind: UiIssueKind::LegacyPattern,
                    message: (*suggestion).to_string(),
                });
            }
        }
    }
    Ok(())
}
