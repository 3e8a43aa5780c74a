//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root; every key is optional and overrides a stock default.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml          # Site config (optional)
//! └── handbook/            # Handbook pages ([handbook].dir)
//!     ├── index.md
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! url = "https://example.com"   # Absolute origin used in canonical URLs and the sitemap
//! name = "My Portfolio"
//! description = ""
//! language = "en"
//!
//! [handbook]
//! dir = "handbook"              # Content directory, relative to the content root
//! path = "handbook"             # URL segment the handbook is served under
//! title = "Handbook"
//! description = ""
//!
//! [personal]                    # Fallbacks for the remote personal-info keys
//! name = "Your Name"
//! title = "Software Engineer"
//! linkedin = ""
//! github = ""
//! youtube = ""
//! consultation_link = ""
//! consultation_price = ""
//!
//! [remote]
//! # url = "https://config.example.com/personal.json"
//! # token = "..."
//! timeout_secs = 10
//!
//! [analytics]
//! # measurement_id = "G-XXXXXXX"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#666666"
//! border = "#e5e5e5"
//! link = "#1a56db"
//! accent = "#1a56db"
//!
//! [colors.dark]
//! background = "#111111"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#7aa2f7"
//! accent = "#7aa2f7"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [site]
//! url = "https://jane.dev"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// RFC 3986 unreserved characters: A-Z a-z 0-9 - . _ ~
const SLUG_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and canonical origin.
    pub site: SiteInfo,
    /// Where handbook pages live on disk and on the site.
    pub handbook: HandbookConfig,
    /// Per-field fallbacks for the remote personal-info keys.
    pub personal: PersonalDefaults,
    /// Remote key-value service holding personal info.
    pub remote: RemoteConfig,
    /// Optional analytics tag.
    pub analytics: AnalyticsConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.site.url.starts_with("http://") || self.site.url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.url must start with http:// or https://".into(),
            ));
        }
        if !is_plain_relative(&self.handbook.dir) {
            return Err(ConfigError::Validation(
                "handbook.dir must be a non-empty relative path without '..'".into(),
            ));
        }
        let path = self.handbook.path.trim_matches('/');
        if path.is_empty() || path.contains('/') || path == "." || path == ".." {
            return Err(ConfigError::Validation(
                "handbook.path must be a single non-empty URL segment".into(),
            ));
        }
        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "remote.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Site origin without a trailing slash.
    pub fn origin(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }

    /// Join a root-relative path (`/handbook/`) onto the site origin.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}/{}", self.origin(), path.trim_start_matches('/'))
    }

    /// Root-relative URL of a handbook page; `""` is the handbook root.
    ///
    /// The slug is a file stem, so anything outside the unreserved set
    /// (`#`, `?`, spaces, non-ASCII) is percent-encoded.
    pub fn handbook_path(&self, slug: &str) -> String {
        let base = self.handbook.path.trim_matches('/');
        if slug.is_empty() {
            format!("/{base}/")
        } else {
            format!("/{base}/{}/", utf8_percent_encode(slug, SLUG_ENCODE_SET))
        }
    }

    /// Absolute URL of a handbook page.
    pub fn handbook_url(&self, slug: &str) -> String {
        self.absolute_url(&self.handbook_path(slug))
    }

    /// Handbook content directory under `content_root`.
    pub fn handbook_dir(&self, content_root: &Path) -> std::path::PathBuf {
        content_root.join(&self.handbook.dir)
    }
}

fn is_plain_relative(path: &str) -> bool {
    let path = Path::new(path);
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Absolute origin, e.g. `https://jane.dev`.
    pub url: String,
    /// Site name shown in titles and `og:site_name`.
    pub name: String,
    /// Home page meta description.
    pub description: String,
    /// BCP 47 language tag for `<html lang>` and `inLanguage`.
    pub language: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            name: "My Portfolio".to_string(),
            description: String::new(),
            language: "en".to_string(),
        }
    }
}

/// Handbook location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandbookConfig {
    /// Content directory, relative to the content root.
    pub dir: String,
    /// URL segment (`/handbook/...`).
    pub path: String,
    /// Handbook title used in breadcrumbs and headings.
    pub title: String,
    /// Handbook index meta description.
    pub description: String,
}

impl Default for HandbookConfig {
    fn default() -> Self {
        Self {
            dir: "handbook".to_string(),
            path: "handbook".to_string(),
            title: "Handbook".to_string(),
            description: String::new(),
        }
    }
}

/// Fallback values for each personal-info key.
///
/// Empty strings mean "not set": optional links with an empty fallback are
/// omitted from the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersonalDefaults {
    pub name: String,
    pub title: String,
    pub linkedin: String,
    pub github: String,
    pub youtube: String,
    pub consultation_link: String,
    pub consultation_price: String,
}

impl Default for PersonalDefaults {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            title: "Software Engineer".to_string(),
            linkedin: String::new(),
            github: String::new(),
            youtube: String::new(),
            consultation_link: String::new(),
            consultation_price: String::new(),
        }
    }
}

/// Remote personal-info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Endpoint returning a JSON object of string values. Unset = offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Sent as `Authorization: Bearer <token>` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Whole-request timeout.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: 10,
        }
    }
}

/// Analytics settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Google tag id; when set every page loads the tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Sidebar, breadcrumbs, descriptions.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    /// Call-to-action buttons and the current sidebar entry.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e5e5e5".to_string(),
            link: "#1a56db".to_string(),
            accent: "#1a56db".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111111".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#7aa2f7".to_string(),
            accent: "#7aa2f7".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), url = %config.site.url, "config loaded");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Absolute origin used for canonical links, Open Graph and the sitemap.
url = "https://example.com"
name = "My Portfolio"
description = ""
# Language tag for <html lang> and structured data.
language = "en"

# ---------------------------------------------------------------------------
# Handbook
# ---------------------------------------------------------------------------
[handbook]
# Directory of markdown pages, relative to the content root.
# index.md is the introduction; every other <slug>.md becomes /<path>/<slug>/.
dir = "handbook"
# URL segment the handbook is served under.
path = "handbook"
title = "Handbook"
description = ""

# ---------------------------------------------------------------------------
# Personal info
# ---------------------------------------------------------------------------
# Fallbacks for the keys fetched from [remote]. Empty links are hidden.
[personal]
name = "Your Name"
title = "Software Engineer"
linkedin = ""
github = ""
youtube = ""
consultation_link = ""
consultation_price = ""

# ---------------------------------------------------------------------------
# Remote personal-info service
# ---------------------------------------------------------------------------
[remote]
# JSON endpoint with string values (flat, or wrapped in "entries").
# Leave unset to build from [personal] only.
# url = "https://config.example.com/personal.json"
# token = "secret"
timeout_secs = 10

# ---------------------------------------------------------------------------
# Analytics
# ---------------------------------------------------------------------------
[analytics]
# measurement_id = "G-XXXXXXX"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#666666"    # Sidebar, breadcrumbs, descriptions
border = "#e5e5e5"
link = "#1a56db"
accent = "#1a56db"        # Buttons, current sidebar entry

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111111"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#7aa2f7"
accent = "#7aa2f7"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    fn vars(scheme: &ColorScheme, indent: &str) -> String {
        [
            ("bg", &scheme.background),
            ("text", &scheme.text),
            ("text-muted", &scheme.text_muted),
            ("border", &scheme.border),
            ("link", &scheme.link),
            ("accent", &scheme.accent),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    }

    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}
