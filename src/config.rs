//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration is flat — one
//! file next to the content, no cascading — and sparse: every field has a
//! default, so a config file only specifies what it overrides.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Brochure"        # Page <title> and header brand
//! language = "en"           # <html lang="...">
//!
//! [cms]
//! project_id = ""           # CMS project id (required unless base_url is set)
//! dataset = "production"    # CMS dataset name
//! api_version = "v2024-01-01"
//! # base_url = "https://example.test"  # Override the derived endpoint (tests, proxies)
//!
//! [colors]
//! accent = "#10b981"        # Buttons, active dot, quote mark
//! background = "#18181b"    # References section background
//! surface = "#27272a"       # Card background
//! text = "#fafafa"
//! text_muted = "#a1a1aa"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

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
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteInfo,
    pub cms: CmsConfig,
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    /// Value of the `lang` attribute on the generated `<html>` element.
    pub language: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Brochure".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Where content comes from. The endpoint is derived from project id,
/// api version and dataset unless `base_url` overrides it outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Full endpoint override. Takes precedence over `project_id`; used by
    /// tests and self-hosted mirrors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "v2024-01-01".to_string(),
            base_url: None,
        }
    }
}

/// Colors injected into the generated CSS as custom properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_muted: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            accent: "#10b981".to_string(),
            background: "#18181b".to_string(),
            surface: "#27272a".to_string(),
            text: "#fafafa".to_string(),
            text_muted: "#a1a1aa".to_string(),
        }
    }
}

/// Load `config.toml` from `dir`, falling back to defaults when the file
/// does not exist. A file that exists but fails to parse or validate is an
/// error — silently building with defaults would mask typos.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Reject configs that cannot produce a working fetch endpoint.
pub fn validate(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.cms.project_id.is_empty() && config.cms.base_url.is_none() {
        return Err(ConfigError::Validation(
            "cms.project_id is empty and no cms.base_url override is set".to_string(),
        ));
    }
    if config.cms.dataset.is_empty() {
        return Err(ConfigError::Validation("cms.dataset is empty".to_string()));
    }
    Ok(())
}

/// Generate CSS custom properties from the color config.
///
/// Prepended to the static stylesheet at generate time.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n  --accent: {};\n  --background: {};\n  --surface: {};\n  --text: {};\n  --text-muted: {};\n}}",
        colors.accent, colors.background, colors.surface, colors.text, colors.text_muted
    )
}

/// A stock `config.toml` with all options documented, for `brochure gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# brochure configuration
# All options are optional - defaults shown below.

[site]
title = "Brochure"          # Page <title> and header brand
language = "en"             # <html lang="...">

[cms]
project_id = ""             # CMS project id (required unless base_url is set)
dataset = "production"      # CMS dataset name
api_version = "v2024-01-01" # CMS API version segment
# base_url = "https://example.test"  # Override the derived endpoint

[colors]
accent = "#10b981"          # Buttons, active dot, quote mark
background = "#18181b"      # References section background
surface = "#27272a"         # Card background
text = "#fafafa"
text_muted = "#a1a1aa"
"##
}
