//! `[pages]` section configuration.
//!
//! A static mapping from URL path to per-page metadata. Paths are the map
//! keys; every key must be root-relative (leading slash, no `//`).
//!
//! # Example
//! ```toml
//! [pages."/"]
//! title = "Acme Media"
//! description = "Stories that move"
//!
//! [pages."/about".open_graph]
//! title = "About Acme"
//! image = "/images/og/about.png"
//!
//! [pages."/about".sitemap]
//! changefreq = "yearly"
//! priority = 0.8
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-page metadata configuration (one entry per URL path).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Page title (required, non-empty).
    pub title: String,

    /// Page description (required, non-empty).
    pub description: String,

    /// Canonical URL override.
    #[serde(default)]
    pub canonical: Option<String>,

    /// Open Graph tags for social-sharing previews.
    #[serde(default)]
    pub open_graph: Option<OpenGraphConfig>,

    /// Twitter Card tags.
    #[serde(default)]
    pub twitter: Option<TwitterConfig>,

    /// Robots meta directives.
    #[serde(default)]
    pub robots: Option<RobotsMeta>,

    /// Sitemap hints (changefreq/priority/lastmod).
    #[serde(default)]
    pub sitemap: Option<SitemapHints>,
}

/// Open Graph tag overrides. All fields optional so page entries can set
/// only what differs from the site-wide defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OpenGraphConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// og:type value, e.g. "website" or "article".
    #[serde(default, rename = "type")]
    pub og_type: Option<String>,
    #[serde(default)]
    pub site_name: Option<String>,
}

/// Twitter Card tag overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TwitterConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// twitter:card value, e.g. "summary" or "summary_large_image".
    #[serde(default)]
    pub card: Option<String>,
    /// Site handle, e.g. "@acmemedia".
    #[serde(default)]
    pub site: Option<String>,
}

/// Robots meta directives for a single page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RobotsMeta {
    #[serde(default)]
    pub index: Option<bool>,
    #[serde(default)]
    pub follow: Option<bool>,
    #[serde(default)]
    pub max_snippet: Option<i32>,
}

/// Per-page sitemap hints. Absent fields fall back to path heuristics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SitemapHints {
    #[serde(default)]
    pub changefreq: Option<ChangeFreq>,
    #[serde(default)]
    pub priority: Option<f32>,
    /// ISO-8601 date string ("YYYY-MM-DD").
    #[serde(default)]
    pub lastmod: Option<String>,
}

/// Sitemap change frequency (the seven values allowed by the protocol).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that a page key is a root-relative URL path:
/// leading slash and no empty segments (`//`).
pub fn is_root_relative(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    !path.contains("//")
}
