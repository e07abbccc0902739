//! `[site]` section configuration.
//!
//! Contains global site information used by meta tags, JSON-LD schemas,
//! the web manifest and the sitemap/robots generators.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[site]` section in sitemeta.toml - global site metadata.
///
/// # Example
/// ```toml
/// [site]
/// title = "Acme Media"
/// description = "Stories that move"
/// url = "https://acme.example"
/// twitter = "@acmemedia"
/// logo = "/images/logo.png"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfoConfig {
    /// Site title used as default page title and organization name.
    pub title: String,

    /// Site description for default SEO meta tags.
    pub description: String,

    /// Base URL for absolute links in sitemap/schemas.
    /// Required for sitemap generation.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,

    /// Author/publisher name for meta tags.
    #[serde(default = "defaults::site::author")]
    #[educe(Default = defaults::site::author())]
    pub author: String,

    /// BCP 47 language code (e.g., "en-US").
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Twitter handle (with or without leading `@`) for Twitter Cards
    /// and the organization `sameAs` list.
    #[serde(default)]
    pub twitter: Option<String>,

    /// Logo path, relative to the base URL or absolute.
    #[serde(default)]
    pub logo: Option<String>,

    /// Directory containing the published site (served and scanned).
    #[serde(default = "defaults::site::root")]
    #[educe(Default = defaults::site::root())]
    pub root: PathBuf,

    /// Favicon source image served by `/api/favicon`.
    #[serde(default = "defaults::site::favicon")]
    #[educe(Default = defaults::site::favicon())]
    pub favicon: PathBuf,

    /// Web manifest theme color.
    #[serde(default = "defaults::site::theme_color")]
    #[educe(Default = defaults::site::theme_color())]
    pub theme_color: String,

    /// Web manifest background color.
    #[serde(default = "defaults::site::background_color")]
    #[educe(Default = defaults::site::background_color())]
    pub background_color: String,
}

impl SiteInfoConfig {
    /// Base URL without a trailing slash, empty string when unset.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }
}
