//! `[sitemap]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[sitemap]` section in sitemeta.toml - sitemap generation settings.
///
/// # Example
/// ```toml
/// [sitemap]
/// enable = true
/// path = "sitemap.xml"
/// static_lastmod = "2025-06-01"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapGenConfig {
    /// Enable sitemap generation.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output file name, relative to the site root.
    #[serde(default = "defaults::sitemap::path")]
    #[educe(Default = defaults::sitemap::path())]
    pub path: PathBuf,

    /// Fixed lastmod date ("YYYY-MM-DD") for statically configured pages.
    /// Discovered pages fall back to the current date.
    #[serde(default)]
    pub static_lastmod: Option<String>,

    /// Maximum number of URLs before the sitemap is reported invalid.
    #[serde(default = "defaults::sitemap::max_urls")]
    #[educe(Default = defaults::sitemap::max_urls())]
    pub max_urls: usize,

    /// Maximum sitemap size before it is reported invalid.
    /// Human-readable string with B/KB/MB suffix.
    #[serde(default = "defaults::sitemap::max_size")]
    #[educe(Default = defaults::sitemap::max_size())]
    pub max_size: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_sitemap_config_defaults() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(config.sitemap.enable);
        assert_eq!(config.sitemap.path.to_str(), Some("sitemap.xml"));
        assert_eq!(config.sitemap.static_lastmod, None);
        assert_eq!(config.sitemap.max_urls, 50_000);
        assert_eq!(config.sitemap.max_size, "50MB");
    }

    #[test]
    fn test_sitemap_config_full() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"

            [sitemap]
            enable = false
            path = "map.xml"
            static_lastmod = "2025-06-01"
            max_urls = 1000
            max_size = "10MB"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(!config.sitemap.enable);
        assert_eq!(config.sitemap.path.to_str(), Some("map.xml"));
        assert_eq!(
            config.sitemap.static_lastmod,
            Some("2025-06-01".to_string())
        );
        assert_eq!(config.sitemap.max_urls, 1000);
    }
}
