//! `[robots]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[robots]` section in sitemeta.toml - robots.txt directives.
///
/// # Example
/// ```toml
/// [robots]
/// user_agent = "*"
/// allow = ["/"]
/// disallow = ["/admin", "/api"]
/// crawl_delay = 1
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RobotsConfig {
    /// User-agent the directives apply to.
    #[serde(default = "defaults::robots::user_agent")]
    #[educe(Default = defaults::robots::user_agent())]
    pub user_agent: String,

    /// Allow lines. `Allow: /` is emitted when empty.
    #[serde(default)]
    pub allow: Vec<String>,

    /// Disallow lines.
    #[serde(default)]
    pub disallow: Vec<String>,

    /// Optional Crawl-delay in seconds.
    #[serde(default)]
    pub crawl_delay: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_robots_config_defaults() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.robots.user_agent, "*");
        assert!(config.robots.allow.is_empty());
        assert!(config.robots.disallow.is_empty());
        assert_eq!(config.robots.crawl_delay, None);
    }

    #[test]
    fn test_robots_config_full() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"

            [robots]
            user_agent = "Googlebot"
            allow = ["/"]
            disallow = ["/admin", "/api"]
            crawl_delay = 2
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.robots.user_agent, "Googlebot");
        assert_eq!(config.robots.allow, vec!["/"]);
        assert_eq!(config.robots.disallow, vec!["/admin", "/api"]);
        assert_eq!(config.robots.crawl_delay, Some(2));
    }
}
