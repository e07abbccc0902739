//! robots.txt generation.
//!
//! Renders the `[robots]` directives into a robots.txt body with a
//! trailing sitemap reference.

use crate::config::SiteConfig;
use anyhow::{Context, Result};
use std::fs;

/// Build the robots.txt body.
///
/// Emits the user-agent line, Allow lines (defaulting to `Allow: /` when
/// none are configured), Disallow lines, an optional Crawl-delay, and a
/// trailing `Sitemap:` reference.
pub fn build_robots_txt(config: &SiteConfig) -> String {
    let robots = &config.robots;
    let mut txt = String::with_capacity(256);

    txt.push_str("User-agent: ");
    txt.push_str(&robots.user_agent);
    txt.push('\n');

    if robots.allow.is_empty() {
        txt.push_str("Allow: /\n");
    } else {
        for rule in &robots.allow {
            txt.push_str("Allow: ");
            txt.push_str(rule);
            txt.push('\n');
        }
    }

    for rule in &robots.disallow {
        txt.push_str("Disallow: ");
        txt.push_str(rule);
        txt.push('\n');
    }

    if let Some(delay) = robots.crawl_delay {
        txt.push_str(&format!("Crawl-delay: {delay}\n"));
    }

    txt.push('\n');
    txt.push_str("Sitemap: ");
    txt.push_str(&config.sitemap_url());
    txt.push('\n');

    txt
}

/// Permissive robots.txt used as the degraded response body.
pub fn fallback_robots_txt(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        config.sitemap_url()
    )
}

/// Write robots.txt into the site root.
pub fn write_robots_txt(config: &SiteConfig) -> Result<()> {
    let path = config.site.root.join("robots.txt");
    fs::write(&path, build_robots_txt(config))
        .with_context(|| format!("Failed to write robots.txt to {}", path.display()))?;

    crate::log!("robots"; "robots.txt");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml_str: &str) -> SiteConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_robots_txt_full() {
        let config = config(
            r#"
            [site]
            title = "Acme"
            description = "Acme"
            url = "https://example.com"

            [robots]
            allow = ["/"]
            disallow = ["/admin"]
        "#,
        );
        let txt = build_robots_txt(&config);

        assert!(txt.contains("User-agent: *\n"));
        assert!(txt.contains("Allow: /\n"));
        assert!(txt.contains("Disallow: /admin\n"));
        assert!(txt.trim_end().ends_with("Sitemap: https://example.com/sitemap.xml"));
    }

    #[test]
    fn test_robots_txt_default_allow() {
        let config = config(
            r#"
            [site]
            title = "Acme"
            description = "Acme"
            url = "https://example.com"
        "#,
        );
        let txt = build_robots_txt(&config);

        assert!(txt.contains("Allow: /\n"));
        assert!(!txt.contains("Disallow:"));
        assert!(!txt.contains("Crawl-delay:"));
    }

    #[test]
    fn test_robots_txt_crawl_delay() {
        let config = config(
            r#"
            [site]
            title = "Acme"
            description = "Acme"
            url = "https://example.com"

            [robots]
            crawl_delay = 2
        "#,
        );
        let txt = build_robots_txt(&config);

        assert!(txt.contains("Crawl-delay: 2\n"));
    }

    #[test]
    fn test_robots_txt_custom_user_agent() {
        let config = config(
            r#"
            [site]
            title = "Acme"
            description = "Acme"
            url = "https://example.com"

            [robots]
            user_agent = "Googlebot"
        "#,
        );
        let txt = build_robots_txt(&config);

        assert!(txt.starts_with("User-agent: Googlebot\n"));
    }

    #[test]
    fn test_fallback_is_permissive() {
        let config = config(
            r#"
            [site]
            title = "Acme"
            description = "Acme"
            url = "https://example.com"
        "#,
        );
        let txt = fallback_robots_txt(&config);

        assert!(txt.contains("Allow: /"));
        assert!(txt.contains("Sitemap: https://example.com/sitemap.xml"));
    }
}
