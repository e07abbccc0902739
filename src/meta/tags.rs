//! Head tag rendering.
//!
//! Resolves a page's metadata (its `[pages]` entry, or a default derived
//! from `[site]` for unconfigured paths), applies caller overrides via the
//! merger, sanitizes every user-authored string and renders the `<head>`
//! fragment: title, description, canonical link, robots meta, Open Graph
//! and Twitter Card tags plus the JSON-LD script.

use crate::{
    config::{PageConfig, SiteConfig},
    generator::sitemap::escape_xml,
    meta::{MetadataOverrides, merge_metadata, sanitize_description, sanitize_title},
    schema::{
        ContentInfo, Schema, absolute_url, creative_work_schema, organization_schema,
        render_json_ld,
    },
};

/// Resolve the effective metadata for a path.
///
/// Configured pages are the base; unconfigured paths get a default built
/// from the `[site]` section, so discovery-only pages still render a
/// complete head. Overrides win per the merger's semantics.
pub fn resolve_metadata(
    config: &SiteConfig,
    path: &str,
    overrides: &MetadataOverrides,
) -> PageConfig {
    let base = config
        .pages
        .get(path)
        .cloned()
        .unwrap_or_else(|| default_metadata(config));
    merge_metadata(overrides, &base)
}

/// Site-derived default metadata for paths without a `[pages]` entry.
fn default_metadata(config: &SiteConfig) -> PageConfig {
    PageConfig {
        title: config.site.title.clone(),
        description: config.site.description.clone(),
        ..Default::default()
    }
}

/// Render the head fragment for a resolved page.
pub fn render_head_tags(config: &SiteConfig, path: &str, page: &PageConfig) -> String {
    let base = config.site.base_url();
    let title = sanitize_title(&page.title);
    let description = sanitize_description(&page.description);
    let canonical = page
        .canonical
        .clone()
        .unwrap_or_else(|| absolute_url(base, path));
    // Escaped once; the canonical lands in two attribute positions
    let canonical = escape_xml(&canonical);

    let mut html = String::with_capacity(1024);

    html.push_str("<title>");
    html.push_str(&title);
    html.push_str("</title>\n");

    meta_name(&mut html, "description", &description);

    html.push_str("<link rel=\"canonical\" href=\"");
    html.push_str(&canonical);
    html.push_str("\">\n");

    if let Some(robots) = &page.robots {
        meta_name(&mut html, "robots", &robots_content(robots));
    }

    // Open Graph, falling back to the page-level title/description
    let og = page.open_graph.clone().unwrap_or_default();
    meta_property(&mut html, "og:title", &sanitize_title(
        og.title.as_deref().unwrap_or(&page.title),
    ));
    meta_property(&mut html, "og:description", &sanitize_description(
        og.description.as_deref().unwrap_or(&page.description),
    ));
    meta_property(&mut html, "og:type", og.og_type.as_deref().unwrap_or("website"));
    meta_property(&mut html, "og:url", &canonical);
    meta_property(&mut html, "og:site_name", &sanitize_title(
        og.site_name.as_deref().unwrap_or(&config.site.title),
    ));
    if let Some(image) = og.image.as_deref() {
        meta_property(&mut html, "og:image", &absolute_url(base, image));
    }

    // Twitter Card
    let twitter = page.twitter.clone().unwrap_or_default();
    meta_name(
        &mut html,
        "twitter:card",
        twitter.card.as_deref().unwrap_or("summary_large_image"),
    );
    meta_name(&mut html, "twitter:title", &sanitize_title(
        twitter.title.as_deref().unwrap_or(&page.title),
    ));
    meta_name(&mut html, "twitter:description", &sanitize_description(
        twitter.description.as_deref().unwrap_or(&page.description),
    ));
    if let Some(image) = twitter.image.as_deref() {
        meta_name(&mut html, "twitter:image", &absolute_url(base, image));
    }
    if let Some(site) = twitter.site.as_deref().or(config.site.twitter.as_deref()) {
        meta_name(&mut html, "twitter:site", &escape_xml(site));
    }

    let json_ld = render_json_ld(&[page_schema(config, path, page)]);
    if !json_ld.is_empty() {
        html.push_str("<script type=\"application/ld+json\">");
        html.push_str(&json_ld);
        html.push_str("</script>\n");
    }

    html
}

/// Root path gets the Organization schema, content pages a CreativeWork.
fn page_schema(config: &SiteConfig, path: &str, page: &PageConfig) -> Schema {
    if path == "/" {
        Schema::Organization(organization_schema(config))
    } else {
        Schema::CreativeWork(creative_work_schema(
            config,
            &ContentInfo {
                title: page.title.clone(),
                description: Some(page.description.clone()),
                path: path.to_string(),
                published: None,
                modified: None,
            },
        ))
    }
}

/// Content for the robots meta tag, e.g. `index, follow, max-snippet:160`.
fn robots_content(robots: &crate::config::RobotsMeta) -> String {
    let mut parts = Vec::new();
    if let Some(index) = robots.index {
        parts.push(if index { "index".to_string() } else { "noindex".to_string() });
    }
    if let Some(follow) = robots.follow {
        parts.push(if follow { "follow".to_string() } else { "nofollow".to_string() });
    }
    if let Some(max_snippet) = robots.max_snippet {
        parts.push(format!("max-snippet:{max_snippet}"));
    }
    parts.join(", ")
}

fn meta_name(html: &mut String, name: &str, content: &str) {
    html.push_str("<meta name=\"");
    html.push_str(name);
    html.push_str("\" content=\"");
    html.push_str(content);
    html.push_str("\">\n");
}

fn meta_property(html: &mut String, property: &str, content: &str) {
    html.push_str("<meta property=\"");
    html.push_str(property);
    html.push_str("\" content=\"");
    html.push_str(content);
    html.push_str("\">\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OpenGraphConfig, RobotsMeta};

    fn config() -> SiteConfig {
        toml::from_str(
            r#"
            [site]
            title = "Acme Media"
            description = "Stories that move"
            url = "https://acme.example"
            twitter = "@acmemedia"

            [pages."/"]
            title = "Acme Media"
            description = "Stories that move"

            [pages."/about"]
            title = "About"
            description = "About the company"

            [pages."/about".open_graph]
            title = "About Acme"
            image = "/images/og/about.png"

            [pages."/about".robots]
            index = true
            follow = true
            max_snippet = 160
        "#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_configured_page() {
        let page = resolve_metadata(&config(), "/about", &MetadataOverrides::default());
        assert_eq!(page.title, "About");
    }

    #[test]
    fn test_resolve_unconfigured_page_uses_site_defaults() {
        let page = resolve_metadata(&config(), "/careers", &MetadataOverrides::default());
        assert_eq!(page.title, "Acme Media");
        assert_eq!(page.description, "Stories that move");
    }

    #[test]
    fn test_resolve_overrides_win() {
        let overrides = MetadataOverrides {
            title: Some("Custom".into()),
            ..Default::default()
        };
        let page = resolve_metadata(&config(), "/about", &overrides);
        assert_eq!(page.title, "Custom");
        assert_eq!(page.description, "About the company");
    }

    #[test]
    fn test_head_tags_basic_structure() {
        let config = config();
        let page = resolve_metadata(&config, "/about", &MetadataOverrides::default());
        let html = render_head_tags(&config, "/about", &page);

        assert!(html.contains("<title>About</title>"));
        assert!(html.contains(r#"<meta name="description" content="About the company">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://acme.example/about">"#));
        assert!(html.contains(r#"<meta name="robots" content="index, follow, max-snippet:160">"#));
    }

    #[test]
    fn test_head_tags_open_graph_fallbacks() {
        let config = config();
        let page = resolve_metadata(&config, "/about", &MetadataOverrides::default());
        let html = render_head_tags(&config, "/about", &page);

        // explicit og title, description falls back to the page's
        assert!(html.contains(r#"<meta property="og:title" content="About Acme">"#));
        assert!(html.contains(r#"<meta property="og:description" content="About the company">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
        assert!(
            html.contains(r#"<meta property="og:image" content="https://acme.example/images/og/about.png">"#)
        );
        assert!(html.contains(r#"<meta property="og:site_name" content="Acme Media">"#));
    }

    #[test]
    fn test_head_tags_twitter_defaults() {
        let config = config();
        let page = resolve_metadata(&config, "/", &MetadataOverrides::default());
        let html = render_head_tags(&config, "/", &page);

        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(html.contains(r#"<meta name="twitter:site" content="@acmemedia">"#));
    }

    #[test]
    fn test_head_tags_json_ld() {
        let config = config();

        let home = resolve_metadata(&config, "/", &MetadataOverrides::default());
        let html = render_head_tags(&config, "/", &home);
        assert!(html.contains(r#"<script type="application/ld+json">"#));
        assert!(html.contains(r#""@type":"Organization""#));

        let about = resolve_metadata(&config, "/about", &MetadataOverrides::default());
        let html = render_head_tags(&config, "/about", &about);
        assert!(html.contains(r#""@type":"CreativeWork""#));
    }

    #[test]
    fn test_head_tags_escape_user_strings() {
        let mut config = config();
        config.pages.get_mut("/about").unwrap().title = r#"Tom & Jerry's <show>"#.into();

        let page = resolve_metadata(&config, "/about", &MetadataOverrides::default());
        let html = render_head_tags(&config, "/about", &page);

        assert!(html.contains("<title>Tom &amp; Jerry&#39;s &lt;show&gt;</title>"));
    }

    #[test]
    fn test_head_tags_escape_canonical_in_link_and_og_url() {
        let mut config = config();
        config.pages.get_mut("/about").unwrap().canonical =
            Some("https://acme.example/about?ref=a&b=\"c\"".into());

        let page = resolve_metadata(&config, "/about", &MetadataOverrides::default());
        let html = render_head_tags(&config, "/about", &page);

        let escaped = "https://acme.example/about?ref=a&amp;b=&quot;c&quot;";
        assert!(html.contains(&format!(r#"<link rel="canonical" href="{escaped}">"#)));
        assert!(html.contains(&format!(r#"<meta property="og:url" content="{escaped}">"#)));
    }

    #[test]
    fn test_robots_content_variants() {
        let content = robots_content(&RobotsMeta {
            index: Some(false),
            follow: None,
            max_snippet: Some(50),
        });
        assert_eq!(content, "noindex, max-snippet:50");
    }

    #[test]
    fn test_og_override_merge_flows_into_tags() {
        let config = config();
        let overrides = MetadataOverrides {
            open_graph: Some(OpenGraphConfig {
                description: Some("Override description".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let page = resolve_metadata(&config, "/about", &overrides);
        let html = render_head_tags(&config, "/about", &page);

        // overridden sub-field replaced, absent sub-fields keep configured values
        assert!(html.contains(r#"<meta property="og:description" content="Override description">"#));
        assert!(html.contains(r#"<meta property="og:title" content="About Acme">"#));
    }
}
