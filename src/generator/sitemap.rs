//! Sitemap generation.
//!
//! Merges the statically configured page list with dynamically discovered
//! public pages and emits a sitemap.xml string.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://acme.example/</loc>
//!     <lastmod>2025-06-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::{ChangeFreq, SiteConfig},
    discover::{DiscoveredPage, discover_pages},
};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::Serialize;
use std::{borrow::Cow, collections::BTreeMap, fs};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// A single `<url>` block. Derived per generation call, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct SitemapEntry {
    /// Absolute URL (`<loc>`).
    pub url: String,
    /// ISO-8601 date string (`<lastmod>`).
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    /// 0.0-1.0 crawl priority.
    pub priority: f32,
}

/// Sitemap data structure
pub struct Sitemap {
    entries: Vec<SitemapEntry>,
}

impl Sitemap {
    /// Build the sitemap from configured pages merged with discovered
    /// public pages. Discovered paths already covered by the static
    /// config are dropped; configured entries take precedence.
    pub fn build(config: &SiteConfig, discovered: &[DiscoveredPage]) -> Result<Self> {
        if config.site.url.is_none() {
            bail!("[site.url] is required for sitemap generation");
        }
        let base_url = config.site.base_url();

        // path -> entry, de-duplicated with configured entries winning
        let mut by_path: BTreeMap<String, SitemapEntry> = BTreeMap::new();

        for page in discovered.iter().filter(|p| p.is_public()) {
            by_path.insert(
                page.path.clone(),
                entry_for(config, base_url, &page.path, false),
            );
        }

        for path in config.pages.keys() {
            by_path.insert(path.clone(), entry_for(config, base_url, path, true));
        }

        Ok(Self {
            entries: by_path.into_values().collect(),
        })
    }

    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generate the sitemap XML string.
    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.entries {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.url));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&entry.lastmod);
            xml.push_str("</lastmod>\n    <changefreq>");
            xml.push_str(entry.changefreq.as_str());
            xml.push_str("</changefreq>\n    <priority>");
            xml.push_str(&format_priority(entry.priority));
            xml.push_str("</priority>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Discover pages, build the sitemap and return `(xml, url_count)`.
///
/// This is the shared entry point for the `generate` command and the
/// `/sitemap.xml` endpoint.
pub fn build_sitemap_xml(config: &SiteConfig) -> Result<(String, usize)> {
    let discovered = discover_pages(&config.site.root);
    let sitemap = Sitemap::build(config, &discovered)?;
    let count = sitemap.len();
    Ok((sitemap.into_xml(), count))
}

/// Minimal one-entry sitemap (homepage only), used as the degraded
/// response body when generation fails.
pub fn fallback_sitemap_xml(config: &SiteConfig) -> String {
    let base_url = config.site.base_url();
    let home = if base_url.is_empty() {
        "/".to_string()
    } else {
        format!("{base_url}/")
    };

    Sitemap {
        entries: vec![SitemapEntry {
            url: home,
            lastmod: today(),
            changefreq: ChangeFreq::Weekly,
            priority: 1.0,
        }],
    }
    .into_xml()
}

/// Write the sitemap into the site root if enabled.
pub fn write_sitemap(config: &SiteConfig) -> Result<()> {
    if !config.sitemap.enable {
        return Ok(());
    }

    let (xml, count) = build_sitemap_xml(config)?;
    let path = config.site.root.join(&config.sitemap.path);
    fs::write(&path, &xml)
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    crate::log!("sitemap"; "{} ({count} urls)", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

// ============================================================================
// Entry Resolution
// ============================================================================

/// Resolve one sitemap entry for a path.
///
/// Explicit per-page hints win; otherwise lastmod is the configured static
/// date for configured pages (today for discovered ones), and
/// changefreq/priority come from the path heuristic.
fn entry_for(config: &SiteConfig, base_url: &str, path: &str, configured: bool) -> SitemapEntry {
    let hints = config
        .pages
        .get(path)
        .and_then(|page| page.sitemap.as_ref());

    let (default_freq, default_priority) = default_hints(path);

    let lastmod = hints
        .and_then(|h| h.lastmod.clone())
        .or_else(|| {
            if configured {
                config.sitemap.static_lastmod.clone()
            } else {
                None
            }
        })
        .unwrap_or_else(today);

    SitemapEntry {
        url: page_url(base_url, path),
        lastmod,
        changefreq: hints.and_then(|h| h.changefreq).unwrap_or(default_freq),
        priority: hints.and_then(|h| h.priority).unwrap_or(default_priority),
    }
}

/// Path-based changefreq/priority heuristic.
///
/// Deliberately literal substring checks, matching the long-standing
/// behavior: root is weekly/1.0, the core static pages yearly/0.7-0.8,
/// everything else monthly/0.5.
fn default_hints(path: &str) -> (ChangeFreq, f32) {
    if path == "/" {
        (ChangeFreq::Weekly, 1.0)
    } else if path.contains("/about") {
        (ChangeFreq::Yearly, 0.8)
    } else if path.contains("/contact") {
        (ChangeFreq::Yearly, 0.7)
    } else {
        (ChangeFreq::Monthly, 0.5)
    }
}

/// Absolute URL for a root-relative path. The root path keeps its
/// trailing slash (`https://acme.example/`), other paths do not.
fn page_url(base_url: &str, path: &str) -> String {
    if path == "/" {
        format!("{base_url}/")
    } else {
        format!("{base_url}{path}")
    }
}

/// Current date as "YYYY-MM-DD".
fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Priority with one decimal digit, e.g. "1.0" / "0.5".
fn format_priority(priority: f32) -> String {
    format!("{priority:.1}")
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
