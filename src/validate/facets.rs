//! Facet validators, one pure function per metadata facet.
//!
//! Policy: a missing required field is an error; a value outside the
//! recommended range is a warning. Every function returns a
//! [`ValidationResult`] and never fails.

use super::ValidationResult;
use crate::{
    config::{
        AnalyticsConfig, OpenGraphConfig, PageConfig, RobotsConfig, SiteInfoConfig, TwitterConfig,
        is_root_relative,
    },
    generator::sitemap::SitemapEntry,
    schema::Organization,
};

/// Recommended maximum title length (search-result display).
pub const TITLE_MAX_CHARS: usize = 60;
/// Recommended maximum description length (search snippet).
pub const DESCRIPTION_MAX_CHARS: usize = 160;
/// Known og:type values.
const OG_TYPES: &[&str] = &["website", "article", "profile", "book"];
/// Known twitter:card values.
const TWITTER_CARDS: &[&str] = &["summary", "summary_large_image", "app", "player"];

fn is_absolute_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

// ============================================================================
// Site / Analytics
// ============================================================================

/// Validate the global `[site]` section.
pub fn validate_site_config(site: &SiteInfoConfig) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if site.title.trim().is_empty() {
        result.error("[site.title] is required");
    }
    if site.description.trim().is_empty() {
        result.error("[site.description] is required");
    }
    match &site.url {
        None => result.error("[site.url] is required"),
        Some(url) if !is_absolute_url(url) => {
            result.error(format!("[site.url] is not an absolute http(s) URL: {url}"));
        }
        Some(_) => {}
    }

    if site.title.chars().count() > TITLE_MAX_CHARS {
        result.warn(format!(
            "[site.title] exceeds {TITLE_MAX_CHARS} characters"
        ));
    }
    if site.description.chars().count() > DESCRIPTION_MAX_CHARS {
        result.warn(format!(
            "[site.description] exceeds {DESCRIPTION_MAX_CHARS} characters"
        ));
    }

    if let Some(handle) = &site.twitter
        && handle.trim().is_empty()
    {
        result.warn("[site.twitter] is empty");
    }

    result
}

/// Validate the `[analytics]` section.
pub fn validate_analytics(analytics: &AnalyticsConfig) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !analytics.enable {
        return result;
    }

    match &analytics.measurement_id {
        None => result.error("[analytics] is enabled but measurement_id is missing"),
        Some(id) if !(id.starts_with("G-") || id.starts_with("UA-")) => {
            result.warn(format!(
                "[analytics.measurement_id] does not look like a G-/UA- id: {id}"
            ));
        }
        Some(_) => {}
    }

    result
}

// ============================================================================
// Pages
// ============================================================================

/// Validate a single `[pages."/path"]` entry, including its path key
/// and any Open Graph / Twitter sections.
pub fn validate_page(path: &str, page: &PageConfig) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !is_root_relative(path) {
        result.error(format!(
            "page key `{path}` must be root-relative (leading slash, no `//`)"
        ));
    }

    if page.title.trim().is_empty() {
        result.error(format!("page `{path}`: title is required"));
    } else if page.title.chars().count() > TITLE_MAX_CHARS {
        result.warn(format!(
            "page `{path}`: title exceeds {TITLE_MAX_CHARS} characters"
        ));
    }

    if page.description.trim().is_empty() {
        result.error(format!("page `{path}`: description is required"));
    } else if page.description.chars().count() > DESCRIPTION_MAX_CHARS {
        result.warn(format!(
            "page `{path}`: description exceeds {DESCRIPTION_MAX_CHARS} characters"
        ));
    }

    if let Some(canonical) = &page.canonical
        && !is_absolute_url(canonical)
    {
        result.warn(format!(
            "page `{path}`: canonical is not an absolute URL: {canonical}"
        ));
    }

    if let Some(og) = &page.open_graph {
        result.merge(validate_open_graph(path, og));
    }
    if let Some(twitter) = &page.twitter {
        result.merge(validate_twitter(path, twitter));
    }
    if let Some(hints) = &page.sitemap
        && let Some(priority) = hints.priority
        && !(0.0..=1.0).contains(&priority)
    {
        result.error(format!(
            "page `{path}`: sitemap priority {priority} outside 0.0-1.0"
        ));
    }

    result
}

/// Validate a page's Open Graph section as configured, without applying
/// site-level fallbacks.
pub fn validate_open_graph(path: &str, og: &OpenGraphConfig) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if og.title.as_deref().unwrap_or("").trim().is_empty() {
        result.error(format!("page `{path}`: open_graph.title is required"));
    }
    if og.description.as_deref().unwrap_or("").trim().is_empty() {
        result.error(format!("page `{path}`: open_graph.description is required"));
    }
    if og.image.as_deref().unwrap_or("").trim().is_empty() {
        result.error(format!("page `{path}`: open_graph.image is required"));
    }

    if let Some(og_type) = og.og_type.as_deref()
        && !OG_TYPES.contains(&og_type)
    {
        result.warn(format!(
            "page `{path}`: unknown open_graph.type `{og_type}`"
        ));
    }
    if og.site_name.as_deref().unwrap_or("").trim().is_empty() {
        result.warn(format!("page `{path}`: open_graph.site_name is missing"));
    }

    result
}

/// Validate a page's Twitter Card section as configured, without applying
/// site-level fallbacks.
pub fn validate_twitter(path: &str, twitter: &TwitterConfig) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if twitter.title.as_deref().unwrap_or("").trim().is_empty() {
        result.error(format!("page `{path}`: twitter.title is required"));
    }
    if twitter.description.as_deref().unwrap_or("").trim().is_empty() {
        result.error(format!("page `{path}`: twitter.description is required"));
    }
    if twitter.image.as_deref().unwrap_or("").trim().is_empty() {
        result.error(format!("page `{path}`: twitter.image is required"));
    }

    match twitter.card.as_deref() {
        None => result.error(format!("page `{path}`: twitter.card is required")),
        Some(card) if !TWITTER_CARDS.contains(&card) => {
            result.error(format!("page `{path}`: unknown twitter.card `{card}`"));
        }
        Some(_) => {}
    }
    if twitter.site.as_deref().unwrap_or("").trim().is_empty() {
        result.warn(format!("page `{path}`: twitter.site handle is missing"));
    }

    result
}

// ============================================================================
// Robots / Schema / Sitemap
// ============================================================================

/// Validate the `[robots]` directives.
pub fn validate_robots(robots: &RobotsConfig) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if robots.user_agent.trim().is_empty() {
        result.error("[robots.user_agent] must not be empty");
    }

    for rule in robots.allow.iter().chain(robots.disallow.iter()) {
        if !rule.starts_with('/') {
            result.warn(format!("robots rule `{rule}` should start with `/`"));
        }
    }

    if let Some(delay) = robots.crawl_delay
        && delay > 30
    {
        result.warn(format!("[robots.crawl_delay] of {delay}s is unusually high"));
    }

    result
}

/// Light independent validation of an Organization schema.
pub fn validate_schema(org: &Organization) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if org.name.trim().is_empty() {
        result.error("organization schema: name is required");
    }
    if !is_absolute_url(&org.url) {
        result.error(format!(
            "organization schema: url is not absolute: {}",
            org.url
        ));
    }
    if let Some(logo) = &org.logo
        && !is_absolute_url(logo)
    {
        result.warn(format!("organization schema: logo is not absolute: {logo}"));
    }

    result
}

/// Validate a single sitemap entry.
pub fn validate_sitemap_entry(entry: &SitemapEntry) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !is_absolute_url(&entry.url) {
        result.error(format!("sitemap url is not absolute: {}", entry.url));
    }
    if !(0.0..=1.0).contains(&entry.priority) {
        result.error(format!(
            "sitemap priority {} outside 0.0-1.0 for {}",
            entry.priority, entry.url
        ));
    }
    if chrono::NaiveDate::parse_from_str(&entry.lastmod, "%Y-%m-%d").is_err() {
        result.warn(format!(
            "sitemap lastmod `{}` is not an ISO-8601 date for {}",
            entry.lastmod, entry.url
        ));
    }

    result
}

/// Size/URL-count guard on an already-built sitemap string.
pub fn validate_sitemap_size(
    byte_len: usize,
    url_count: usize,
    max_bytes: usize,
    max_urls: usize,
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if byte_len > max_bytes {
        result.error(format!(
            "sitemap is {byte_len} bytes, exceeding the {max_bytes} byte limit"
        ));
    }
    if url_count > max_urls {
        result.error(format!(
            "sitemap has {url_count} URLs, exceeding the {max_urls} URL limit"
        ));
    }

    result
}
