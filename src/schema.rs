//! JSON-LD (schema.org) structured data.
//!
//! Builds Organization and CreativeWork shapes from the site config and
//! renders them for embedding in a `<script type="application/ld+json">`
//! tag. Rendering degrades to an empty string on serialization failure;
//! it never propagates an error.

use crate::{config::SiteConfig, log};
use chrono::{DateTime, Utc};
use serde::Serialize;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// schema.org Organization.
#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    /// Omitted when the organization is embedded inside another schema.
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<&'static str>,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "sameAs", skip_serializing_if = "Option::is_none")]
    pub same_as: Option<Vec<String>>,
}

/// schema.org CreativeWork with an embedded Organization creator.
#[derive(Debug, Clone, Serialize)]
pub struct CreativeWork {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub creator: Organization,
    #[serde(rename = "datePublished", skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(rename = "dateModified", skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
}

/// One renderable JSON-LD schema.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Schema {
    Organization(Organization),
    CreativeWork(CreativeWork),
}

/// Content information driving a CreativeWork schema.
#[derive(Debug, Clone, Default)]
pub struct ContentInfo {
    pub title: String,
    pub description: Option<String>,
    /// Root-relative URL path of the content.
    pub path: String,
    pub published: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// Build the Organization schema from the global site config.
///
/// Relative logo paths are resolved to absolute against the base URL, and
/// a configured twitter handle contributes a `sameAs` profile link.
pub fn organization_schema(config: &SiteConfig) -> Organization {
    let base = config.site.base_url();

    let same_as = config
        .site
        .twitter
        .as_deref()
        .map(str::trim)
        .filter(|handle| !handle.is_empty())
        .map(|handle| {
            let handle = handle.trim_start_matches('@');
            vec![format!("https://twitter.com/{handle}")]
        });

    Organization {
        context: Some(SCHEMA_CONTEXT),
        schema_type: "Organization",
        name: config.site.title.clone(),
        url: format!("{base}/"),
        logo: config
            .site
            .logo
            .as_deref()
            .map(|logo| absolute_url(base, logo)),
        description: Some(config.site.description.clone()),
        same_as,
    }
}

/// Build a CreativeWork schema for one piece of content.
///
/// The creator is the site Organization without its own `@context`.
pub fn creative_work_schema(config: &SiteConfig, content: &ContentInfo) -> CreativeWork {
    let base = config.site.base_url();

    let mut creator = organization_schema(config);
    creator.context = None;

    CreativeWork {
        context: SCHEMA_CONTEXT,
        schema_type: "CreativeWork",
        headline: content.title.clone(),
        description: content.description.clone(),
        url: absolute_url(base, &content.path),
        creator,
        date_published: content.published.map(|d| d.to_rfc3339()),
        date_modified: content.modified.map(|d| d.to_rfc3339()),
    }
}

/// Serialize schemas for a JSON-LD script tag.
///
/// A single schema is serialized directly, several as a JSON array.
/// Degrades to `""` on serialization failure (logged, never propagated).
pub fn render_json_ld(schemas: &[Schema]) -> String {
    let rendered = match schemas {
        [] => return String::new(),
        [single] => serde_json::to_string(single),
        many => serde_json::to_string(many),
    };

    match rendered {
        Ok(json) => json,
        Err(err) => {
            log!("schema"; "failed to serialize JSON-LD: {err}");
            String::new()
        }
    }
}

/// Resolve a possibly-relative path to an absolute URL against `base`.
pub fn absolute_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{base}/{}", path.trim_start_matches('/'))
}
