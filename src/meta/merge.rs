//! Metadata merging.
//!
//! Combines caller-supplied overrides with a page's base configuration.
//! Top-level fields are override-wins-if-present; object-valued sections
//! (open_graph, twitter, robots) merge shallowly so fields absent from the
//! override fall back individually.

use crate::config::{OpenGraphConfig, PageConfig, RobotsMeta, SitemapHints, TwitterConfig};
use serde::{Deserialize, Serialize};

/// Partial metadata supplied by a caller to override a page's base config.
///
/// Every field is optional; absent fields pass the fallback through
/// unchanged. There is no error path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataOverrides {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub open_graph: Option<OpenGraphConfig>,
    #[serde(default)]
    pub twitter: Option<TwitterConfig>,
    #[serde(default)]
    pub robots: Option<RobotsMeta>,
    #[serde(default)]
    pub sitemap: Option<SitemapHints>,
}

/// Merge `overrides` over `fallback`, field by field.
///
/// Scalar fields defined in `overrides` win. For object-valued fields the
/// merge is shallow: sub-fields present in the override replace the
/// fallback's, sub-fields absent fall back individually.
pub fn merge_metadata(overrides: &MetadataOverrides, fallback: &PageConfig) -> PageConfig {
    PageConfig {
        title: overrides.title.clone().unwrap_or_else(|| fallback.title.clone()),
        description: overrides
            .description
            .clone()
            .unwrap_or_else(|| fallback.description.clone()),
        canonical: overrides
            .canonical
            .clone()
            .or_else(|| fallback.canonical.clone()),
        open_graph: merge_section(
            overrides.open_graph.as_ref(),
            fallback.open_graph.as_ref(),
            merge_open_graph,
        ),
        twitter: merge_section(
            overrides.twitter.as_ref(),
            fallback.twitter.as_ref(),
            merge_twitter,
        ),
        robots: merge_section(
            overrides.robots.as_ref(),
            fallback.robots.as_ref(),
            merge_robots,
        ),
        sitemap: merge_section(
            overrides.sitemap.as_ref(),
            fallback.sitemap.as_ref(),
            merge_sitemap_hints,
        ),
    }
}

/// Merge an optional section: both present → shallow merge, one present →
/// that one, neither → `None`.
fn merge_section<T: Clone>(
    primary: Option<&T>,
    fallback: Option<&T>,
    merge: impl Fn(&T, &T) -> T,
) -> Option<T> {
    match (primary, fallback) {
        (Some(p), Some(f)) => Some(merge(p, f)),
        (Some(p), None) => Some(p.clone()),
        (None, Some(f)) => Some(f.clone()),
        (None, None) => None,
    }
}

fn merge_open_graph(primary: &OpenGraphConfig, fallback: &OpenGraphConfig) -> OpenGraphConfig {
    OpenGraphConfig {
        title: primary.title.clone().or_else(|| fallback.title.clone()),
        description: primary
            .description
            .clone()
            .or_else(|| fallback.description.clone()),
        image: primary.image.clone().or_else(|| fallback.image.clone()),
        og_type: primary.og_type.clone().or_else(|| fallback.og_type.clone()),
        site_name: primary
            .site_name
            .clone()
            .or_else(|| fallback.site_name.clone()),
    }
}

fn merge_twitter(primary: &TwitterConfig, fallback: &TwitterConfig) -> TwitterConfig {
    TwitterConfig {
        title: primary.title.clone().or_else(|| fallback.title.clone()),
        description: primary
            .description
            .clone()
            .or_else(|| fallback.description.clone()),
        image: primary.image.clone().or_else(|| fallback.image.clone()),
        card: primary.card.clone().or_else(|| fallback.card.clone()),
        site: primary.site.clone().or_else(|| fallback.site.clone()),
    }
}

fn merge_robots(primary: &RobotsMeta, fallback: &RobotsMeta) -> RobotsMeta {
    RobotsMeta {
        index: primary.index.or(fallback.index),
        follow: primary.follow.or(fallback.follow),
        max_snippet: primary.max_snippet.or(fallback.max_snippet),
    }
}

fn merge_sitemap_hints(primary: &SitemapHints, fallback: &SitemapHints) -> SitemapHints {
    SitemapHints {
        changefreq: primary.changefreq.or(fallback.changefreq),
        priority: primary.priority.or(fallback.priority),
        lastmod: primary.lastmod.clone().or_else(|| fallback.lastmod.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> PageConfig {
        PageConfig {
            title: "Home".into(),
            description: "The homepage".into(),
            canonical: Some("https://acme.example/".into()),
            open_graph: Some(OpenGraphConfig {
                title: Some("Acme".into()),
                description: Some("Stories".into()),
                image: Some("/og.png".into()),
                og_type: Some("website".into()),
                site_name: Some("Acme Media".into()),
            }),
            twitter: Some(TwitterConfig {
                title: Some("Acme".into()),
                card: Some("summary".into()),
                ..Default::default()
            }),
            robots: None,
            sitemap: None,
        }
    }

    #[test]
    fn test_merge_empty_overrides_passes_fallback_through() {
        let merged = merge_metadata(&MetadataOverrides::default(), &fallback());
        assert_eq!(merged, fallback());
    }

    #[test]
    fn test_merge_scalar_override_wins() {
        let overrides = MetadataOverrides {
            title: Some("X".into()),
            ..Default::default()
        };
        let merged = merge_metadata(&overrides, &fallback());

        // title replaced, everything else untouched
        assert_eq!(merged.title, "X");
        assert_eq!(merged.description, "The homepage");
        assert_eq!(merged.canonical, fallback().canonical);
        assert_eq!(merged.open_graph, fallback().open_graph);
    }

    #[test]
    fn test_merge_open_graph_is_shallow() {
        let overrides = MetadataOverrides {
            open_graph: Some(OpenGraphConfig {
                title: Some("Y".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge_metadata(&overrides, &fallback());

        let og = merged.open_graph.unwrap();
        // overridden sub-field replaced
        assert_eq!(og.title, Some("Y".to_string()));
        // absent sub-fields fall back individually
        assert_eq!(og.description, Some("Stories".to_string()));
        assert_eq!(og.image, Some("/og.png".to_string()));
        assert_eq!(og.site_name, Some("Acme Media".to_string()));
    }

    #[test]
    fn test_merge_section_only_in_overrides() {
        let overrides = MetadataOverrides {
            robots: Some(RobotsMeta {
                index: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge_metadata(&overrides, &fallback());

        assert_eq!(merged.robots.unwrap().index, Some(false));
    }

    #[test]
    fn test_merge_twitter_shallow() {
        let overrides = MetadataOverrides {
            twitter: Some(TwitterConfig {
                card: Some("summary_large_image".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge_metadata(&overrides, &fallback());

        let twitter = merged.twitter.unwrap();
        assert_eq!(twitter.card, Some("summary_large_image".to_string()));
        assert_eq!(twitter.title, Some("Acme".to_string()));
    }

    #[test]
    fn test_merge_sitemap_hints() {
        use crate::config::ChangeFreq;

        let base = PageConfig {
            sitemap: Some(SitemapHints {
                changefreq: Some(ChangeFreq::Monthly),
                priority: Some(0.5),
                lastmod: Some("2025-01-01".into()),
            }),
            ..fallback()
        };
        let overrides = MetadataOverrides {
            sitemap: Some(SitemapHints {
                priority: Some(0.9),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge_metadata(&overrides, &base);

        let hints = merged.sitemap.unwrap();
        assert_eq!(hints.priority, Some(0.9));
        assert_eq!(hints.changefreq, Some(ChangeFreq::Monthly));
        assert_eq!(hints.lastmod, Some("2025-01-01".to_string()));
    }
}
