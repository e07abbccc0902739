//! Output generators for the SEO artifacts (sitemap.xml, robots.txt,
//! manifest.json).

pub mod manifest;
pub mod robots;
pub mod sitemap;

use crate::config::SiteConfig;
use anyhow::Result;

/// Generate all SEO artifacts into the site root.
///
/// Sitemap and robots generation are independent and run in parallel.
pub fn generate_outputs(config: &'static SiteConfig) -> Result<()> {
    let (sitemap_result, robots_result) = rayon::join(
        || sitemap::write_sitemap(config),
        || robots::write_robots_txt(config),
    );

    sitemap_result?;
    robots_result?;
    manifest::write_manifest(config)?;
    Ok(())
}
