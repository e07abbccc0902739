//! Complete-configuration validation and report rendering.
//!
//! Unions every facet result, computes page coverage between the static
//! config and file-system discovery, and renders the outcome for humans
//! or as JSON. The CLI is the only place validation affects an exit code.

use super::{ValidationResult, facets};
use crate::{
    config::SiteConfig,
    discover::discover_pages,
    generator::sitemap::Sitemap,
    log,
    schema::organization_schema,
};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::process::ExitCode;

/// One named facet outcome.
#[derive(Debug, Clone, Serialize)]
pub struct FacetReport {
    pub name: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Page coverage between the static config and discovery.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub configured: usize,
    pub discovered: usize,
    /// Discovered on disk but absent from `[pages]`.
    pub missing_from_config: Vec<String>,
    /// Present in `[pages]` but not found on disk.
    pub orphaned_in_config: Vec<String>,
}

/// Aggregated validation outcome for the whole configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub facets: Vec<FacetReport>,
    pub coverage: CoverageReport,
    pub summary: ValidationResult,
}

impl SiteReport {
    pub fn is_valid(&self) -> bool {
        self.summary.is_valid
    }

    pub fn has_warnings(&self) -> bool {
        self.summary.has_warnings()
    }
}

/// Validate the complete configuration.
///
/// Runs every facet validator, builds the sitemap to check its entries
/// and size guard, and computes coverage sets. Never fails; discovery
/// errors degrade to fewer discovered pages.
pub fn validate_site(config: &SiteConfig) -> SiteReport {
    let mut facet_reports = Vec::new();

    facet_reports.push(FacetReport {
        name: "site".into(),
        result: facets::validate_site_config(&config.site),
    });
    facet_reports.push(FacetReport {
        name: "analytics".into(),
        result: facets::validate_analytics(&config.analytics),
    });
    facet_reports.push(FacetReport {
        name: "robots".into(),
        result: facets::validate_robots(&config.robots),
    });
    facet_reports.push(FacetReport {
        name: "schema".into(),
        result: facets::validate_schema(&organization_schema(config)),
    });

    for (path, page) in &config.pages {
        facet_reports.push(FacetReport {
            name: format!("page {path}"),
            result: facets::validate_page(path, page),
        });
    }

    let discovered = discover_pages(&config.site.root);

    facet_reports.push(FacetReport {
        name: "sitemap".into(),
        result: validate_sitemap_facet(config, &discovered),
    });

    let coverage = coverage_report(config, &discovered);

    let mut summary = ValidationResult::valid();
    for facet in &facet_reports {
        summary.merge(facet.result.clone());
    }

    SiteReport {
        facets: facet_reports,
        coverage,
        summary,
    }
}

/// Build the sitemap and validate its entries plus the size guard.
fn validate_sitemap_facet(
    config: &SiteConfig,
    discovered: &[crate::discover::DiscoveredPage],
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !config.sitemap.enable {
        return result;
    }

    let sitemap = match Sitemap::build(config, discovered) {
        Ok(sitemap) => sitemap,
        Err(err) => {
            result.error(format!("sitemap generation failed: {err}"));
            return result;
        }
    };

    for entry in sitemap.entries() {
        result.merge(facets::validate_sitemap_entry(entry));
    }

    let count = sitemap.len();
    let xml = sitemap.into_xml();
    result.merge(facets::validate_sitemap_size(
        xml.len(),
        count,
        config.sitemap_max_bytes(),
        config.sitemap.max_urls,
    ));

    result
}

/// Coverage by set difference between configured keys and discovered
/// public paths.
fn coverage_report(
    config: &SiteConfig,
    discovered: &[crate::discover::DiscoveredPage],
) -> CoverageReport {
    let configured: BTreeSet<&str> = config.pages.keys().map(String::as_str).collect();
    let public: BTreeSet<&str> = discovered
        .iter()
        .filter(|p| p.is_public())
        .map(|p| p.path.as_str())
        .collect();

    CoverageReport {
        configured: configured.len(),
        discovered: public.len(),
        missing_from_config: public
            .difference(&configured)
            .map(ToString::to_string)
            .collect(),
        orphaned_in_config: configured
            .difference(&public)
            .map(ToString::to_string)
            .collect(),
    }
}

// ============================================================================
// CLI Entry Point
// ============================================================================

/// Run validation for the CLI: render the report and map it to an exit
/// code (0 valid, 1 on errors or, with `fail_on_warnings`, any warning).
pub fn run_validation(
    config: &SiteConfig,
    verbose: bool,
    fail_on_warnings: bool,
    json: bool,
) -> Result<ExitCode> {
    let report = validate_site(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_human(&report, verbose);
    }

    let failed = !report.is_valid() || (fail_on_warnings && report.has_warnings());
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn render_human(report: &SiteReport, verbose: bool) {
    for facet in &report.facets {
        if facet.result.errors.is_empty() && facet.result.warnings.is_empty() {
            if verbose {
                log!("validate"; "{}: ok", facet.name);
            }
            continue;
        }
        for error in &facet.result.errors {
            log!("error"; "{}: {error}", facet.name);
        }
        for warning in &facet.result.warnings {
            log!("validate"; "{}: warning: {warning}", facet.name);
        }
    }

    let coverage = &report.coverage;
    log!(
        "validate";
        "coverage: {} configured, {} discovered",
        coverage.configured,
        coverage.discovered
    );
    for path in &coverage.missing_from_config {
        log!("validate"; "discovered page without config entry: {path}");
    }
    for path in &coverage.orphaned_in_config {
        log!("validate"; "configured page not found on disk: {path}");
    }

    let summary = &report.summary;
    log!(
        "validate";
        "{} error(s), {} warning(s)",
        summary.errors.len(),
        summary.warnings.len()
    );
}
