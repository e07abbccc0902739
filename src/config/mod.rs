//! Site configuration management for `sitemeta.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                         |
//! |--------------|-------------------------------------------------|
//! | `[site]`     | Global site metadata (title, url, logo, ...)    |
//! | `[pages]`    | Per-path page metadata (title, OG, sitemap)     |
//! | `[analytics]`| Analytics measurement id                        |
//! | `[sitemap]`  | Sitemap generation settings                     |
//! | `[robots]`   | robots.txt directives                           |
//! | `[contact]`  | Contact API limits and provider settings        |
//! | `[serve]`    | HTTP server (port, interface)                   |
//! | `[extra]`    | User-defined custom fields                      |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Acme Media"
//! description = "Stories that move"
//! url = "https://acme.example"
//!
//! [pages."/"]
//! title = "Acme Media"
//! description = "Stories that move"
//!
//! [robots]
//! disallow = ["/admin"]
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod analytics;
mod contact;
pub mod defaults;
mod error;
mod pages;
mod robots;
mod serve;
mod site;
mod sitemap;

// Re-export public types used by other modules
pub use analytics::AnalyticsConfig;
pub use contact::ContactConfig;
pub use error::ConfigError;
pub use pages::{
    ChangeFreq, OpenGraphConfig, PageConfig, RobotsMeta, SitemapHints, TwitterConfig,
    is_root_relative,
};
pub use robots::RobotsConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
pub use sitemap::SitemapGenConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B (bytes), KB (kilobytes), MB (megabytes).
/// Case-insensitive for the suffix.
///
/// # Examples
/// ```ignore
/// parse_size_string("20KB") // → 20480
/// parse_size_string("50MB") // → 52428800
/// parse_size_string("100")  // → 100 (defaults to bytes)
/// ```
fn parse_size_string(s: &str) -> usize {
    let s = s.to_uppercase();
    let (multiplier, suffix_len) = if s.ends_with("MB") {
        (1024 * 1024, 2)
    } else if s.ends_with("KB") {
        (1024, 2)
    } else if s.ends_with("B") {
        (1, 1)
    } else {
        (1, 0)
    };
    let value: usize = s[..s.len() - suffix_len].trim().parse().unwrap_or(0);
    multiplier * value
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing sitemeta.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Global site information
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Per-path page metadata, keyed by root-relative URL path
    #[serde(default)]
    pub pages: BTreeMap<String, PageConfig>,

    /// Analytics settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Sitemap generation settings
    #[serde(default)]
    pub sitemap: SitemapGenConfig,

    /// robots.txt directives
    #[serde(default)]
    pub robots: RobotsConfig,

    /// Contact API settings
    #[serde(default)]
    pub contact: ContactConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Sitemap size limit in bytes, parsed from `[sitemap].max_size`.
    pub fn sitemap_max_bytes(&self) -> usize {
        parse_size_string(&self.sitemap.max_size)
    }

    /// Absolute URL of the generated sitemap, e.g.
    /// `https://acme.example/sitemap.xml`.
    pub fn sitemap_url(&self) -> String {
        format!(
            "{}/{}",
            self.site.base_url(),
            self.sitemap.path.to_string_lossy()
        )
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        let root = Self::normalize_path(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.site.root = Self::normalize_path(&root.join(&self.site.root));
        self.site.favicon = Self::normalize_path(&root.join(&self.site.favicon));
        self.contact.outbox = Self::normalize_path(&root.join(&self.contact.outbox));
        self.root = root;

        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate the structural configuration invariants that make the rest
    /// of the pipeline unusable when broken. Softer correctness checks
    /// (lengths, recommended bounds, coverage) live in `validate::facets`
    /// and are reported as data instead.
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if let Some(base_url) = &self.site.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if self.sitemap.enable && self.site.url.is_none() {
            bail!("[site.url] is required for sitemap generation");
        }

        let valid_size_suffixes = ["B", "KB", "MB"];
        if !valid_size_suffixes
            .iter()
            .any(|s| self.sitemap.max_size.to_uppercase().ends_with(s))
        {
            bail!(ConfigError::Validation(
                "[sitemap.max_size] must end with B, KB, or MB".into()
            ));
        }

        if self.contact.limit == 0 || self.contact.window_secs == 0 {
            bail!(ConfigError::Validation(
                "[contact] limit and window_secs must be non-zero".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
