//! `[analytics]` section configuration.

use serde::{Deserialize, Serialize};

/// `[analytics]` section in sitemeta.toml.
///
/// The pipeline only validates this section; script injection is handled
/// by the site templates themselves.
///
/// # Example
/// ```toml
/// [analytics]
/// enable = true
/// measurement_id = "G-XXXXXXXXXX"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Whether analytics is expected to be wired up.
    #[serde(default)]
    pub enable: bool,

    /// Measurement id ("G-..." or "UA-...").
    #[serde(default)]
    pub measurement_id: Option<String>,
}
