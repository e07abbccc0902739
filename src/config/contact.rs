//! `[contact]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[contact]` section in sitemeta.toml - contact API settings.
///
/// # Example
/// ```toml
/// [contact]
/// enable = true
/// recipient = "hello@acme.example"
/// limit = 5
/// window_secs = 900
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContactConfig {
    /// Enable the `/api/contact` endpoint.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Recipient address passed along to the delivery provider.
    #[serde(default)]
    pub recipient: Option<String>,

    /// Max requests per client IP within the window.
    #[serde(default = "defaults::contact::limit")]
    #[educe(Default = defaults::contact::limit())]
    pub limit: u32,

    /// Rate-limit window in seconds.
    #[serde(default = "defaults::contact::window_secs")]
    #[educe(Default = defaults::contact::window_secs())]
    pub window_secs: u64,

    /// Environment variable holding the provider credential.
    /// The endpoint responds 500 when it is unset.
    #[serde(default = "defaults::contact::api_key_env")]
    #[educe(Default = defaults::contact::api_key_env())]
    pub api_key_env: String,

    /// Outbox file (JSON lines), relative to the project root.
    #[serde(default = "defaults::contact::outbox")]
    #[educe(Default = defaults::contact::outbox())]
    pub outbox: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_contact_config_defaults() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(config.contact.enable);
        assert_eq!(config.contact.limit, 5);
        assert_eq!(config.contact.window_secs, 900);
        assert_eq!(config.contact.api_key_env, "SITEMETA_CONTACT_KEY");
    }

    #[test]
    fn test_contact_config_full() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test"

            [contact]
            enable = false
            recipient = "hello@acme.example"
            limit = 10
            window_secs = 60
            api_key_env = "MAIL_KEY"
            outbox = "var/outbox.jsonl"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(!config.contact.enable);
        assert_eq!(config.contact.recipient, Some("hello@acme.example".into()));
        assert_eq!(config.contact.limit, 10);
        assert_eq!(config.contact.window_secs, 60);
        assert_eq!(config.contact.api_key_env, "MAIL_KEY");
    }
}
