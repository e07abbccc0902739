//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

#[allow(unused)]
pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    use std::path::PathBuf;

    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }

    pub fn root() -> PathBuf {
        "site".into()
    }

    pub fn theme_color() -> String {
        "#ffffff".into()
    }

    pub fn background_color() -> String {
        "#ffffff".into()
    }

    pub fn favicon() -> PathBuf {
        "assets/favicon.png".into()
    }
}

// ============================================================================
// [sitemap] Section Defaults
// ============================================================================

pub mod sitemap {
    use std::path::PathBuf;

    pub fn path() -> PathBuf {
        "sitemap.xml".into()
    }

    pub fn max_urls() -> usize {
        50_000
    }

    pub fn max_size() -> String {
        "50MB".into()
    }
}

// ============================================================================
// [robots] Section Defaults
// ============================================================================

pub mod robots {
    pub fn user_agent() -> String {
        "*".into()
    }
}

// ============================================================================
// [contact] Section Defaults
// ============================================================================

pub mod contact {
    use std::path::PathBuf;

    pub fn limit() -> u32 {
        5
    }

    pub fn window_secs() -> u64 {
        900
    }

    pub fn api_key_env() -> String {
        "SITEMETA_CONTACT_KEY".into()
    }

    pub fn outbox() -> PathBuf {
        "outbox.jsonl".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5280
    }
}
