//! Web app manifest generation.
//!
//! Builds manifest.json from the `[site]` section plus fixed icon and
//! shortcut lists.

use crate::config::SiteConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: &'static str,
    pub display: &'static str,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
    pub shortcuts: Vec<ManifestShortcut>,
}

#[derive(Debug, Serialize)]
pub struct ManifestIcon {
    pub src: &'static str,
    pub sizes: &'static str,
    #[serde(rename = "type")]
    pub mime: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ManifestShortcut {
    pub name: &'static str,
    pub url: &'static str,
}

/// Fixed icon list referenced by the manifest.
const ICONS: &[ManifestIcon] = &[
    ManifestIcon {
        src: "/icons/icon-192.png",
        sizes: "192x192",
        mime: "image/png",
        purpose: None,
    },
    ManifestIcon {
        src: "/icons/icon-512.png",
        sizes: "512x512",
        mime: "image/png",
        purpose: None,
    },
    ManifestIcon {
        src: "/icons/icon-maskable.png",
        sizes: "512x512",
        mime: "image/png",
        purpose: Some("maskable"),
    },
];

/// Fixed shortcut list referenced by the manifest.
const SHORTCUTS: &[ManifestShortcut] = &[
    ManifestShortcut {
        name: "Our Work",
        url: "/work",
    },
    ManifestShortcut {
        name: "Contact",
        url: "/contact",
    },
];

/// Build the manifest from the site config.
pub fn build_manifest(config: &SiteConfig) -> Manifest {
    Manifest {
        name: config.site.title.clone(),
        short_name: config.site.title.clone(),
        description: config.site.description.clone(),
        start_url: "/",
        display: "standalone",
        background_color: config.site.background_color.clone(),
        theme_color: config.site.theme_color.clone(),
        icons: ICONS
            .iter()
            .map(|icon| ManifestIcon {
                src: icon.src,
                sizes: icon.sizes,
                mime: icon.mime,
                purpose: icon.purpose,
            })
            .collect(),
        shortcuts: SHORTCUTS
            .iter()
            .map(|shortcut| ManifestShortcut {
                name: shortcut.name,
                url: shortcut.url,
            })
            .collect(),
    }
}

/// Serialize the manifest to pretty JSON.
pub fn build_manifest_json(config: &SiteConfig) -> Result<String> {
    serde_json::to_string_pretty(&build_manifest(config)).context("Failed to serialize manifest")
}

/// Write manifest.json into the site root.
pub fn write_manifest(config: &SiteConfig) -> Result<()> {
    let path = config.site.root.join("manifest.json");
    fs::write(&path, build_manifest_json(config)?)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;

    crate::log!("manifest"; "manifest.json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        toml::from_str(
            r##"
            [site]
            title = "Acme Media"
            description = "Stories that move"
            url = "https://acme.example"
            theme_color = "#101010"
        "##,
        )
        .unwrap()
    }

    #[test]
    fn test_manifest_fields() {
        let manifest = build_manifest(&config());

        assert_eq!(manifest.name, "Acme Media");
        assert_eq!(manifest.start_url, "/");
        assert_eq!(manifest.display, "standalone");
        assert_eq!(manifest.theme_color, "#101010");
        assert_eq!(manifest.icons.len(), 3);
        assert_eq!(manifest.shortcuts.len(), 2);
    }

    #[test]
    fn test_manifest_json_roundtrip() {
        let json = build_manifest_json(&config()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "Acme Media");
        assert_eq!(value["icons"][0]["type"], "image/png");
        assert_eq!(value["icons"][2]["purpose"], "maskable");
        assert_eq!(value["shortcuts"][1]["url"], "/contact");
    }
}
