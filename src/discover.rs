//! File-system page discovery.
//!
//! Walks the published site root and records a route for every directory
//! containing a route-marker file. Discovery is rebuilt on every call and
//! never persisted; any I/O error degrades to "fewer discovered pages"
//! instead of failing the caller.

use crate::log;
use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};
use walkdir::WalkDir;

/// File names that mark their directory as a routable page.
pub const ROUTE_MARKERS: &[&str] = &["index.html", "index.htm", "index.md"];

/// File name that marks a programmatic (non-page) route.
pub const API_MARKER: &str = "route.toml";

/// Directory names skipped during the walk (build artifacts, VCS, tests).
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "dist",
    "coverage",
    "tests",
    "__tests__",
];

/// Path prefixes excluded from public sitemap/coverage consideration.
pub const PRIVATE_PREFIXES: &[&str] = &["/api", "/admin", "/_", "/private", "/drafts"];

/// Classification of a discovered route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A regular content page.
    Page,
    /// An API endpoint (under `/api`).
    Api,
    /// A programmatic route marked by a `route.toml` file.
    Route,
}

/// A route found on disk. Ephemeral; rebuilt on each discovery call.
#[derive(Debug, Clone)]
pub struct DiscoveredPage {
    /// Root-relative URL path, e.g. `/about`.
    pub path: String,
    /// The marker file that produced this route.
    pub file_path: PathBuf,
    /// Whether the marker is a page marker (as opposed to `route.toml`).
    pub is_route: bool,
    /// Marker file mtime, when available.
    pub last_modified: Option<SystemTime>,
    pub kind: PageKind,
}

impl DiscoveredPage {
    /// Whether this page belongs in a public sitemap.
    pub fn is_public(&self) -> bool {
        self.kind == PageKind::Page && !is_private_path(&self.path)
    }
}

/// Check whether a URL path is private by prefix match.
pub fn is_private_path(path: &str) -> bool {
    PRIVATE_PREFIXES.iter().any(|prefix| {
        // The `/_` prefix matches any underscore-prefixed top-level segment
        if *prefix == "/_" {
            return path.starts_with("/_");
        }
        path == *prefix || path.starts_with(&format!("{prefix}/"))
    })
}

/// Recursively discover routable pages under `root`.
///
/// Skips [`SKIP_DIRS`] and any dot-directory. I/O errors are logged and
/// the affected subtree contributes nothing; the function itself never
/// fails.
pub fn discover_pages(root: &Path) -> Vec<DiscoveredPage> {
    if !root.is_dir() {
        log!("discover"; "root {} is not a directory, skipping", root.display());
        return Vec::new();
    }

    let mut pages = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !should_skip(entry.file_name().to_string_lossy().as_ref(), entry.depth()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log!("discover"; "walk error: {err}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let is_page_marker = ROUTE_MARKERS.contains(&file_name.as_ref());
        let is_api_marker = file_name == API_MARKER;
        if !is_page_marker && !is_api_marker {
            continue;
        }

        let Some(url_path) = url_path_for(root, entry.path()) else {
            continue;
        };

        let kind = if is_api_marker {
            PageKind::Route
        } else if url_path == "/api" || url_path.starts_with("/api/") {
            PageKind::Api
        } else {
            PageKind::Page
        };

        let last_modified = entry.metadata().ok().and_then(|m| m.modified().ok());

        pages.push(DiscoveredPage {
            path: url_path,
            file_path: entry.path().to_path_buf(),
            is_route: is_page_marker,
            last_modified,
            kind,
        });
    }

    pages.sort_by(|a, b| a.path.cmp(&b.path));
    pages
}

/// Whether a directory entry should be pruned from the walk.
fn should_skip(name: &str, depth: usize) -> bool {
    // Never prune the root itself (its name may legitimately start with '.')
    if depth == 0 {
        return false;
    }
    name.starts_with('.') || SKIP_DIRS.contains(&name)
}

/// URL path of the directory containing `marker`, relative to `root`.
fn url_path_for(root: &Path, marker: &Path) -> Option<String> {
    let dir = marker.parent()?;
    let relative = dir.strip_prefix(root).ok()?;

    if relative.as_os_str().is_empty() {
        return Some("/".to_string());
    }

    let mut path = String::new();
    for component in relative.components() {
        path.push('/');
        path.push_str(&component.as_os_str().to_string_lossy());
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_discover_basic_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("index.html"));
        touch(&root.join("about/index.html"));
        touch(&root.join("work/cases/index.md"));
        touch(&root.join("styles/main.css")); // not a marker

        let pages = discover_pages(root);
        let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();

        assert_eq!(paths, vec!["/", "/about", "/work/cases"]);
        assert!(pages.iter().all(|p| p.kind == PageKind::Page));
        assert!(pages.iter().all(|p| p.is_route));
    }

    #[test]
    fn test_discover_skips_dot_and_listed_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("index.html"));
        touch(&root.join(".git/index.html"));
        touch(&root.join("node_modules/pkg/index.html"));
        touch(&root.join("tests/index.html"));

        let pages = discover_pages(root);
        let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();

        assert_eq!(paths, vec!["/"]);
    }

    #[test]
    fn test_discover_classifies_api_and_routes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("api/contact/index.html"));
        touch(&root.join("feeds/route.toml"));

        let pages = discover_pages(root);

        let api = pages.iter().find(|p| p.path == "/api/contact").unwrap();
        assert_eq!(api.kind, PageKind::Api);
        assert!(!api.is_public());

        let route = pages.iter().find(|p| p.path == "/feeds").unwrap();
        assert_eq!(route.kind, PageKind::Route);
        assert!(!route.is_public());
    }

    #[test]
    fn test_discover_missing_root_returns_empty() {
        let pages = discover_pages(Path::new("/nonexistent/sitemeta-test"));
        assert!(pages.is_empty());
    }

    #[test]
    fn test_discover_records_mtime() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("index.html"));

        let pages = discover_pages(dir.path());
        assert!(pages[0].last_modified.is_some());
    }

    #[test]
    fn test_is_private_path() {
        assert!(is_private_path("/api"));
        assert!(is_private_path("/api/contact"));
        assert!(is_private_path("/admin"));
        assert!(is_private_path("/admin/users"));
        assert!(is_private_path("/_next"));
        assert!(is_private_path("/private/drafts"));

        assert!(!is_private_path("/"));
        assert!(!is_private_path("/about"));
        assert!(!is_private_path("/apidocs"));
        assert!(!is_private_path("/administration-guide"));
    }
}
