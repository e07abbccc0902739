//! HTTP server for the SEO endpoints and static site files.
//!
//! Built on `tiny_http`:
//!
//! - `GET /sitemap.xml`, `/robots.txt`, `/manifest.json` generated per
//!   request, degrading to a fallback body instead of an error status
//! - `GET /api/favicon?type=<name>` serving the configured favicon file
//! - `POST /api/contact` with validation and per-client rate limiting
//! - Static file serving from the site root with `index.html` resolution
//! - Graceful shutdown on Ctrl+C
//!
//! Generation faults never surface as 5xx on the crawler-facing routes;
//! crawlers that receive errors may drop pages from the index, so those
//! routes respond 200 with a minimal body and a short cache lifetime.

use crate::{
    config::SiteConfig,
    contact::{self, ContactForm, RateLimiter},
    generator::{
        manifest::build_manifest_json,
        robots::{build_robots_txt, fallback_robots_txt},
        sitemap::{build_sitemap_xml, fallback_sitemap_xml},
    },
    log,
    meta::{MetadataOverrides, render_head_tags, resolve_metadata},
};
use anyhow::{Context, Result};
use serde_json::json;
use std::{
    fs,
    net::SocketAddr,
    path::Path,
    sync::Arc,
    time::Duration,
};
use tiny_http::{Header, Method, Request, Response, Server};

// ============================================================================
// Constants
// ============================================================================

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Purge expired rate-limit windows every this many requests.
const RATE_LIMIT_PURGE_INTERVAL: u64 = 256;

/// Cache lifetimes in seconds (normal / degraded).
const SITEMAP_CACHE: u32 = 3600;
const SITEMAP_CACHE_FALLBACK: u32 = 300;
const ROBOTS_CACHE: u32 = 86400;
const ROBOTS_CACHE_FALLBACK: u32 = 3600;
const MANIFEST_CACHE: u32 = 3600;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the HTTP server.
///
/// Binds to the configured interface and port (with auto-retry on port
/// conflict), installs a Ctrl+C handler, then blocks in the request loop
/// until shutdown.
pub fn serve_site(config: &'static SiteConfig) -> Result<()> {
    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let base_port = config.serve.port;

    let (server, addr) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    let limiter = RateLimiter::new();
    let mut request_count: u64 = 0;

    for request in server.incoming_requests() {
        request_count += 1;
        if request_count % RATE_LIMIT_PURGE_INTERVAL == 0 {
            limiter.purge_expired();
        }

        if let Err(e) = handle_request(request, config, &limiter) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                continue;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Routing
// ============================================================================

/// Route a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig, limiter: &RateLimiter) -> Result<()> {
    // Decode URL-encoded characters (e.g., %20 → space)
    let url = urlencoding::decode(request.url())
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url.as_str(), None),
    };
    let method = request.method().clone();

    match (method, path) {
        (Method::Get, "/sitemap.xml") => serve_sitemap(request, config),
        (Method::Get, "/robots.txt") => serve_robots(request, config),
        (Method::Get, "/manifest.json") => serve_manifest(request, config),
        (Method::Get, "/api/favicon") => serve_favicon(request, config, query),
        (Method::Get, "/api/meta") => serve_meta(request, config, query),
        (Method::Post, "/api/contact") => serve_contact(request, config, limiter),
        (Method::Get, _) => serve_static(request, config, path),
        _ => respond_json(request, 405, &json!({"error": "method not allowed"})),
    }
}

// ============================================================================
// SEO Endpoints
// ============================================================================

/// `GET /sitemap.xml`. Always 200; a generation fault degrades to the
/// one-entry fallback body with a short cache lifetime.
fn serve_sitemap(request: Request, config: &SiteConfig) -> Result<()> {
    let (body, max_age) = match build_sitemap_xml(config) {
        Ok((xml, _count)) => (xml, SITEMAP_CACHE),
        Err(e) => {
            log!("error"; "sitemap generation failed, serving fallback: {e}");
            (fallback_sitemap_xml(config), SITEMAP_CACHE_FALLBACK)
        }
    };

    let response = Response::from_string(body)
        .with_header(header("Content-Type", "application/xml; charset=utf-8"))
        .with_header(cache_control(max_age))
        .with_header(header("X-Robots-Tag", "noindex"));
    request.respond(response)?;
    Ok(())
}

/// `GET /robots.txt`. The body only fails to build when the sitemap URL
/// cannot be resolved; then a permissive fallback is served.
fn serve_robots(request: Request, config: &SiteConfig) -> Result<()> {
    let (body, max_age) = if config.site.url.is_some() {
        (build_robots_txt(config), ROBOTS_CACHE)
    } else {
        log!("error"; "[site.url] missing, serving fallback robots.txt");
        (fallback_robots_txt(config), ROBOTS_CACHE_FALLBACK)
    };

    let response = Response::from_string(body)
        .with_header(header("Content-Type", "text/plain; charset=utf-8"))
        .with_header(cache_control(max_age));
    request.respond(response)?;
    Ok(())
}

/// `GET /manifest.json`.
fn serve_manifest(request: Request, config: &SiteConfig) -> Result<()> {
    let body = match build_manifest_json(config) {
        Ok(json) => json,
        Err(e) => {
            log!("error"; "manifest serialization failed: {e}");
            return respond_json(request, 500, &json!({"error": "manifest unavailable"}));
        }
    };

    let response = Response::from_string(body)
        .with_header(header("Content-Type", "application/manifest+json"))
        .with_header(cache_control(MANIFEST_CACHE));
    request.respond(response)?;
    Ok(())
}

/// MIME type for a known favicon `type` query value.
///
/// The table is fixed; the same source file is served under every type,
/// only the declared content type differs.
fn favicon_mime(kind: &str) -> Option<&'static str> {
    Some(match kind {
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "png" | "apple-touch-icon" | "icon-16" | "icon-32" | "icon-192" | "icon-512"
        | "maskable" => "image/png",
        _ => return None,
    })
}

/// `GET /api/favicon?type=<name>`.
fn serve_favicon(request: Request, config: &SiteConfig, query: Option<&str>) -> Result<()> {
    let kind = query
        .and_then(|q| {
            q.split('&')
                .find_map(|pair| pair.strip_prefix("type="))
        })
        .unwrap_or("ico");

    let Some(mime) = favicon_mime(kind) else {
        return respond_json(request, 404, &json!({"error": "unknown favicon type"}));
    };

    match fs::read(&config.site.favicon) {
        Ok(bytes) => {
            let response = Response::from_data(bytes)
                .with_header(header("Content-Type", mime))
                .with_header(cache_control(ROBOTS_CACHE));
            request.respond(response)?;
            Ok(())
        }
        Err(e) => {
            log!("error"; "failed to read favicon {}: {e}", config.site.favicon.display());
            respond_json(request, 500, &json!({"error": "favicon unavailable"}))
        }
    }
}

/// `GET /api/meta?path=<p>`. Renders the head tag fragment for a path;
/// unconfigured paths get site-derived defaults.
fn serve_meta(request: Request, config: &SiteConfig, query: Option<&str>) -> Result<()> {
    let path = query
        .and_then(|q| q.split('&').find_map(|pair| pair.strip_prefix("path=")))
        .unwrap_or("/");

    if !crate::config::is_root_relative(path) {
        return respond_json(request, 400, &json!({"error": "path must be root-relative"}));
    }

    let page = resolve_metadata(config, path, &MetadataOverrides::default());
    let body = render_head_tags(config, path, &page);

    let response = Response::from_string(body)
        .with_header(header("Content-Type", "text/html; charset=utf-8"))
        .with_header(cache_control(MANIFEST_CACHE));
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Contact Endpoint
// ============================================================================

/// `POST /api/contact`.
///
/// 400 on malformed JSON or failed validation, 429 over the rate limit,
/// 500 when dispatch fails, 200 with the message id on success.
fn serve_contact(
    mut request: Request,
    config: &SiteConfig,
    limiter: &RateLimiter,
) -> Result<()> {
    if !config.contact.enable {
        return respond_json(request, 404, &json!({"error": "not found"}));
    }

    let client = client_key(&request);
    let window = Duration::from_secs(config.contact.window_secs);
    if !limiter.check(&client, config.contact.limit, window) {
        log!("serve"; "rate limited contact request from {client}");
        return respond_json(
            request,
            429,
            &json!({"error": "too many requests, try again later"}),
        );
    }

    let mut body = String::new();
    if std::io::Read::read_to_string(request.as_reader(), &mut body).is_err() {
        return respond_json(request, 400, &json!({"error": "unreadable request body"}));
    }

    let form: ContactForm = match serde_json::from_str(&body) {
        Ok(form) => form,
        Err(_) => {
            return respond_json(request, 400, &json!({"error": "invalid JSON body"}));
        }
    };

    let result = contact::validate_contact_form(&form);
    if !result.is_valid {
        return respond_json(request, 400, &json!({"error": result.errors.join("; ")}));
    }

    match contact::dispatch_message(config, &form) {
        Ok(id) => {
            log!("serve"; "contact message accepted ({id})");
            respond_json(request, 200, &json!({"message": "message sent", "id": id}))
        }
        Err(e) => {
            log!("error"; "contact dispatch failed: {e}");
            respond_json(request, 500, &json!({"error": "failed to send message"}))
        }
    }
}

/// Rate-limit key for a request: the first forwarded client address when
/// present, otherwise a shared bucket.
fn client_key(request: &Request) -> String {
    let header_value = |name: &'static str| {
        request
            .headers()
            .iter()
            .find(|h| h.field.equiv(name))
            .map(|h| h.value.as_str())
    };

    if let Some(forwarded) = header_value("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = header_value("x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    "unknown".to_string()
}

// ============================================================================
// Static Files
// ============================================================================

/// Serve a file from the site root, resolving directories to their
/// `index.html`.
///
/// Paths are URL-decoded before they reach this function, so the
/// traversal guard must run on the decoded form.
fn serve_static(request: Request, config: &SiteConfig, path: &str) -> Result<()> {
    let request_path = path.trim_matches('/');

    if !is_safe_request_path(request_path) {
        return serve_not_found(request);
    }

    let local_path = config.site.root.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    serve_not_found(request)
}

/// A request path is only joined onto the site root when every component
/// is a plain name; `..`, root and prefix components can escape the root.
fn is_safe_request_path(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|component| matches!(component, std::path::Component::Normal(_)))
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::from_string("404 Not Found")
        .with_status_code(404)
        .with_header(header("Content-Type", "text/plain"));
    request.respond(response)?;
    Ok(())
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content).with_header(header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Build a header from well-formed ASCII field/value pairs.
fn header(field: &str, value: &str) -> Header {
    Header::from_bytes(field.as_bytes(), value.as_bytes()).unwrap()
}

fn cache_control(max_age: u32) -> Header {
    header("Cache-Control", &format!("public, max-age={max_age}"))
}

fn respond_json(request: Request, status: u16, body: &serde_json::Value) -> Result<()> {
    let response = Response::from_string(body.to_string())
        .with_status_code(status)
        .with_header(header("Content-Type", "application/json; charset=utf-8"));
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_favicon_mime_table() {
        // eleven known types
        let known = [
            "ico",
            "svg",
            "gif",
            "webp",
            "png",
            "apple-touch-icon",
            "icon-16",
            "icon-32",
            "icon-192",
            "icon-512",
            "maskable",
        ];
        for kind in known {
            assert!(favicon_mime(kind).is_some(), "{kind}");
        }
        assert_eq!(favicon_mime("ico"), Some("image/x-icon"));
        assert_eq!(favicon_mime("apple-touch-icon"), Some("image/png"));
        assert_eq!(favicon_mime("bmp"), None);
        assert_eq!(favicon_mime(""), None);
    }

    #[test]
    fn test_safe_request_path_rejects_traversal() {
        // decoded form of e.g. /%2e%2e/secret.txt
        assert!(!is_safe_request_path(".."));
        assert!(!is_safe_request_path("../secret.txt"));
        assert!(!is_safe_request_path("assets/../../secret.txt"));
        assert!(!is_safe_request_path("/etc/passwd"));

        assert!(is_safe_request_path(""));
        assert!(is_safe_request_path("index.html"));
        assert!(is_safe_request_path("about/team.html"));
        // a literal dot-dot inside a name is fine
        assert!(is_safe_request_path("notes..txt"));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(&PathBuf::from("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(guess_content_type(&PathBuf::from("a.webp")), "image/webp");
        assert_eq!(
            guess_content_type(&PathBuf::from("unknown.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            guess_content_type(&PathBuf::from("noext")),
            "application/octet-stream"
        );
    }
}
