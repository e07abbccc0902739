//! Contact form handling: request validation, input sanitization and
//! message dispatch.
//!
//! Validation follows the same returned-as-data policy as the config
//! validators; only dispatch is fallible.

pub mod rate_limit;

pub use rate_limit::RateLimiter;

use crate::{config::SiteConfig, validate::ValidationResult};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fs, fs::OpenOptions, io::Write, sync::LazyLock};

/// Field length bounds.
const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const SUBJECT_MIN: usize = 3;
const SUBJECT_MAX: usize = 200;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 2000;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Incoming contact form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Outbox record appended per dispatched message (JSON lines).
#[derive(Debug, Serialize)]
struct OutboxRecord<'a> {
    id: &'a str,
    received_at: String,
    recipient: Option<&'a str>,
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Validate a contact form submission.
///
/// Length bounds per field plus an email format check; all findings are
/// errors (there are no advisory bounds here).
pub fn validate_contact_form(form: &ContactForm) -> ValidationResult {
    let mut result = ValidationResult::valid();

    let name_len = form.name.trim().chars().count();
    if name_len < NAME_MIN || name_len >= NAME_MAX {
        result.error(format!(
            "name must be between {NAME_MIN} and {NAME_MAX} characters"
        ));
    }

    if !EMAIL_RE.is_match(form.email.trim()) {
        result.error("email address is not valid");
    }

    let subject_len = form.subject.trim().chars().count();
    if subject_len < SUBJECT_MIN || subject_len >= SUBJECT_MAX {
        result.error(format!(
            "subject must be between {SUBJECT_MIN} and {SUBJECT_MAX} characters"
        ));
    }

    let message_len = form.message.trim().chars().count();
    if message_len < MESSAGE_MIN || message_len >= MESSAGE_MAX {
        result.error(format!(
            "message must be between {MESSAGE_MIN} and {MESSAGE_MAX} characters"
        ));
    }

    result
}

/// Strip angle brackets and trim. Applied to every field before dispatch.
pub fn sanitize_input(s: &str) -> String {
    s.replace(['<', '>'], "").trim().to_string()
}

/// Dispatch a validated message: require the provider credential from the
/// environment, then append the message to the outbox file. Returns the
/// message id.
///
/// Actual third-party delivery happens out of band from the outbox; this
/// function is the seam where a provider client would plug in.
pub fn dispatch_message(config: &SiteConfig, form: &ContactForm) -> Result<String> {
    if std::env::var(&config.contact.api_key_env).is_err() {
        bail!(
            "contact provider credential `{}` is not set",
            config.contact.api_key_env
        );
    }

    let received_at = Utc::now().to_rfc3339();
    let id = message_id(form, &received_at);

    let name = sanitize_input(&form.name);
    let email = sanitize_input(&form.email);
    let subject = sanitize_input(&form.subject);
    let message = sanitize_input(&form.message);

    let record = OutboxRecord {
        id: &id,
        received_at,
        recipient: config.contact.recipient.as_deref(),
        name: &name,
        email: &email,
        subject: &subject,
        message: &message,
    };
    let line = serde_json::to_string(&record).context("Failed to serialize outbox record")?;

    if let Some(parent) = config.contact.outbox.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create outbox directory {}", parent.display())
        })?;
    }

    let mut outbox = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.contact.outbox)
        .with_context(|| {
            format!("Failed to open outbox {}", config.contact.outbox.display())
        })?;
    writeln!(outbox, "{line}").context("Failed to append to outbox")?;

    Ok(id)
}

/// Content-derived message id: truncated hex of a blake3 hash over the
/// sender, subject and receive time.
fn message_id(form: &ContactForm, received_at: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(form.email.as_bytes());
    hasher.update(form.subject.as_bytes());
    hasher.update(received_at.as_bytes());
    hex::encode(&hasher.finalize().as_bytes()[..8])
}
