//! Profile URL validation.
//!
//! Validation is pure string/URL parsing; nothing here touches the network.

use reqwest::Url;
use xprofile_core::ValidationResult;

/// Hosts whose URLs are accepted as profile references.
pub const ALLOWED_HOSTS: [&str; 4] = ["twitter.com", "www.twitter.com", "x.com", "www.x.com"];

/// Site domains used to recognise links that point back into the site.
const SITE_DOMAINS: [&str; 2] = ["twitter.com", "x.com"];

/// Returns `true` when `raw` is an absolute URL on an allow-listed host whose
/// path names a handle.
///
/// The host is compared lower-cased. URLs carrying credentials or any
/// explicit port, default ports included, are rejected because their
/// authority is not one of the allow-listed hosts. One leading and one trailing `/` are stripped from the
/// path before splitting, and the first segment must be non-empty.
#[must_use]
pub fn validate(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };

    if !url.username().is_empty() || url.password().is_some() || has_explicit_port(raw) {
        return false;
    }

    let Some(host) = url.host_str() else {
        return false;
    };
    if !is_allowed_host(host) {
        return false;
    }

    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    path.split('/').next().is_some_and(|handle| !handle.is_empty())
}

/// Parsing drops a default port (`:443` on https), so the authority is
/// checked in the raw text. Allow-listed hosts are never IPv6 literals, so any
/// `:` left after removing userinfo marks a port.
fn has_explicit_port(raw: &str) -> bool {
    let Some((_, rest)) = raw.split_once("://") else {
        return false;
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    host_port.contains(':')
}

/// Trims surrounding whitespace and strips one leading `@`.
#[must_use]
pub fn normalize_reference(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

/// Classifies a batch reference after normalisation.
///
/// `Valid` carries the normalized URL; `Invalid` carries `raw` untouched.
#[must_use]
pub fn classify(raw: &str) -> ValidationResult {
    let normalized = normalize_reference(raw);
    if validate(normalized) {
        ValidationResult::Valid(normalized.to_string())
    } else {
        ValidationResult::Invalid(raw.to_string())
    }
}

/// Returns `true` when `host` is one of [`ALLOWED_HOSTS`], ignoring case.
#[must_use]
pub fn is_allowed_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    ALLOWED_HOSTS.contains(&host.as_str())
}

/// Returns `true` when `href` leads back into the profile site itself,
/// including its subdomains (`help.x.com`, `mobile.twitter.com`).
///
/// Unparseable links are not treated as site links.
#[must_use]
pub fn points_to_site(href: &str) -> bool {
    let Some(host) = Url::parse(href)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    else {
        return false;
    };
    SITE_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}
