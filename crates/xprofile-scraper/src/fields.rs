//! Per-field extraction against a loaded profile page.
//!
//! Each field is read independently and classified as a [`FieldOutcome`];
//! a lookup failure never leaves this module as an error.

use std::time::Duration;

use xprofile_core::{Field, FieldOutcome};

use crate::error::LookupError;
use crate::page::PageHandle;
use crate::validate::points_to_site;

pub(crate) const USERNAME_CONTAINER: &str = r#"[data-testid="UserName"]"#;
pub(crate) const DISPLAY_NAME: &str = "span";
pub(crate) const BIO: &str = r#"[data-testid="UserDescription"]"#;
pub(crate) const FOLLOWING_COUNT: &str = r#"a[href*="/following"] > span:first-of-type span"#;
pub(crate) const FOLLOWERS_COUNT: &str =
    r#"a[href*="/verified_followers"] > span:first-of-type span"#;
pub(crate) const LOCATION: &str = r#"span[data-testid*="UserLocation"] span"#;
pub(crate) const WEBSITE_CANDIDATES: &str = r#"a[href^="http"]"#;

/// Default bound on the username wait.
pub const DEFAULT_USERNAME_WAIT: Duration = Duration::from_secs(10);

/// Reads the seven profile fields from a loaded page.
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor {
    username_wait: Duration,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME_WAIT)
    }
}

impl FieldExtractor {
    #[must_use]
    pub fn new(username_wait: Duration) -> Self {
        Self { username_wait }
    }

    /// Reads `field` from `page`.
    pub async fn extract<P: PageHandle>(&self, page: &P, field: Field) -> FieldOutcome {
        match field {
            Field::Username => self.username(page).await,
            Field::DisplayName => display_name(page),
            Field::Bio => immediate(page, BIO),
            Field::FollowingCount => immediate(page, FOLLOWING_COUNT),
            Field::FollowersCount => immediate(page, FOLLOWERS_COUNT),
            Field::Location => immediate(page, LOCATION),
            Field::Website => website(page),
        }
    }

    /// Waits for the username container; a wait that runs out is `NotFound`.
    ///
    /// The page's own wait is additionally capped by a timer so a slow
    /// accessor cannot hold the batch past the bound.
    async fn username<P: PageHandle>(&self, page: &P) -> FieldOutcome {
        let waited = tokio::time::timeout(
            self.username_wait,
            page.wait_for(USERNAME_CONTAINER, self.username_wait),
        )
        .await;

        match waited {
            Ok(Ok(element)) => FieldOutcome::Found(parse_username(&element.text)),
            Ok(Err(LookupError::InvalidSelector { reason, .. })) => FieldOutcome::Error(reason),
            Ok(Err(LookupError::Timeout { .. } | LookupError::NoSuchElement { .. })) | Err(_) => {
                FieldOutcome::NotFound
            }
        }
    }
}

/// Takes the handle out of the username container text.
///
/// With an `@` present the text after the last `@` is used, otherwise the
/// whole text; either way trimmed.
#[must_use]
pub fn parse_username(text: &str) -> String {
    match text.rsplit_once('@') {
        Some((_, handle)) => handle.trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Display name lives inside the username container; no separate wait.
fn display_name<P: PageHandle>(page: &P) -> FieldOutcome {
    match page.find(USERNAME_CONTAINER) {
        Ok(_) => {}
        Err(LookupError::InvalidSelector { reason, .. }) => return FieldOutcome::Error(reason),
        Err(_) => return FieldOutcome::ElementMissing,
    }
    classify_lookup(page.find_within(USERNAME_CONTAINER, DISPLAY_NAME))
}

fn immediate<P: PageHandle>(page: &P, selector: &str) -> FieldOutcome {
    classify_lookup(page.find(selector))
}

fn classify_lookup(lookup: Result<crate::page::Element, LookupError>) -> FieldOutcome {
    match lookup {
        Ok(element) => FieldOutcome::Found(element.text.trim().to_string()),
        Err(LookupError::InvalidSelector { reason, .. }) => FieldOutcome::Error(reason),
        Err(LookupError::NoSuchElement { .. } | LookupError::Timeout { .. }) => {
            FieldOutcome::ElementMissing
        }
    }
}

/// First absolute http(s) link that leaves the site. Absence is `NotFound`.
fn website<P: PageHandle>(page: &P) -> FieldOutcome {
    let candidates = match page.find_all(WEBSITE_CANDIDATES) {
        Ok(candidates) => candidates,
        Err(err) => return FieldOutcome::Error(err.to_string()),
    };

    candidates
        .into_iter()
        .filter_map(|el| el.href)
        .map(|href| href.trim().to_string())
        .find(|href| is_http_link(href) && !points_to_site(href))
        .map_or(FieldOutcome::NotFound, FieldOutcome::Found)
}

fn is_http_link(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
