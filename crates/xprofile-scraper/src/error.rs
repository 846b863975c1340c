use std::time::Duration;

use thiserror::Error;

/// Failure to bring a profile page up in the accessor.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("timed out loading {url}")]
    Timeout { url: String },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    Http { status: u16, url: String },

    #[error("page accessor has already been released")]
    Released,

    #[error("could not build page accessor: {0}")]
    Setup(String),
}

impl PageError {
    /// Returns `true` for the timeout class of load failures.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, PageError::Timeout { .. })
    }
}

/// Failure to locate an element on an already-loaded page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no element matches `{selector}`")]
    NoSuchElement { selector: String },

    #[error("gave up on `{selector}` after {waited:?}")]
    Timeout { selector: String, waited: Duration },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}
