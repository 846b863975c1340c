//! The page accessor seam: one stateful session that loads a profile page
//! and answers element lookups against whatever page it currently holds.

mod http;

use std::future::Future;
use std::time::Duration;

use crate::error::{LookupError, PageError};

pub use http::{HttpPageAccessor, StaticPage};

/// Owned snapshot of a located element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Concatenated text content, untrimmed.
    pub text: String,
    pub href: Option<String>,
}

/// A loaded page that can be queried.
///
/// `find` and `find_all` are immediate lookups; only `wait_for` may suspend.
pub trait PageHandle {
    /// URL the page was loaded from.
    fn url(&self) -> &str;

    /// Waits up to `timeout` for an element matching `selector`.
    fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<Element, LookupError>>;

    /// Returns the first element matching `selector`.
    ///
    /// # Errors
    ///
    /// [`LookupError::NoSuchElement`] when nothing matches,
    /// [`LookupError::InvalidSelector`] when `selector` cannot be parsed.
    fn find(&self, selector: &str) -> Result<Element, LookupError>;

    /// Returns every element matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// [`LookupError::InvalidSelector`] when `selector` cannot be parsed.
    fn find_all(&self, selector: &str) -> Result<Vec<Element>, LookupError>;

    /// Returns the first `selector` match nested inside a `scope` match.
    ///
    /// # Errors
    ///
    /// Same as [`PageHandle::find`].
    fn find_within(&self, scope: &str, selector: &str) -> Result<Element, LookupError> {
        self.find(&format!("{scope} {selector}"))
    }
}

/// A single page session used for a whole batch.
///
/// Each `load` replaces the previously loaded page. `release` tears the
/// session down; loads after release fail with [`PageError::Released`].
pub trait PageAccessor {
    type Page: PageHandle;

    fn load(&mut self, url: &str) -> impl Future<Output = Result<Self::Page, PageError>>;

    fn release(&mut self) -> impl Future<Output = ()>;
}
