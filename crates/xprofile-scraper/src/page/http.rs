//! HTTP + DOM page accessor.
//!
//! Fetches the page body with `reqwest` and answers lookups with CSS
//! selectors over the parsed document. Script-rendered content is not
//! executed, so this suits server-rendered profile pages and mirrors.

use std::time::Duration;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use super::{Element, PageAccessor, PageHandle};
use crate::error::{LookupError, PageError};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Page accessor backed by a single `reqwest::Client`.
pub struct HttpPageAccessor {
    client: Option<Client>,
}

impl HttpPageAccessor {
    /// Builds an accessor whose loads time out after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Setup`] if the underlying client cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| PageError::Setup(e.to_string()))?;
        Ok(Self {
            client: Some(client),
        })
    }
}

impl PageAccessor for HttpPageAccessor {
    type Page = StaticPage;

    async fn load(&mut self, url: &str) -> Result<StaticPage, PageError> {
        let client = self.client.as_ref().ok_or(PageError::Released)?;

        let response = client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(url, &e))?;

        tracing::debug!(url, bytes = body.len(), "page loaded");
        Ok(StaticPage::from_html(url, &body))
    }

    async fn release(&mut self) {
        if self.client.take().is_some() {
            tracing::debug!("http page accessor released");
        }
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> PageError {
    if err.is_timeout() {
        PageError::Timeout {
            url: url.to_string(),
        }
    } else {
        PageError::Navigation {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

/// A parsed, immutable HTML document.
#[derive(Debug)]
pub struct StaticPage {
    url: String,
    document: Html,
}

impl StaticPage {
    #[must_use]
    pub fn from_html(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }

    fn selector(selector: &str) -> Result<Selector, LookupError> {
        Selector::parse(selector).map_err(|e| LookupError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }
}

fn snapshot(element: ElementRef<'_>) -> Element {
    Element {
        text: element.text().collect(),
        href: element.value().attr("href").map(str::to_string),
    }
}

impl PageHandle for StaticPage {
    fn url(&self) -> &str {
        &self.url
    }

    /// A fetched document never changes, so an absent element is reported as
    /// an elapsed wait straight away.
    async fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<Element, LookupError> {
        match self.find(selector) {
            Err(LookupError::NoSuchElement { selector }) => Err(LookupError::Timeout {
                selector,
                waited: Duration::ZERO,
            }),
            other => other,
        }
    }

    fn find(&self, selector: &str) -> Result<Element, LookupError> {
        let parsed = Self::selector(selector)?;
        self.document
            .select(&parsed)
            .next()
            .map(snapshot)
            .ok_or_else(|| LookupError::NoSuchElement {
                selector: selector.to_string(),
            })
    }

    fn find_all(&self, selector: &str) -> Result<Vec<Element>, LookupError> {
        let parsed = Self::selector(selector)?;
        Ok(self.document.select(&parsed).map(snapshot).collect())
    }
}
