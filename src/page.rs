//! Navigable page abstraction.
//!
//! Defines the [`NavigablePage`] trait the crawler drives. The browser-backed
//! implementation lives in [`crate::browser`]; tests use an in-memory double.

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Result of navigating to a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationResult {
    /// HTTP status code of the document response.
    pub status: u16,
    /// The final URL after any redirects.
    pub final_url: String,
}

impl NavigationResult {
    /// Fails with [`Error::BadConnection`] unless the status is 200.
    pub fn ensure_ok(self, url: &str) -> Result<Self> {
        if self.status == 200 {
            Ok(self)
        } else {
            Err(Error::BadConnection {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// A network response observed while a navigation was in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedResponse {
    /// Request method, as reported by the page.
    pub method: String,
    /// Response URL.
    pub url: String,
}

/// A loaded web document that can be queried and navigated.
#[async_trait]
pub trait NavigablePage: Send + Sync {
    /// Navigate to a URL and wait for it to settle.
    async fn goto(&mut self, url: &str) -> Result<NavigationResult>;

    /// Trimmed text of the first element matching `xpath`, if any.
    async fn text_at(&self, xpath: &str) -> Result<Option<String>>;

    /// Resolved `href` of every anchor in the document.
    async fn anchor_hrefs(&self) -> Result<Vec<String>>;

    /// Start buffering responses of subsequent navigations.
    async fn enable_response_capture(&mut self) -> Result<()>;

    /// Drain the responses buffered since the last call.
    ///
    /// Returns nothing until [`enable_response_capture`](Self::enable_response_capture)
    /// has been called.
    async fn take_responses(&mut self) -> Result<Vec<ObservedResponse>>;

    /// Read the binary body of an observed response.
    async fn response_body(&self, response: &ObservedResponse) -> Result<Vec<u8>>;
}
