//! Error types for the crawl-and-capture pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while crawling or capturing.
///
/// Whether an error is fatal depends on where it surfaces: the walker and the
/// download loop absorb navigation and capture errors into outcome records,
/// while the same errors on the first listing page abort the run.
#[derive(Debug, Error)]
pub enum Error {
    /// A navigation completed with a status other than 200.
    #[error(
        "bad connection to {url}: expected HTTP 200 OK, got HTTP {status} {}",
        reason_phrase(.status)
    )]
    BadConnection {
        /// URL that was navigated to
        url: String,
        /// Status code the browser reported
        status: u16,
    },

    /// A DOM element the crawl depends on is not on the page.
    #[error("{what} not found (xpath `{xpath}`)")]
    MissingElement {
        /// Human-readable name of the element
        what: &'static str,
        /// XPath that was queried
        xpath: String,
    },

    /// The destination path exists but is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Writing a captured payload failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// WebDriver command failed.
    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    /// Fetching a response body failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A script result had an unexpected shape.
    #[error("unexpected script result: {0}")]
    Script(#[from] serde_json::Error),

    /// I/O error outside of payload writes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Canonical reason phrase for an HTTP status, e.g. `Not Found`.
fn reason_phrase(status: &u16) -> &'static str {
    reqwest::StatusCode::from_u16(*status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}
