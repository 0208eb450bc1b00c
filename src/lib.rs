//! # Pixiv Curator
//!
//! A library for collecting an artist's illustrations from pixiv.
//!
//! The crawl runs in two stages against a single browser tab:
//!
//! 1. **Walking** - Read the artist's name and illustration count from the
//!    portfolio, then visit every listing page and register the artwork links
//!    found on each. Pages that fail to load are skipped.
//!
//! 2. **Downloading** - Visit each registered artwork page with the response
//!    interceptor attached, and write the full-resolution image observed
//!    during that visit to `<directory>/<artist>_<n>.jpg`.
//!
//! Per-page and per-item failures are recorded in the returned [`RunSummary`]
//! instead of aborting the run.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use pixiv_curator::{CurateConfig, WebDriverPage, curate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut page = WebDriverPage::connect("http://127.0.0.1:4444", true, Duration::from_secs(2)).await?;
//!     let config = CurateConfig::new("https://www.pixiv.net/en/users/11").with_directory("./data/");
//!     let summary = curate(&mut page, &config).await?;
//!     println!("{summary}");
//!     page.quit().await?;
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod capture;
pub mod config;
pub mod download;
pub mod error;
pub mod page;
pub mod registry;
pub mod session;
pub mod summary;
pub mod walker;

#[cfg(test)]
mod testing;

use tracing::info;

pub use browser::WebDriverPage;
pub use capture::ResponseInterceptor;
pub use config::CurateConfig;
pub use error::{Error, Result};
pub use page::{NavigablePage, NavigationResult, ObservedResponse};
pub use registry::IllustrationRegistry;
pub use session::CrawlSession;
pub use summary::{ItemOutcome, ItemResult, PageOutcome, PageResult, RunSummary};

/// Crawls the artist at `config.base_url` and captures every illustration.
///
/// # Errors
///
/// Returns an error if the first listing page does not load with HTTP 200,
/// if the artist name is missing, or if the destination directory cannot be
/// created. Failures on later pages and individual artworks are reported in
/// the summary.
pub async fn curate<P>(page: &mut P, config: &CurateConfig) -> Result<RunSummary>
where
    P: NavigablePage + ?Sized,
{
    let first = config.listing_url(1);
    info!("Navigating to {first}");
    page.goto(&first).await?.ensure_ok(&first)?;
    info!("Connection was successful");

    let listing = walker::walk(page, config).await?;

    let interceptor = ResponseInterceptor::attach(page, &config.image_pattern).await?;
    let mut session = CrawlSession::new(listing.artist.as_str(), config.directory.as_path());
    let items = download::download_all(page, &mut session, &listing.registry, &interceptor).await?;

    Ok(RunSummary {
        artist: listing.artist,
        pages: listing.pages,
        items,
    })
}
