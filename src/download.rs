//! Download orchestrator: one navigation per registered hyperlink.

use std::{io::ErrorKind, path::Path};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::{
    capture::ResponseInterceptor,
    error::{Error, Result},
    page::NavigablePage,
    registry::IllustrationRegistry,
    session::CrawlSession,
    summary::{ItemOutcome, ItemResult},
};

/// Creates the destination directory unless it already exists.
///
/// Returns `true` if it was created.
///
/// # Errors
///
/// Fails with [`Error::NotADirectory`] if something other than a directory
/// occupies the path.
pub async fn ensure_directory(directory: &Path) -> Result<bool> {
    match fs::metadata(directory).await {
        Ok(meta) if meta.is_dir() => {
            info!("{} was found", directory.display());
            Ok(false)
        }
        Ok(_) => Err(Error::NotADirectory(directory.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(directory).await?;
            info!("{} was created successfully", directory.display());
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

/// Visits every hyperlink registered for the session's artist, in order.
///
/// The counter advances once per hyperlink whatever the outcome.
///
/// # Errors
///
/// Fails only if the destination directory cannot be prepared.
pub async fn download_all<P>(
    page: &mut P,
    session: &mut CrawlSession,
    registry: &IllustrationRegistry,
    interceptor: &ResponseInterceptor,
) -> Result<Vec<ItemOutcome>>
where
    P: NavigablePage + ?Sized,
{
    ensure_directory(session.directory()).await?;

    let links = registry.links_for(session.artist());
    let mut outcomes = Vec::with_capacity(links.len());
    for url in links {
        let result = download_one(page, session, interceptor, url).await;
        outcomes.push(ItemOutcome {
            counter: session.counter(),
            url: url.clone(),
            result,
        });
        session.advance();
    }
    Ok(outcomes)
}

async fn download_one<P>(
    page: &mut P,
    session: &CrawlSession,
    interceptor: &ResponseInterceptor,
    url: &str,
) -> ItemResult
where
    P: NavigablePage + ?Sized,
{
    info!("Navigating to {url}");
    let navigated = match page.goto(url).await {
        Ok(nav) => nav.ensure_ok(url),
        Err(e) => Err(e),
    };
    let responses = page.take_responses().await;

    let failure = match (navigated, responses) {
        (Ok(_), Ok(responses)) => return interceptor.capture(&*page, session, &responses).await,
        (Err(e), Ok(discarded)) => {
            debug!("Discarding {} responses from failed navigation", discarded.len());
            e
        }
        (Err(e), Err(_)) | (Ok(_), Err(e)) => e,
    };
    warn!("Something went wrong with {url}: {failure}. Skipping");
    ItemResult::NavigationFailed {
        reason: failure.to_string(),
    }
}
