//! Pagination walker over an artist's listing pages.

use tracing::{info, warn};

use crate::{
    config::CurateConfig,
    error::{Error, Result},
    page::NavigablePage,
    registry::{IllustrationRegistry, collect_links},
    summary::{PageOutcome, PageResult},
};

/// Everything discovered on the listing pages.
#[derive(Debug)]
pub struct Listing {
    /// Trimmed artist display name
    pub artist: String,
    /// Links registered under `artist`
    pub registry: IllustrationRegistry,
    /// One outcome per listing page, page 1 first
    pub pages: Vec<PageOutcome>,
}

/// Number of listing pages needed for `total` items.
pub fn page_count(total: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Parses the published illustration count, e.g. `"1,234"`.
pub fn parse_total(text: &str) -> Option<u32> {
    text.trim().replace(',', "").parse().ok()
}

/// Walks every listing page of the artist, starting from the loaded page 1.
///
/// # Errors
///
/// Fails only if the artist name is missing or page 1 cannot be read.
/// Later pages that fail are recorded as skipped.
pub async fn walk<P>(page: &mut P, config: &CurateConfig) -> Result<Listing>
where
    P: NavigablePage + ?Sized,
{
    let artist = page
        .text_at(&config.artist_name_xpath)
        .await?
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::MissingElement {
            what: "artist name",
            xpath: config.artist_name_xpath.clone(),
        })?;
    info!("Found artist name: {artist}");

    let mut registry = IllustrationRegistry::new();
    let first = register_current(page, config, &artist, &mut registry).await?;
    let mut pages = vec![PageOutcome {
        index: 1,
        url: config.listing_url(1),
        result: first,
    }];

    let total_text = page.text_at(&config.total_count_xpath).await?;
    let total = match total_text.as_deref().and_then(parse_total) {
        Some(total) => total,
        None => {
            warn!("Illustration count unreadable ({total_text:?}), staying on page 1");
            0
        }
    };
    let last = page_count(total, config.page_size);
    info!("Found {total} total illustrations");
    info!("Found {last} total pages");

    for index in 2..=last {
        let url = config.listing_url(index);
        info!("Navigating to {url}");
        let result = match visit(page, config, &artist, &mut registry, &url).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Something went wrong on {url}: {e}. Skipping");
                PageResult::Skipped {
                    reason: e.to_string(),
                }
            }
        };
        pages.push(PageOutcome { index, url, result });
    }

    info!(
        "Collected {} illustration links for {artist}",
        registry.links_for(&artist).len()
    );
    Ok(Listing {
        artist,
        registry,
        pages,
    })
}

async fn visit<P>(
    page: &mut P,
    config: &CurateConfig,
    artist: &str,
    registry: &mut IllustrationRegistry,
    url: &str,
) -> Result<PageResult>
where
    P: NavigablePage + ?Sized,
{
    page.goto(url).await?.ensure_ok(url)?;
    register_current(page, config, artist, registry).await
}

async fn register_current<P>(
    page: &P,
    config: &CurateConfig,
    artist: &str,
    registry: &mut IllustrationRegistry,
) -> Result<PageResult>
where
    P: NavigablePage + ?Sized,
{
    let links = collect_links(page, &config.link_pattern).await?;
    let found = links.len();
    let new_links = registry.register(artist, links);
    info!("Found {found} links ({new_links} new)");
    Ok(PageResult::Collected {
        links: found,
        new_links,
    })
}
