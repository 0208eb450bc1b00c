//! Artwork link collection and the per-artist illustration registry.

use std::collections::{HashMap, HashSet};

use crate::{error::Result, page::NavigablePage};

/// Collects artwork hyperlinks from the currently loaded page.
pub async fn collect_links<P>(page: &P, pattern: &str) -> Result<Vec<String>>
where
    P: NavigablePage + ?Sized,
{
    let hrefs = page.anchor_hrefs().await?;
    Ok(filter_artwork_links(hrefs, pattern))
}

/// Keeps the hrefs that point at artwork pages.
pub fn filter_artwork_links(hrefs: impl IntoIterator<Item = String>, pattern: &str) -> Vec<String> {
    hrefs
        .into_iter()
        .filter(|href| !href.is_empty() && href.contains(pattern))
        .collect()
}

/// Insertion-ordered set of hyperlinks.
#[derive(Debug, Default, Clone)]
struct LinkSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    fn insert(&mut self, link: String) -> bool {
        if self.seen.contains(&link) {
            return false;
        }
        self.seen.insert(link.clone());
        self.order.push(link);
        true
    }
}

/// Artwork hyperlinks per artist, deduplicated.
///
/// Links are yielded in the order they were first registered.
#[derive(Debug, Default, Clone)]
pub struct IllustrationRegistry {
    artists: HashMap<String, LinkSet>,
}

impl IllustrationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds links to the artist's set and returns how many were new.
    pub fn register(&mut self, artist: &str, links: impl IntoIterator<Item = String>) -> usize {
        let set = self.artists.entry(artist.to_string()).or_default();
        links
            .into_iter()
            .map(|link| set.insert(link))
            .filter(|added| *added)
            .count()
    }

    /// All links registered for the artist.
    pub fn links_for(&self, artist: &str) -> &[String] {
        self.artists
            .get(artist)
            .map(|set| set.order.as_slice())
            .unwrap_or_default()
    }

    /// Total number of links across artists.
    pub fn len(&self) -> usize {
        self.artists.values().map(|set| set.order.len()).sum()
    }

    /// Whether no links have been registered for any artist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
