//! Outcome records for listing pages and downloaded items.

use std::{fmt, path::PathBuf};

/// What happened on one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResult {
    /// Links were read; `new_links` of them were not seen before.
    Collected { links: usize, new_links: usize },
    /// The page was skipped after a navigation failure.
    Skipped { reason: String },
}

/// Outcome of one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// 1-based listing page index.
    pub index: u32,
    /// Listing URL that was visited.
    pub url: String,
    pub result: PageResult,
}

/// What happened to one hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemResult {
    /// The image was written to `path`.
    Captured { path: PathBuf, bytes: usize },
    /// Navigation succeeded but no image response matched.
    NoImage,
    /// The artwork page did not load with HTTP 200.
    NavigationFailed { reason: String },
    /// A matching image was seen but could not be read or written.
    WriteFailed { path: PathBuf, reason: String },
}

/// Outcome of one artwork hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// Counter value assigned to this hyperlink.
    pub counter: u32,
    /// Artwork page URL.
    pub url: String,
    pub result: ItemResult,
}

/// Aggregate of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub artist: String,
    /// Listing pages in visiting order.
    pub pages: Vec<PageOutcome>,
    /// Artwork hyperlinks in visiting order.
    pub items: Vec<ItemOutcome>,
}

impl RunSummary {
    /// Listing pages lost to navigation failures.
    pub fn pages_skipped(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(p.result, PageResult::Skipped { .. }))
            .count()
    }

    /// Images written to disk.
    pub fn images_captured(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.result, ItemResult::Captured { .. }))
            .count()
    }

    /// Artwork pages that loaded without a matching image response.
    pub fn items_without_image(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.result, ItemResult::NoImage))
            .count()
    }

    /// Items whose navigation or capture failed.
    pub fn items_failed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| {
                matches!(
                    i.result,
                    ItemResult::NavigationFailed { .. } | ItemResult::WriteFailed { .. }
                )
            })
            .count()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Artist: {}", self.artist)?;
        writeln!(
            f,
            "Listing pages: {} attempted, {} skipped",
            self.pages.len(),
            self.pages_skipped()
        )?;
        write!(
            f,
            "Illustrations: {} captured, {} without image, {} failed (of {})",
            self.images_captured(),
            self.items_without_image(),
            self.items_failed(),
            self.items.len()
        )
    }
}
