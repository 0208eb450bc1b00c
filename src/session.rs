//! Per-run crawl state.

use std::path::{Path, PathBuf};

/// Context threaded through the download stage.
///
/// Holds the artist identity and the download counter that numbers
/// captured files. The counter only moves forward.
#[derive(Debug)]
pub struct CrawlSession {
    artist: String,
    directory: PathBuf,
    counter: u32,
}

impl CrawlSession {
    /// Starts a session for the artist with the counter at zero.
    pub fn new(artist: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            artist: artist.into(),
            directory: directory.into(),
            counter: 0,
        }
    }

    /// Artist display name used as the file name prefix.
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Destination directory for captured images.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Current counter value.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Moves the counter past the current hyperlink.
    pub fn advance(&mut self) {
        self.counter += 1;
    }

    /// Destination of the image captured for the given counter value.
    pub fn capture_path(&self, counter: u32) -> PathBuf {
        self.directory.join(format!("{}_{counter}.jpg", self.artist))
    }
}
