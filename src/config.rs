//! Crawl configuration and site conventions.

use std::{path::PathBuf, time::Duration};

/// Rows of thumbnails on one listing page.
pub const LISTING_ROWS: u32 = 8;

/// Columns of thumbnails on one listing page.
pub const LISTING_COLUMNS: u32 = 6;

/// Items rendered per listing page.
pub const PAGE_SIZE: u32 = LISTING_ROWS * LISTING_COLUMNS;

/// Substring identifying an artwork detail page.
pub const ARTWORK_LINK_PATTERN: &str = "en/artworks";

/// Substring identifying a full-resolution image response.
pub const IMAGE_URL_PATTERN: &str = "https://i.pximg.net/img-master";

/// Location of the artist's display name on the portfolio page.
pub const ARTIST_NAME_XPATH: &str = r#"//span[text()="Following"]/../../../../div/div/h1"#;

/// Location of the total illustration count on the portfolio page.
pub const TOTAL_COUNT_XPATH: &str = r#"//h2["Illustrations and Manga"]/../div/div/span"#;

/// Default destination directory.
pub const DEFAULT_DIRECTORY: &str = "./data/";

/// Default geckodriver endpoint.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://127.0.0.1:4444";

/// Browser window width, fixed so listing layouts stay the same.
pub const WINDOW_WIDTH: u32 = 1366;

/// Browser window height.
pub const WINDOW_HEIGHT: u32 = 768;

/// Default wait after a navigation for dynamic content to load.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(2);

/// Settings for one crawl.
#[derive(Debug, Clone)]
pub struct CurateConfig {
    /// Artist portfolio URL without a trailing slash
    pub base_url: String,
    /// Where captured images are written
    pub directory: PathBuf,
    /// Items per listing page
    pub page_size: u32,
    /// Substring an artwork hyperlink must contain
    pub link_pattern: String,
    /// Substring an image response URL must contain
    pub image_pattern: String,
    /// Element holding the artist's display name
    pub artist_name_xpath: String,
    /// Element holding the published illustration count
    pub total_count_xpath: String,
}

impl CurateConfig {
    /// Creates a configuration for the given artist URL with site defaults.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            page_size: PAGE_SIZE,
            link_pattern: ARTWORK_LINK_PATTERN.to_string(),
            image_pattern: IMAGE_URL_PATTERN.to_string(),
            artist_name_xpath: ARTIST_NAME_XPATH.to_string(),
            total_count_xpath: TOTAL_COUNT_XPATH.to_string(),
        }
    }

    /// Sets the destination directory.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// URL of the listing page with the given 1-based index.
    pub fn listing_url(&self, index: u32) -> String {
        format!("{}/illustrations?p={index}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_rows_times_columns() {
        assert_eq!(PAGE_SIZE, 48);
    }

    #[test]
    fn test_window_is_fixed_desktop_size() {
        assert_eq!((WINDOW_WIDTH, WINDOW_HEIGHT), (1366, 768));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = CurateConfig::new("https://www.pixiv.net/en/users/11/");
        assert_eq!(config.base_url, "https://www.pixiv.net/en/users/11");
        assert_eq!(config.directory, PathBuf::from("./data/"));
    }

    #[test]
    fn test_listing_url() {
        let config = CurateConfig::new("https://www.pixiv.net/en/users/11");
        assert_eq!(
            config.listing_url(3),
            "https://www.pixiv.net/en/users/11/illustrations?p=3"
        );
    }
}
