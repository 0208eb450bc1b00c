//! Firefox-backed [`NavigablePage`] driven through geckodriver.
//!
//! Responses are observed through the Performance API: after a navigation
//! settles, the resource timing buffer lists every request the document made.
//! Bodies of the responses the interceptor keeps are fetched again with
//! `reqwest`, sending the artwork page as referer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::REFERER;
use thirtyfour::{By, DesiredCapabilities, WebDriver};
use tracing::debug;

use crate::{
    config::{WINDOW_HEIGHT, WINDOW_WIDTH},
    error::Result,
    page::{NavigablePage, NavigationResult, ObservedResponse},
};

/// Entries a document's resource timing buffer holds before it drops more.
pub const RESOURCE_TIMING_BUFFER_SIZE: usize = 250;

/// Reads the document's HTTP status; 0 when the browser does not expose it.
const NAVIGATION_STATUS_SCRIPT: &str = r#"
    const [nav] = performance.getEntriesByType('navigation');
    return nav && nav.responseStatus ? nav.responseStatus : 0;
"#;

const ANCHOR_HREFS_SCRIPT: &str = r#"
    return Array.from(document.querySelectorAll('a'), a => typeof a.href === 'string' ? a.href : '');
"#;

const DRAIN_RESOURCES_SCRIPT: &str = r#"
    const names = performance.getEntriesByType('resource')
        .map(r => r.name)
        .filter(url => !url.startsWith('data:') && !url.startsWith('blob:'));
    performance.clearResourceTimings();
    return names;
"#;

/// A browser tab controlled over WebDriver.
pub struct WebDriverPage {
    driver: WebDriver,
    client: reqwest::Client,
    settle: Duration,
    capturing: bool,
    current_url: Option<String>,
}

impl WebDriverPage {
    /// Opens a Firefox session on the given WebDriver server.
    ///
    /// `settle` is how long to wait after each navigation for dynamic
    /// content and images to load.
    ///
    /// # Errors
    ///
    /// Returns an error if the WebDriver connection fails.
    pub async fn connect(server_url: &str, headless: bool, settle: Duration) -> Result<Self> {
        let mut caps = DesiredCapabilities::firefox();
        if headless {
            caps.set_headless()?;
        }
        let driver = WebDriver::new(server_url, caps).await?;
        driver.set_window_rect(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT).await?;

        Ok(Self {
            driver,
            client: reqwest::Client::new(),
            settle,
            capturing: false,
            current_url: None,
        })
    }

    /// Closes the browser session.
    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }

    async fn run_script<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let ret = self.driver.execute(script, vec![]).await?;
        Ok(serde_json::from_value(ret.json().clone())?)
    }
}

#[async_trait]
impl NavigablePage for WebDriverPage {
    async fn goto(&mut self, url: &str) -> Result<NavigationResult> {
        self.driver.goto(url).await?;

        // Wait for dynamic content to load
        tokio::time::sleep(self.settle).await;

        let status: u16 = self.run_script(NAVIGATION_STATUS_SCRIPT).await?;
        let final_url = self.driver.current_url().await?.to_string();
        self.current_url = Some(final_url.clone());

        Ok(NavigationResult {
            status: if status == 0 { 200 } else { status },
            final_url,
        })
    }

    async fn text_at(&self, xpath: &str) -> Result<Option<String>> {
        let elements = self.driver.find_all(By::XPath(xpath)).await?;
        match elements.first() {
            Some(element) => Ok(Some(element.text().await?.trim().to_string())),
            None => Ok(None),
        }
    }

    async fn anchor_hrefs(&self) -> Result<Vec<String>> {
        let values: Vec<serde_json::Value> = self.run_script(ANCHOR_HREFS_SCRIPT).await?;
        Ok(string_hrefs(values))
    }

    async fn enable_response_capture(&mut self) -> Result<()> {
        // Drop whatever the current document loaded before capture began.
        let _: Vec<String> = self.run_script(DRAIN_RESOURCES_SCRIPT).await?;
        self.capturing = true;
        Ok(())
    }

    async fn take_responses(&mut self) -> Result<Vec<ObservedResponse>> {
        if !self.capturing {
            return Ok(Vec::new());
        }
        let urls: Vec<String> = self.run_script(DRAIN_RESOURCES_SCRIPT).await?;
        debug!("Observed {} responses", urls.len());
        if resource_buffer_full(urls.len()) {
            debug!(
                "Resource timing buffer is full ({} entries); later responses were not recorded",
                urls.len()
            );
        }

        // Resource timing only lists completed fetches, never preflights.
        Ok(urls
            .into_iter()
            .map(|url| ObservedResponse {
                method: "GET".to_string(),
                url,
            })
            .collect())
    }

    async fn response_body(&self, response: &ObservedResponse) -> Result<Vec<u8>> {
        let mut request = self.client.get(&response.url);
        if let Some(referer) = &self.current_url {
            request = request.header(REFERER, referer);
        }
        let bytes = request.send().await?.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Keeps the string hrefs; SVG anchors report an object instead.
fn string_hrefs(values: Vec<serde_json::Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(href) => Some(href),
            _ => None,
        })
        .collect()
}

fn resource_buffer_full(observed: usize) -> bool {
    observed >= RESOURCE_TIMING_BUFFER_SIZE
}
