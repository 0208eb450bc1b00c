//! Response interception for image payloads.
//!
//! The page buffers every response it observes while a navigation is in
//! flight. Once that navigation has settled, the buffered responses are handed
//! to [`ResponseInterceptor::capture`] together with the session, so a capture
//! is always numbered with the counter of the hyperlink that produced it.

use std::path::Path;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    page::{NavigablePage, ObservedResponse},
    session::CrawlSession,
    summary::ItemResult,
};

/// Matches image responses and persists them.
#[derive(Debug, Clone)]
pub struct ResponseInterceptor {
    pattern: String,
}

impl ResponseInterceptor {
    /// Attaches to the page. Responses are buffered from the next navigation on.
    pub async fn attach<P>(page: &mut P, pattern: &str) -> Result<Self>
    where
        P: NavigablePage + ?Sized,
    {
        page.enable_response_capture().await?;
        debug!("Response interceptor attached for {pattern}");
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    /// Whether the response carries an image payload worth keeping.
    pub fn matches(&self, response: &ObservedResponse) -> bool {
        !response.method.eq_ignore_ascii_case("OPTIONS") && response.url.contains(&self.pattern)
    }

    /// Persists the first matching response of one navigation.
    ///
    /// Never fails: read and write errors are logged and reported in the result.
    pub async fn capture<P>(
        &self,
        page: &P,
        session: &CrawlSession,
        responses: &[ObservedResponse],
    ) -> ItemResult
    where
        P: NavigablePage + ?Sized,
    {
        let mut matching = responses.iter().filter(|r| self.matches(r));
        let Some(response) = matching.next() else {
            info!("No image response observed");
            return ItemResult::NoImage;
        };
        for extra in matching {
            debug!("Ignoring additional image response {}", extra.url);
        }

        info!("Intercepted {}", response.url);
        let path = session.capture_path(session.counter());
        let written = match page.response_body(response).await {
            Ok(body) => write_capture(&path, &body).await.map(|()| body.len()),
            Err(e) => Err(e),
        };

        match written {
            Ok(bytes) => {
                info!("Successfully wrote {} to local disk", path.display());
                ItemResult::Captured { path, bytes }
            }
            Err(e) => {
                warn!("Failed to write {} to local disk: {e}", path.display());
                ItemResult::WriteFailed {
                    path,
                    reason: e.to_string(),
                }
            }
        }
    }
}

async fn write_capture(path: &Path, body: &[u8]) -> Result<()> {
    fs::write(path, body).await.map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPage;

    const ARTWORK: &str = "https://www.pixiv.net/en/artworks/1";
    const IMAGE: &str = "https://i.pximg.net/img-master/img/2024/01/01/1_p0_master1200.jpg";
    const PATTERN: &str = "https://i.pximg.net/img-master";

    fn response(method: &str, url: &str) -> ObservedResponse {
        ObservedResponse {
            method: method.to_string(),
            url: url.to_string(),
        }
    }

    async fn interceptor(page: &mut ScriptedPage) -> ResponseInterceptor {
        ResponseInterceptor::attach(page, PATTERN).await.unwrap()
    }

    #[tokio::test]
    async fn test_matches() {
        let interceptor = interceptor(&mut ScriptedPage::new()).await;
        assert!(interceptor.matches(&response("GET", IMAGE)));
        assert!(!interceptor.matches(&response("OPTIONS", IMAGE)));
        assert!(!interceptor.matches(&response("options", IMAGE)));
        assert!(!interceptor.matches(&response(
            "GET",
            "https://i.pximg.net/c/250x250_80_a2/img-master/img/1_square1200.jpg"
        )));
        assert!(!interceptor.matches(&response("GET", "https://s.pximg.net/www/js/app.js")));
    }

    #[tokio::test]
    async fn test_captures_first_matching_response() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = ScriptedPage::new();
        page.add_response(ARTWORK, "GET", IMAGE, Some(b"jpeg-bytes"));
        page.add_response(ARTWORK, "GET", &format!("{IMAGE}?second"), Some(b"other"));
        let interceptor = interceptor(&mut page).await;
        let mut session = CrawlSession::new("mika", dir.path());
        session.advance();

        let responses = [
            response("OPTIONS", IMAGE),
            response("GET", "https://s.pximg.net/www/js/app.js"),
            response("GET", IMAGE),
            response("GET", &format!("{IMAGE}?second")),
        ];
        let result = interceptor.capture(&page, &session, &responses).await;

        let path = dir.path().join("mika_1.jpg");
        assert_eq!(result, ItemResult::Captured { path: path.clone(), bytes: 10 });
        assert_eq!(std::fs::read(&path).unwrap(), b"jpeg-bytes");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_no_matching_response() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = ScriptedPage::new();
        let interceptor = interceptor(&mut page).await;
        let session = CrawlSession::new("mika", dir.path());

        let responses = [response("OPTIONS", IMAGE)];
        let result = interceptor.capture(&page, &session, &responses).await;

        assert_eq!(result, ItemResult::NoImage);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("mika_0.jpg")).unwrap();
        let mut page = ScriptedPage::new();
        page.add_response(ARTWORK, "GET", IMAGE, Some(b"jpeg-bytes"));
        let interceptor = interceptor(&mut page).await;
        let session = CrawlSession::new("mika", dir.path());

        let result = interceptor
            .capture(&page, &session, &[response("GET", IMAGE)])
            .await;

        assert!(matches!(result, ItemResult::WriteFailed { .. }));
    }

    #[tokio::test]
    async fn test_unreadable_body_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = ScriptedPage::new();
        page.add_response(ARTWORK, "GET", IMAGE, None);
        let interceptor = interceptor(&mut page).await;
        let session = CrawlSession::new("mika", dir.path());

        let result = interceptor
            .capture(&page, &session, &[response("GET", IMAGE)])
            .await;

        assert_eq!(
            result,
            ItemResult::WriteFailed {
                path: dir.path().join("mika_0.jpg"),
                reason: "I/O error: body unavailable".to_string(),
            }
        );
        assert!(!dir.path().join("mika_0.jpg").exists());
    }
}
