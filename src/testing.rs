//! In-memory page double for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::{Error, Result},
    page::{NavigablePage, NavigationResult, ObservedResponse},
};

#[derive(Debug, Default)]
struct ScriptedDocument {
    status: u16,
    fails: bool,
    hrefs: Vec<String>,
    texts: HashMap<String, String>,
    responses: Vec<ObservedResponse>,
}

/// A page whose documents are scripted up front.
///
/// Unknown URLs answer 404. Responses attached to a document are buffered on
/// every navigation to it once capture is enabled, including non-200 ones.
#[derive(Debug, Default)]
pub struct ScriptedPage {
    documents: HashMap<String, ScriptedDocument>,
    bodies: HashMap<String, Vec<u8>>,
    current: Option<String>,
    capturing: bool,
    buffered: Vec<ObservedResponse>,
    pub visited: Vec<String>,
}

impl ScriptedPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, url: &str, status: u16, hrefs: &[&str]) {
        let doc = self.documents.entry(url.to_string()).or_default();
        doc.status = status;
        doc.hrefs = hrefs.iter().map(|h| h.to_string()).collect();
    }

    pub fn set_text(&mut self, url: &str, xpath: &str, text: &str) {
        self.documents
            .entry(url.to_string())
            .or_default()
            .texts
            .insert(xpath.to_string(), text.to_string());
    }

    /// Makes navigation to `url` fail outright.
    pub fn fail_navigation(&mut self, url: &str) {
        self.documents.entry(url.to_string()).or_default().fails = true;
    }

    /// Attaches a response to the document; `body` of `None` makes reading it fail.
    pub fn add_response(&mut self, url: &str, method: &str, response_url: &str, body: Option<&[u8]>) {
        self.documents
            .entry(url.to_string())
            .or_default()
            .responses
            .push(ObservedResponse {
                method: method.to_string(),
                url: response_url.to_string(),
            });
        if let Some(body) = body {
            self.bodies.insert(response_url.to_string(), body.to_vec());
        }
    }

    fn document(&self) -> Option<&ScriptedDocument> {
        self.current.as_ref().and_then(|url| self.documents.get(url))
    }
}

#[async_trait]
impl NavigablePage for ScriptedPage {
    async fn goto(&mut self, url: &str) -> Result<NavigationResult> {
        self.visited.push(url.to_string());
        let Some(doc) = self.documents.get(url) else {
            self.current = None;
            return Ok(NavigationResult {
                status: 404,
                final_url: url.to_string(),
            });
        };
        if doc.fails {
            return Err(Error::Io(std::io::Error::other("navigation timed out")));
        }
        if self.capturing {
            self.buffered.extend(doc.responses.iter().cloned());
        }
        let status = doc.status;
        self.current = Some(url.to_string());
        Ok(NavigationResult {
            status,
            final_url: url.to_string(),
        })
    }

    async fn text_at(&self, xpath: &str) -> Result<Option<String>> {
        Ok(self.document().and_then(|doc| doc.texts.get(xpath).cloned()))
    }

    async fn anchor_hrefs(&self) -> Result<Vec<String>> {
        Ok(self.document().map(|doc| doc.hrefs.clone()).unwrap_or_default())
    }

    async fn enable_response_capture(&mut self) -> Result<()> {
        self.capturing = true;
        Ok(())
    }

    async fn take_responses(&mut self) -> Result<Vec<ObservedResponse>> {
        Ok(std::mem::take(&mut self.buffered))
    }

    async fn response_body(&self, response: &ObservedResponse) -> Result<Vec<u8>> {
        self.bodies
            .get(&response.url)
            .cloned()
            .ok_or_else(|| Error::Io(std::io::Error::other("body unavailable")))
    }
}
