use crate::source::{FetchError, PageSource};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves pages from memory and records every URL requested.
///
/// Unknown URLs answer with HTTP 404, the same way the live site does for
/// years it has no chronology for.
#[derive(Debug, Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Every URL requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl PageSource for MemorySource {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        })
    }
}
