use crate::encoding;
use crate::table::TableError;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Directory holding the per-year launch chronology pages.
pub const DEFAULT_BASE_URL: &str = "https://space.skyrocket.de/doc_chr";
/// The chronology site rejects requests without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// Pause after each newly fetched year page, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 2000;

/// Settings for fetching year pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub delay: Duration,
    /// If set, every fetched page is saved here as `lau{year}.html`.
    pub archive_dir: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            archive_dir: None,
        }
    }
}

/// Address of the launch table for `year`.
pub fn year_url(base_url: &str, year: i32) -> String {
    format!("{}/lau{year}.htm", base_url.trim_end_matches('/'))
}

/// Why a year's table could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse launch table: {0}")]
    Table(#[from] TableError),
}

/// Something that can hand back the raw HTML behind a URL.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches pages over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(encoding::decode_html(&bytes, content_type.as_deref()))
    }
}
