//! Waffle API client.
//!
//! Async HTTP client using `reqwest`. Authorization comes from headers the
//! web view already sent, so every call takes its header map explicitly.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::cards::{count_open_pull_requests, parse_cards, Card};
use crate::config::app::DEFAULT_API_BASE_URL;
use crate::error::{WaffleBarError, WaffleBarResult};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Headers the browser sets itself; copying them would confuse the server.
const SKIPPED_HEADERS: &[&str] = &["host", "content-length", "connection", "cookie"];

/// Waffle API client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WaffleClient {
    http: reqwest::Client,
    base_url: String,
}

impl WaffleClient {
    /// Creates a client for the given API root.
    pub fn new(base_url: &str) -> WaffleBarResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("waffle-bar/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Same connection pool, different API root.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// `{base}/{project}/cards`. The project keeps its `owner/repo` slash.
    pub fn cards_url(&self, project: &str) -> String {
        format!("{}/{}/cards", self.base_url, project.trim_matches('/'))
    }

    /// Fetches all cards of a project.
    pub async fn fetch_cards(
        &self,
        project: &str,
        headers: &HashMap<String, String>,
    ) -> WaffleBarResult<Vec<Card>> {
        let resp = self
            .http
            .get(self.cards_url(project))
            .headers(to_header_map(headers))
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WaffleBarError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        Ok(parse_cards(&body)?)
    }

    /// Number of open pull requests on a project's board.
    pub async fn open_pull_request_count(
        &self,
        project: &str,
        headers: &HashMap<String, String>,
    ) -> WaffleBarResult<u32> {
        let cards = self.fetch_cards(project, headers).await?;
        Ok(count_open_pull_requests(&cards))
    }
}

impl Default for WaffleClient {
    fn default() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Converts captured headers, dropping names or values reqwest rejects.
fn to_header_map(headers: &HashMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        if SKIPPED_HEADERS.iter().any(|s| name.eq_ignore_ascii_case(s)) {
            continue;
        }
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            },
            _ => log::debug!("[API] skipping unusable header {:?}", name),
        }
    }
    map
}
