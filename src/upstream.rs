// GitHub gists HTTP client.
// One GET per call, bounded by a timeout, no retries; failures come back as values.

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::metrics::UPSTREAM_LATENCY;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_PER_PAGE: u32 = 100;
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Result of one upstream call, before any classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    /// The server answered. `body` is parsed JSON for 200 and `Null` otherwise.
    Ok { status: u16, body: Value },
    TimedOut,
    TransportError(String),
}

/// Anything that can list a user's gists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GistSource: Send + Sync {
    async fn fetch_raw(&self, username: &str, per_page: u32, page: u64) -> RawResult;
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gist-gateway/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    // {base}/users/{username}/gists?per_page=..&page=..
    pub fn gists_url(&self, username: &str, per_page: u32, page: u64) -> Result<Url, String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| format!("invalid base url: {}", self.base_url))?
            .pop_if_empty()
            .extend(["users", username, "gists"]);
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.min(MAX_PER_PAGE).to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

#[async_trait]
impl GistSource for GitHubClient {
    async fn fetch_raw(&self, username: &str, per_page: u32, page: u64) -> RawResult {
        let url = match self.gists_url(username, per_page, page) {
            Ok(url) => url,
            Err(e) => return RawResult::TransportError(e),
        };

        tracing::info!(username, page, per_page, "fetching gists");
        let start_time = Instant::now();

        let result = self.client.get(url).send().await;
        let response = match result {
            Ok(res) => res,
            Err(e) => return transport_failure(e, username),
        };

        let status = response.status();
        if status != StatusCode::OK {
            UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());
            tracing::warn!(username, status = status.as_u16(), "GitHub returned non-200");
            return RawResult::Ok {
                status: status.as_u16(),
                body: Value::Null,
            };
        }

        let body = response.json::<Value>().await;
        UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());

        match body {
            Ok(body) => RawResult::Ok {
                status: status.as_u16(),
                body,
            },
            Err(e) => transport_failure(e, username),
        }
    }
}

fn transport_failure(e: reqwest::Error, username: &str) -> RawResult {
    if e.is_timeout() {
        tracing::warn!(username, "GitHub request timed out");
        RawResult::TimedOut
    } else {
        tracing::error!(username, error = %e, "error fetching gists");
        RawResult::TransportError(e.to_string())
    }
}
