use reqwest::header::{ACCEPT_RANGES, AUTHORIZATION, CONTENT_LENGTH, RANGE};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use super::{RangeSource, check_range};
use anyhow::{Result, anyhow, bail};

/// Settings for [`HttpRangeSource`]
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Attempts allowed for timeouts and connection errors
    pub max_retry: u32,
    /// Backoff unit; attempt `n` sleeps `n * retry_backoff`
    pub retry_backoff: Duration,
    pub user_agent: Option<String>,
    /// Sent as `Authorization: Bearer <token>`
    pub bearer_token: Option<String>,
    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub no_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retry: 10,
            retry_backoff: Duration::from_millis(500),
            user_agent: None,
            bearer_token: None,
            no_proxy: false,
        }
    }
}

/// HTTP Range source for remote objects
///
/// The client is async, so the source owns a small current-thread runtime
/// and blocks on it for every fetch. Do not call it from inside another
/// tokio runtime.
pub struct HttpRangeSource {
    runtime: Runtime,
    client: Client,
    url: String,
    size: u64,
    transferred_bytes: AtomicU64,
    config: HttpConfig,
}

impl HttpRangeSource {
    /// Create a new HTTP Range source with default settings
    ///
    /// This will send a HEAD request to verify Range support and get the object size
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_config(url, HttpConfig::default())
    }

    pub fn with_config(url: impl Into<String>, config: HttpConfig) -> Result<Self> {
        let url = url.into();
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| concat!("rangeseek/", env!("CARGO_PKG_VERSION")).to_string());
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent);
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        let size = runtime.block_on(head_object(&client, &url, &config))?;
        debug!(url = %url, size, "opened HTTP range source");

        Ok(Self {
            runtime,
            client,
            url,
            size,
            transferred_bytes: AtomicU64::new(0),
            config,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get total bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }

    async fn fetch(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        let expected_size = (end - start) as usize;
        let mut buf = vec![0u8; expected_size];
        let mut received = 0;
        let mut retry_count = 0;

        while received < expected_size {
            let current_start = start + received as u64;
            let whole_object = current_start == 0 && end == self.size;

            let request = self
                .client
                .get(&self.url)
                .header(RANGE, range_header(current_start, end));
            let result = authorize(request, &self.config).send().await;

            match result {
                Ok(resp) => {
                    let status = resp.status();
                    let accepted = status == StatusCode::PARTIAL_CONTENT
                        || (whole_object && status == StatusCode::OK);
                    if !accepted {
                        bail!("HTTP request failed with status: {}", status);
                    }

                    let bytes = resp.bytes().await?;
                    if bytes.is_empty() {
                        bail!(
                            "Server returned an empty body for range {}..{}",
                            current_start,
                            end
                        );
                    }
                    let chunk_len = bytes.len().min(expected_size - received);
                    buf[received..received + chunk_len].copy_from_slice(&bytes[..chunk_len]);
                    received += chunk_len;

                    self.transferred_bytes
                        .fetch_add(bytes.len() as u64, Ordering::Relaxed);
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.config.max_retry {
                        bail!("Max retries exceeded: {}", e);
                    }
                    warn!(
                        "Connection error, retry {}/{}: {}",
                        retry_count, self.config.max_retry, e
                    );
                    tokio::time::sleep(self.config.retry_backoff * retry_count).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(buf)
    }
}

impl RangeSource for HttpRangeSource {
    fn size(&self) -> u64 {
        self.size
    }

    fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        check_range(start, end, self.size)?;
        if start == end {
            return Ok(Vec::new());
        }
        debug!(url = %self.url, start, end, "fetching range");
        self.runtime.block_on(self.fetch(start, end))
    }
}

/// HEAD the object, check Range support and return its length
async fn head_object(client: &Client, url: &str, config: &HttpConfig) -> Result<u64> {
    let resp = authorize(client.head(url), config).send().await?;

    if !resp.status().is_success() {
        bail!("HTTP request failed with status: {}", resp.status());
    }

    // Check if server supports Range requests
    let accept_ranges = resp
        .headers()
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none");

    if !accept_ranges.contains("bytes") {
        bail!("Remote server does not support Range requests");
    }

    resp.headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow!("Remote server did not return Content-Length"))
}

fn authorize(request: RequestBuilder, config: &HttpConfig) -> RequestBuilder {
    match &config.bearer_token {
        Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
        None => request,
    }
}

/// `Range` header value for the half-open span `[start, end)`; `end > start`
fn range_header(start: u64, end: u64) -> String {
    format!("bytes={}-{}", start, end - 1)
}
