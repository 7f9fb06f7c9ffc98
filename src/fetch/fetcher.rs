//! Cached, retried HTTP fetching
//!
//! This module performs all GET requests for the auditor:
//! - Cache lookup before any network traffic
//! - Bounded retries with a fixed backoff for transient failures
//! - Error classification into timeout / transport / terminal-status kinds

use crate::config::Config;
use crate::fetch::cache::ResponseCache;
use crate::fetch::client::build_http_client;
use crate::AuditError;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP status codes worth a retry; everything else non-2xx is terminal
const RETRYABLE_STATUS: [u16; 4] = [500, 502, 503, 504];

/// Performs cached, retried GET requests
pub struct Fetcher {
    client: Client,
    cache: Option<ResponseCache>,
    retries: u32,
    backoff: Duration,
}

impl Fetcher {
    /// Creates a fetcher from parts; `cache` may be `None` for uncached use
    pub fn new(client: Client, cache: Option<ResponseCache>, retries: u32, backoff: Duration) -> Self {
        Self {
            client,
            cache,
            retries,
            backoff,
        }
    }

    /// Builds a fetcher from the configuration, opening the response cache
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let client = build_http_client(&config.http).map_err(|source| AuditError::Http {
            url: String::new(),
            source,
        })?;
        let cache = ResponseCache::open(Path::new(&config.output.cache_path))?;
        Ok(Self::new(
            client,
            Some(cache),
            config.http.retries,
            Duration::from_millis(config.http.backoff_ms),
        ))
    }

    /// Fetches a page body as text
    ///
    /// A cache hit bypasses the network entirely. On a miss the URL is
    /// fetched with retries and the body is stored before being returned,
    /// so a later run replays it byte-identically.
    pub async fn fetch(&self, url: &str) -> crate::Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url)? {
                debug!("Cache hit for {url}");
                return Ok(body);
            }
        }

        let response = self.get_with_retry(url).await?;
        // reqwest decodes the body per the response charset, defaulting to
        // UTF-8; callers always see a UTF-8 string.
        let body = response.text().await.map_err(|e| classify(url, e))?;

        if let Some(cache) = &self.cache {
            cache.put(url, &body)?;
        }

        Ok(body)
    }

    /// Fetches a binary body, uncached (archive downloads)
    ///
    /// Goes through the same bounded retries as text fetches.
    pub async fn fetch_bytes(&self, url: &str) -> crate::Result<Vec<u8>> {
        let response = self.get_with_retry(url).await?;
        let bytes = response.bytes().await.map_err(|e| classify(url, e))?;
        Ok(bytes.to_vec())
    }

    /// Clears the response cache, returning the number of entries removed
    ///
    /// A pass-through to the cache layer; a fetcher without a cache clears
    /// nothing.
    pub fn clear_cache(&self) -> crate::Result<usize> {
        match &self.cache {
            Some(cache) => Ok(cache.clear()?),
            None => Ok(0),
        }
    }

    async fn get_with_retry(&self, url: &str) -> crate::Result<reqwest::Response> {
        let mut attempt = 0u32;
        loop {
            match self.get_once(url).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.retries && is_retryable(&e) => {
                    attempt += 1;
                    warn!(
                        "Retrying {url} (attempt {attempt}/{}) after: {e}",
                        self.retries
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &str) -> crate::Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

fn classify(url: &str, e: reqwest::Error) -> AuditError {
    if e.is_timeout() {
        AuditError::Timeout {
            url: url.to_string(),
        }
    } else {
        AuditError::Http {
            url: url.to_string(),
            source: e,
        }
    }
}

fn is_retryable(e: &AuditError) -> bool {
    match e {
        AuditError::Timeout { .. } => true,
        AuditError::HttpStatus { status, .. } => RETRYABLE_STATUS.contains(status),
        AuditError::Http { source, .. } => source.is_connect(),
        _ => false,
    }
}
