//! HTTP client construction

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client from the transport configuration
///
/// The per-request timeout bounds every GET; a request exceeding it fails
/// with a timeout error rather than hanging the run.
///
/// # Arguments
///
/// * `config` - The HTTP transport configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}
