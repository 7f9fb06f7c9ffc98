use serde::Deserialize;

/// Main configuration structure for pep-audit
///
/// Every section has full defaults, so the tool runs without a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub urls: UrlsConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Source URLs for the documentation site and the PEP index
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UrlsConfig {
    /// Base URL of the Python documentation
    #[serde(rename = "docs-base")]
    pub docs_base: String,

    /// URL of the numerical PEP index page
    #[serde(rename = "pep-index")]
    pub pep_index: String,
}

/// HTTP transport tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Number of retries after a retryable failure
    pub retries: u32,

    /// Fixed delay between retries, in milliseconds
    #[serde(rename = "backoff-ms")]
    pub backoff_ms: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

/// Filesystem locations for cache and rendered output
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite response cache
    #[serde(rename = "cache-path")]
    pub cache_path: String,

    /// Directory for CSV result files
    #[serde(rename = "results-dir")]
    pub results_dir: String,

    /// Directory for downloaded documentation archives
    #[serde(rename = "downloads-dir")]
    pub downloads_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: UrlsConfig::default(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            docs_base: "https://docs.python.org/3/".to_string(),
            pep_index: "https://peps.python.org/numerical".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            retries: 3,
            backoff_ms: 300,
            user_agent: format!("pep-audit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cache_path: "./pep_audit_cache.db".to_string(),
            results_dir: "./results".to_string(),
            downloads_dir: "./downloads".to_string(),
        }
    }
}
