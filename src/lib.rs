//! pep-audit: a PEP lifecycle-status auditor
//!
//! This crate crawls the numerical PEP index, follows each row's link to the
//! PEP detail page, extracts its declared lifecycle status, and reconciles it
//! against the status set implied by the row's category code. Individual row
//! failures never abort a pass; they are collected and reported at the end.

pub mod config;
pub mod docs;
pub mod fetch;
pub mod html;
pub mod output;
pub mod pep;

use thiserror::Error;

/// Main error type for pep-audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request failed for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Element not found: <{tag}>{attrs}")]
    ElementNotFound { tag: String, attrs: String },

    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// True for transport-level failures (connection, timeout, HTTP status).
    ///
    /// Once one of these reaches a caller the transport retries are already
    /// exhausted; the failure is terminal for the row it belongs to.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            AuditError::Http { .. } | AuditError::Timeout { .. } | AuditError::HttpStatus { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for pep-audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::Fetcher;
pub use pep::{audit_peps, Discrepancy, RunResult, StatusHistogram};
