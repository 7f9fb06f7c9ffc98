//! Fetch/cache module
//!
//! This module contains all network access for the auditor:
//! - HTTP client construction with user agent and timeouts
//! - Cached, retried GET requests
//! - The persistent SQLite response cache

mod cache;
mod client;
mod fetcher;

pub use cache::ResponseCache;
pub use client::build_http_client;
pub use fetcher::Fetcher;
