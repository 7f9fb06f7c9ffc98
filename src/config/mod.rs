//! Configuration module for pep-audit
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a default, so a config file is optional.
//!
//! # Example
//!
//! ```no_run
//! use pep_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pep-audit.toml")).unwrap();
//! println!("PEP index: {}", config.urls.pep_index);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, UrlsConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
