//! Configuration validation
//!
//! Checks a parsed [`Config`] for values that would make a run misbehave
//! before any network traffic happens.

use crate::config::Config;
use crate::ConfigError;
use url::Url;

/// Validates a configuration
///
/// # Rules
///
/// - Both source URLs must parse and use the http or https scheme
/// - The per-request timeout must be non-zero
/// - The user agent must be non-empty
/// - Cache path and output directories must be non-empty
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_url(&config.urls.docs_base, "urls.docs-base")?;
    validate_url(&config.urls.pep_index, "urls.pep-index")?;

    if config.http.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "http.timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.http.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "http.user-agent must not be empty".to_string(),
        ));
    }

    for (value, key) in [
        (&config.output.cache_path, "output.cache-path"),
        (&config.output.results_dir, "output.results-dir"),
        (&config.output.downloads_dir, "output.downloads-dir"),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{key} must not be empty")));
        }
    }

    Ok(())
}

fn validate_url(value: &str, key: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("{key}: {value} ({e})")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{key}: unsupported scheme {}",
            url.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_index_url() {
        let mut config = Config::default();
        config.urls.pep_index = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.urls.docs_base = "ftp://docs.python.org/3/".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_empty_results_dir() {
        let mut config = Config::default();
        config.output.results_dir = String::new();
        assert!(validate(&config).is_err());
    }
}
