use crate::config::types::{Config, CrawlerConfig, OutputConfig, SelectorConfig, UserAgentConfig};
use crate::extract::CompiledSelectors;
use crate::ConfigError;
use url::Url;

const MAX_CONCURRENT_FETCHES: u32 = 16;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_selectors(&config.selectors)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let category_url = config
        .category_url
        .as_deref()
        .ok_or_else(|| ConfigError::Validation("category_url is required".to_string()))?;
    validate_http_url("category_url", category_url)?;

    let base = validate_http_url("base_url", &config.base_url)?;
    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must include a host, got '{}'",
            config.base_url
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_articles < 1 {
        return Err(ConfigError::Validation(format!(
            "max_articles must be >= 1, got {}",
            config.max_articles
        )));
    }

    if !config.rate_limit_delay.is_finite() || config.rate_limit_delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "rate_limit_delay must be a non-negative number of seconds, got {}",
            config.rate_limit_delay
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Parses a URL and requires an http or https scheme
fn validate_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field, value
        )));
    }

    Ok(url)
}

/// Validates request header configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Both values end up in request headers
    for (field, value) in [
        ("user_agent", &config.user_agent),
        ("accept_language", &config.accept_language),
    ] {
        if value.chars().any(|c| c.is_control()) {
            return Err(ConfigError::Validation(format!(
                "{} cannot contain control characters",
                field
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json_path cannot be empty".to_string(),
        ));
    }

    if matches!(config.database_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "database_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Checks that every selector compiles
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    CompiledSelectors::compile(config).map(|_| ())
}
