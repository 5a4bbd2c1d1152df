use crate::config::types::CrawlConfig;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.start_url.trim().is_empty() {
        return Err(ConfigError::EmptyStartUrl);
    }

    // max_depth >= 0 is always true for u32, so no check needed

    if config.threads < 1 {
        return Err(ConfigError::Validation(format!(
            "threads must be at least 1, got {}",
            config.threads
        )));
    }

    if config.fetch_timeout.is_zero() {
        return Err(ConfigError::Validation(
            "fetch_timeout must be greater than zero".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
