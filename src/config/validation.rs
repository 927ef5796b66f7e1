use crate::config::types::{Config, FetcherConfig, OutputConfig, TrackerConfig};
use crate::extractor::BodyCharset;
use crate::{ConfigError, ConfigResult};

const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_CONCURRENT_FETCHES: usize = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_fetcher_config(&config.fetcher)?;
    validate_tracker_config(&config.tracker)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    validate_timeout("connect_timeout_secs", config.connect_timeout_secs)?;
    validate_timeout("read_timeout_secs", config.read_timeout_secs)?;

    if BodyCharset::for_label(&config.default_charset).is_none() {
        return Err(ConfigError::Validation(format!(
            "default_charset '{}' is not a known encoding",
            config.default_charset
        )));
    }

    Ok(())
}

fn validate_timeout(name: &str, secs: u64) -> ConfigResult<()> {
    if secs < 1 || secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_TIMEOUT_SECS, secs
        )));
    }
    Ok(())
}

/// Validates tracker configuration
fn validate_tracker_config(config: &TrackerConfig) -> ConfigResult<()> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if let Some(path) = &config.report_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "report_path cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}
