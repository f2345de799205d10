use crate::config::types::{BlockRule, ChannelConfig, Config, LanguageEntry, SourceConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_block_rule(&config.page)?;
    validate_paths_config(&config.paths)?;
    validate_channel_config(&config.channel)?;
    validate_language_entries(&config.languages)?;
    Ok(())
}

/// Validates the archive page source
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid source url '{}': {}", config.url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Source url '{}' must use HTTP or HTTPS",
            config.url
        )));
    }

    if config.video_domains.is_empty() {
        return Err(ConfigError::Validation(
            "video-domains must list at least one host".to_string(),
        ));
    }

    for domain in &config.video_domains {
        if domain.trim().is_empty() || domain.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Invalid video domain '{}'",
                domain
            )));
        }
    }

    Ok(())
}

/// Validates the language block rule
fn validate_block_rule(rule: &BlockRule) -> Result<(), ConfigError> {
    match rule {
        BlockRule::Positional {
            container,
            stride,
            count,
            ..
        } => {
            validate_selector(container)?;

            if *stride < 1 {
                return Err(ConfigError::Validation(format!(
                    "page stride must be >= 1, got {}",
                    stride
                )));
            }

            if *count < 1 {
                return Err(ConfigError::Validation(format!(
                    "page count must be >= 1, got {}",
                    count
                )));
            }
        }
        BlockRule::Selector { selector } => validate_selector(selector)?,
    }

    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

/// Validates output and cache paths
fn validate_paths_config(config: &crate::config::types::PathsConfig) -> Result<(), ConfigError> {
    for (key, value) in [
        ("skip-cache", &config.skip_cache),
        ("skip-report", &config.skip_report),
        ("output", &config.output),
        ("video-cache-dir", &config.video_cache_dir),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    Ok(())
}

/// Validates channel metadata
fn validate_channel_config(config: &ChannelConfig) -> Result<(), ConfigError> {
    if config.title.trim().is_empty() {
        return Err(ConfigError::Validation(
            "channel title cannot be empty".to_string(),
        ));
    }

    if config.source_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "channel source-id cannot be empty".to_string(),
        ));
    }

    if config.id_prefix.is_empty()
        || !config
            .id_prefix
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "id-prefix must be non-empty and contain only alphanumeric characters, hyphens or underscores, got '{}'",
            config.id_prefix
        )));
    }

    Ok(())
}

/// Validates extra language table entries
fn validate_language_entries(entries: &[LanguageEntry]) -> Result<(), ConfigError> {
    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "language name cannot be empty".to_string(),
            ));
        }

        if entry.code.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "language '{}' must have a code",
                entry.name
            )));
        }
    }

    Ok(())
}
