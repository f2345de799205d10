use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash is recorded in the channel output so two runs can be told apart
/// when their configuration differs.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlockRule;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[source]
url = "https://films.example.org/films.html"
video-domains = ["youtube.com"]

[page]
strategy = "selector"
selector = "div.language[id]"

[layouts]
single-topic = ["nepali"]
multi-language = ["russian", "french"]

[paths]
skip-cache = "skip.json"
skip-report = "skip.txt"
output = "out/channel.json"
video-cache-dir = "cache"

[channel]
title = "Test Channel"
source-id = "test-channel"
id-prefix = "test"

[[language]]
name = "klingon"
code = "tlh"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.source.url, "https://films.example.org/films.html");
        assert_eq!(config.source.video_domains, vec!["youtube.com".to_string()]);
        assert_eq!(
            config.page,
            BlockRule::Selector {
                selector: "div.language[id]".to_string()
            }
        );
        assert_eq!(config.layouts.single_topic, vec!["nepali".to_string()]);
        assert_eq!(config.paths.skip_cache, "skip.json");
        assert_eq!(config.channel.id_prefix, "test");
        // Unset keys of a present section keep their defaults
        assert_eq!(config.channel.license, "CC BY-NC");
        assert_eq!(config.languages.len(), 1);
        assert_eq!(config.languages[0].code, "tlh");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.source.url, "http://www.arvindguptatoys.com/films.html");
        assert_eq!(
            config.page,
            BlockRule::Positional {
                container: "body > div".to_string(),
                section: 5,
                start: 7,
                stride: 4,
                count: 23,
            }
        );
        assert!(config
            .layouts
            .multi_language
            .contains(&"russian".to_string()));
        assert_eq!(config.channel.id_prefix, "arvind");
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        let config = parse_config(include_str!("../../chef.toml")).unwrap();
        let defaults = Config::default();

        assert_eq!(config.source.url, defaults.source.url);
        assert_eq!(config.page, defaults.page);
        assert_eq!(config.layouts.single_topic, defaults.layouts.single_topic);
        assert_eq!(config.paths.output, defaults.paths.output);
        assert_eq!(config.channel.source_id, defaults.channel.source_id);
        assert!(config.resolver.program.is_none());
        assert!(config.languages.is_empty());
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/chef.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[page]
strategy = "positional"
container = "body > div"
section = 5
start = 7
stride = 0
count = 23
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
