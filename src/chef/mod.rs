//! Chef module for turning the archive page into a channel tree
//!
//! This module contains the run orchestration:
//! - Fetching the page and selecting the language blocks
//! - Per-language lookup, layout classification and segmentation
//! - Tree building with per-language failure isolation
//! - Flushing the skip-list at the end of the run

mod driver;

pub use driver::{prepare_block, preview, Chef, LanguageTopics, RunReport};

use crate::config::{load_config_with_hash, Config};
use crate::video::{VideoResolver, YtdlResolver};
use crate::ChefError;
use std::path::{Path, PathBuf};

/// Loads the configuration file, or the built-in defaults without one
///
/// Returns the configuration with the hash of the file it came from.
pub fn load_chef_config(path: Option<&Path>) -> Result<(Config, Option<String>), ChefError> {
    match path {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash);
            Ok((config, Some(hash)))
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Ok((Config::default(), None))
        }
    }
}

/// Sets up the `yt-dlp` resolver named by the configuration
pub async fn ytdl_resolver(config: &Config) -> Result<YtdlResolver, ChefError> {
    let cache_dir = PathBuf::from(&config.paths.video_cache_dir);
    let resolver = YtdlResolver::new(config.resolver.program.as_deref(), Some(cache_dir)).await?;
    Ok(resolver)
}

/// Runs a complete chef operation
///
/// This is the main entry point for an import. It will:
/// 1. Load the skip-list and recreate the skip report
/// 2. Fetch the archive page
/// 3. Segment every language block into topics
/// 4. Resolve videos and build the channel tree
/// 5. Flush the skip-list
///
/// Writing the channel JSON is left to the caller.
pub async fn run_chef(
    config: Config,
    resolver: Box<dyn VideoResolver>,
) -> Result<RunReport, ChefError> {
    Chef::new(config, resolver)?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RunStats;
    use crate::tree::{Channel, ChannelInfo};
    use crate::video::ResolveError;
    use crate::ConfigError;
    use std::io::Write;

    #[test]
    fn test_load_chef_config_defaults() {
        let (config, hash) = load_chef_config(None).unwrap();
        assert!(hash.is_none());
        assert_eq!(config.channel.id_prefix, "arvind");
    }

    #[test]
    fn test_load_chef_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[channel]\nid-prefix = \"toys\"\n").unwrap();

        let (config, hash) = load_chef_config(Some(file.path())).unwrap();

        assert_eq!(config.channel.id_prefix, "toys");
        assert_eq!(hash.map(|h| h.len()), Some(64));
    }

    #[test]
    fn test_load_chef_config_missing_file() {
        let result = load_chef_config(Some(Path::new("/nonexistent/chef.toml")));
        assert!(matches!(result, Err(ChefError::Config(ConfigError::Io(_)))));
    }

    #[tokio::test]
    async fn test_ytdl_resolver_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.resolver.program = Some("/nonexistent/yt-dlp".to_string());
        config.paths.video_cache_dir = dir.path().join("cache").display().to_string();

        let result = ytdl_resolver(&config).await;

        assert!(matches!(
            result,
            Err(ChefError::Resolver(ResolveError::ProgramNotFound(_)))
        ));
    }

    #[test]
    fn test_run_report_write_channel_error() {
        let dir = tempfile::tempdir().unwrap();
        let report = RunReport {
            channel: Channel::new(ChannelInfo::from(&Config::default().channel)),
            stats: RunStats::new(),
            skip_ids_written: 0,
        };

        // The target is an existing directory, so creating the file fails
        let result = report.write_channel(dir.path());
        assert!(matches!(result, Err(ChefError::Output(_))));

        let path = dir.path().join("channel.json");
        report.write_channel(&path).unwrap();
        assert!(path.exists());
    }
}
