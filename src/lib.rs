//! Toybox Chef: an importer for the Arvind Gupta Toys film archive
//!
//! This crate scrapes the archive's film page, groups the linked videos by
//! language and topic, resolves every video against the hosting platform,
//! drops videos without a permissive license, and emits a
//! language → topic → video content tree for channel ingestion.

pub mod chef;
pub mod config;
pub mod language;
pub mod output;
pub mod scrape;
pub mod skip;
pub mod tree;
pub mod video;

use thiserror::Error;

/// Main error type for chef operations
#[derive(Debug, Error)]
pub enum ChefError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Page structure error: {0}")]
    PageStructure(String),

    #[error("Unknown language block id: {0}")]
    UnknownLanguage(String),

    #[error("Resolver error: {0}")]
    Resolver(#[from] video::ResolveError),

    #[error("Skip list error: {0}")]
    SkipStore(#[from] skip::SkipStoreError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

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

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for chef operations
pub type Result<T> = std::result::Result<T, ChefError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use chef::{load_chef_config, run_chef, Chef, RunReport};
pub use config::Config;
pub use language::{Language, LanguageTable, Layout};
pub use scrape::{segment, BlockNode, TopicMap, VideoRef};
pub use tree::{Channel, Node};
pub use video::{normalize_title, ResolvedVideo, VideoResolver};
