//! Configuration module for the chef
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use toybox_chef::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("chef.toml")).unwrap();
//! println!("Scraping: {}", config.source.url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BlockRule, ChannelConfig, Config, FetchConfig, LanguageEntry, LayoutConfig, PathsConfig,
    ResolverConfig, SourceConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
