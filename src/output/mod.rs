//! Output module for the finished channel tree
//!
//! This module handles:
//! - Writing the channel tree as JSON for the uploader
//! - Printing a topic-map preview for dry runs
//! - Recording run statistics

pub mod stats;

pub use stats::{print_statistics, RunStats};

use crate::language::Layout;
use crate::scrape::TopicMap;
use crate::tree::Channel;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the channel tree as pretty-printed JSON
///
/// Parent directories are created as needed.
pub fn write_channel(channel: &Channel, output_path: &Path) -> OutputResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, channel)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(
        "Wrote channel with {} videos to {}",
        channel.video_count(),
        output_path.display()
    );
    Ok(())
}

/// Formats one language's topic map for a dry run
pub fn format_topic_map(language: &str, layout: Layout, topics: &TopicMap) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}, {} topics, {} videos)\n",
        language,
        layout,
        topics.len(),
        topics.video_count()
    ));
    for (topic, videos) in topics.iter() {
        let name = if topic.is_empty() { "(untitled)" } else { topic };
        out.push_str(&format!("  - {}: {} videos\n", name, videos.len()));
    }
    out
}
