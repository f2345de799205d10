//! The seam between the chef and the video-hosting platform

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by a resolver
///
/// Every variant means the same thing to the chef: the video could not be
/// resolved and goes to the skip path.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Video unavailable: {0}")]
    Unavailable(String),

    #[error("Metadata program not found: {0}")]
    ProgramNotFound(String),

    #[error("Metadata program failed: {0}")]
    Program(String),

    #[error("Malformed metadata: {0}")]
    Metadata(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One video to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRequest {
    pub url: String,
    /// Raw link text from the archive page
    pub title: String,
    pub language_code: String,
}

/// Hosting-platform metadata for one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVideo {
    pub unique_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub language_code: String,
    /// License as reported by the platform
    pub license: Option<String>,
    pub license_is_permissive: bool,
}

/// Returns true if a platform license string allows redistribution
pub fn is_permissive_license(license: Option<&str>) -> bool {
    license
        .map(|l| l.to_lowercase().contains("creative commons"))
        .unwrap_or(false)
}

/// Resolves video URLs into platform metadata
#[async_trait]
pub trait VideoResolver: Send + Sync {
    /// Fetches the metadata of one video
    async fn resolve(&self, request: &VideoRequest) -> Result<ResolvedVideo, ResolveError>;
}
