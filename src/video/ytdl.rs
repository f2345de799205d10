//! Resolver backed by the `yt-dlp` / `youtube-dl` command-line programs

use crate::video::link::youtube_id;
use crate::video::resolver::{
    is_permissive_license, ResolveError, ResolvedVideo, VideoRequest, VideoResolver,
};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

const YT_DLP: &str = "yt-dlp";
const YT_DL: &str = "youtube-dl";

/// Resolves videos by asking `yt-dlp` for their JSON info
///
/// Each video's raw JSON is cached as `<cache_dir>/<id>.json` and reused on
/// later runs until the cache is cleared.
pub struct YtdlResolver {
    program: String,
    cache_dir: Option<PathBuf>,
}

impl YtdlResolver {
    /// Finds a usable metadata program
    ///
    /// An explicit `program` is checked alone; otherwise `yt-dlp` then
    /// `youtube-dl` are probed with `--version`.
    pub async fn new(
        program: Option<&str>,
        cache_dir: Option<PathBuf>,
    ) -> Result<Self, ResolveError> {
        let candidates: Vec<&str> = match program {
            Some(p) => vec![p],
            None => vec![YT_DLP, YT_DL],
        };

        for candidate in candidates {
            if probe(candidate).await {
                tracing::info!("Using metadata program: {}", candidate);
                if let Some(dir) = &cache_dir {
                    tokio::fs::create_dir_all(dir).await?;
                }
                return Ok(Self {
                    program: candidate.to_string(),
                    cache_dir,
                });
            }
        }

        Err(ResolveError::ProgramNotFound(
            program.unwrap_or("yt-dlp or youtube-dl").to_string(),
        ))
    }

    fn cache_path(&self, id: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", id)))
    }

    async fn read_cached(&self, id: &str) -> Option<String> {
        let path = self.cache_path(id)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(json) => {
                tracing::debug!("Video info cache hit: {}", path.display());
                Some(json)
            }
            Err(_) => None,
        }
    }

    async fn write_cached(&self, id: &str, json: &str) {
        if let Some(path) = self.cache_path(id) {
            if let Err(e) = tokio::fs::write(&path, json).await {
                tracing::warn!("Failed to cache video info {}: {}", path.display(), e);
            }
        }
    }

    async fn fetch_info(&self, url: &str) -> Result<String, ResolveError> {
        let output = Command::new(&self.program)
            .arg("-q")
            .arg("--skip-download")
            .arg("-j")
            .arg("--")
            .arg(url)
            .output()
            .await?;

        check_output(&output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VideoResolver for YtdlResolver {
    async fn resolve(&self, request: &VideoRequest) -> Result<ResolvedVideo, ResolveError> {
        let id = youtube_id(&request.url);

        let cached = match &id {
            Some(id) => self.read_cached(id).await,
            None => None,
        };

        if let Some(json) = cached {
            return parse_metadata(&json, &request.language_code);
        }

        let json = self.fetch_info(&request.url).await?;
        let resolved = parse_metadata(&json, &request.language_code)?;
        if let Some(id) = &id {
            self.write_cached(id, &json).await;
        }
        Ok(resolved)
    }
}

async fn probe(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .await
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Maps a failed run to the matching error
///
/// An `ERROR:` line mentioning "unavailable" (private, removed or blocked
/// videos) becomes [`ResolveError::Unavailable`].
fn check_output(output: &Output) -> Result<(), ResolveError> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let error_line = stderr.lines().find(|line| line.starts_with("ERROR:"));

    if let Some(line) = error_line {
        if line.to_lowercase().contains("unavailable") {
            return Err(ResolveError::Unavailable(line.to_string()));
        }
    }

    if output.status.success() {
        Ok(())
    } else {
        Err(ResolveError::Program(
            error_line
                .map(str::to_string)
                .unwrap_or_else(|| format!("exited with {}", output.status)),
        ))
    }
}

fn parse_metadata(json: &str, language_code: &str) -> Result<ResolvedVideo, ResolveError> {
    parse_info(json, language_code).map_err(|e| ResolveError::Metadata(format!("{:#}", e)))
}

/// Extracts the fields the chef needs from a video info JSON document
fn parse_info(json: &str, language_code: &str) -> anyhow::Result<ResolvedVideo> {
    let value =
        serde_json::from_str::<serde_json::Value>(json).context("Could not parse json")?;
    let object = value.as_object().context("JSON is not an object")?;

    let get_str = |key: &str| object.get(key).and_then(|v| v.as_str()).map(str::to_string);

    let unique_id = get_str("id").context("Key 'id' not found in JSON")?;
    let title = get_str("title").context("Key 'title' not found in JSON")?;
    let license = get_str("license");

    Ok(ResolvedVideo {
        unique_id,
        title,
        description: get_str("description").unwrap_or_default(),
        thumbnail: get_str("thumbnail"),
        language_code: language_code.to_string(),
        license_is_permissive: is_permissive_license(license.as_deref()),
        license,
    })
}

/// Deletes every cached video info document
pub fn clear_cache(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)
}
