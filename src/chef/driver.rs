//! Channel driver - main chef orchestration logic
//!
//! This module walks the language blocks of the archive page and, for each
//! one, looks up its language, classifies its layout, segments it into
//! topics and hands the topics to the tree builder. A failing language is
//! logged and the run moves on to the next one.

use crate::config::Config;
use crate::language::{Language, LanguageTable, Layout};
use crate::output::{format_topic_map, write_channel, RunStats};
use crate::scrape::{build_http_client, extract_blocks, fetch_page, segment, LanguageBlock, TopicMap};
use crate::skip::{SkipList, SkipReport};
use crate::tree::{Channel, ChannelInfo, TreeBuilder};
use crate::video::VideoResolver;
use crate::ChefError;
use reqwest::Client;
use std::path::Path;

/// A language block ready for tree building
#[derive(Debug, Clone)]
pub struct LanguageTopics {
    pub language: Language,
    pub layout: Layout,
    pub topics: TopicMap,
}

/// The result of a complete run
#[derive(Debug)]
pub struct RunReport {
    pub channel: Channel,
    pub stats: RunStats,

    /// Skip ids written by the final flush (this run's plus earlier ones)
    pub skip_ids_written: usize,
}

impl RunReport {
    /// Writes the channel tree as JSON
    pub fn write_channel(&self, path: &Path) -> Result<(), ChefError> {
        write_channel(&self.channel, path)?;
        Ok(())
    }
}

/// Main chef structure
pub struct Chef {
    config: Config,
    client: Client,
    resolver: Box<dyn VideoResolver>,
    languages: LanguageTable,
    skip_list: SkipList,
    report: SkipReport,
    stats: RunStats,
    config_hash: Option<String>,
}

impl Chef {
    /// Creates a chef ready to run
    ///
    /// Loads the persisted skip-list and recreates the skip report, so the
    /// report only ever holds the lines of a single run.
    pub fn new(config: Config, resolver: Box<dyn VideoResolver>) -> Result<Self, ChefError> {
        let client = build_http_client(&config.fetch)?;
        let languages = LanguageTable::with_entries(&config.languages);

        let skip_list = SkipList::load(&config.paths.skip_cache);
        tracing::info!(
            "Loaded {} skipped video ids from {}",
            skip_list.persisted_len(),
            skip_list.path().display()
        );
        let report = SkipReport::create(&config.paths.skip_report)?;

        Ok(Self {
            config,
            client,
            resolver,
            languages,
            skip_list,
            report,
            stats: RunStats::new(),
            config_hash: None,
        })
    }

    /// Records the configuration hash in the channel output
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Runs the chef to completion
    ///
    /// Only a failed page fetch, an unusable page, or a failed skip-list
    /// flush are fatal. Everything that goes wrong with a single language is
    /// logged and counted in the statistics.
    pub async fn run(mut self) -> Result<RunReport, ChefError> {
        let started = std::time::Instant::now();
        let html = fetch_page(&self.client, &self.config.source.url).await?;

        let blocks = extract_blocks(&html, &self.config.page)?;
        tracing::info!("Found {} language blocks", blocks.len());

        let mut channel = Channel::new(ChannelInfo::from(&self.config.channel));
        channel.config_hash = self.config_hash.clone();

        for block in blocks {
            let prepared = match block {
                Ok(block) => prepare_block(block, &self.languages, &self.config),
                Err(e) => Err(e),
            };

            let language_topics = match prepared {
                Ok(Some(prepared)) => prepared,
                Ok(None) => {
                    self.stats.languages_skipped += 1;
                    continue;
                }
                Err(ChefError::UnknownLanguage(name)) => {
                    tracing::warn!("No language matches block '{}', skipping", name);
                    self.stats.languages_skipped += 1;
                    continue;
                }
                Err(e) => {
                    tracing::error!("Failed to process language block: {}", e);
                    self.stats.languages_failed += 1;
                    continue;
                }
            };

            let LanguageTopics {
                language,
                layout,
                topics,
            } = language_topics;
            tracing::info!(
                "== Processing {} ({} layout, {} topics)",
                language.name,
                layout,
                topics.len()
            );

            let mut builder = TreeBuilder {
                resolver: &*self.resolver,
                channel: &self.config.channel,
                languages: &self.languages,
                skip_list: &mut self.skip_list,
                report: &mut self.report,
                stats: &mut self.stats,
            };
            let nodes = builder.build(topics, layout, &language).await;

            if nodes.is_empty() {
                tracing::warn!("Language {} produced no nodes", language.name);
            } else {
                self.stats.languages_processed += 1;
            }
            for node in nodes {
                channel.add_child(node);
            }
            tracing::info!("Finished {}", language.name);
        }

        let skip_ids_written = self.skip_list.flush()?;
        tracing::info!(
            "Run completed: {} videos in {} top-level nodes, {} skipped this run, in {:?}",
            channel.video_count(),
            channel.children.len(),
            self.skip_list.pending().len(),
            started.elapsed()
        );

        Ok(RunReport {
            channel,
            stats: self.stats,
            skip_ids_written,
        })
    }
}

/// Looks up the language of a block, classifies its layout and segments it
///
/// Returns `Ok(None)` for a block without an `id` attribute.
pub fn prepare_block(
    block: LanguageBlock,
    languages: &LanguageTable,
    config: &Config,
) -> Result<Option<LanguageTopics>, ChefError> {
    let Some(id) = block.id else {
        tracing::warn!("Language block in slot {} has no id, skipping", block.slot);
        return Ok(None);
    };

    let language = languages
        .lookup(&id)
        .cloned()
        .ok_or(ChefError::UnknownLanguage(id))?;
    let layout = Layout::classify(&language.name, &config.layouts);
    let topics = segment(&block.nodes, layout, &config.source.video_domains);

    Ok(Some(LanguageTopics {
        language,
        layout,
        topics,
    }))
}

/// Fetches and segments the page without resolving any video
///
/// Returns the preview text printed by `--dry-run`. Nothing is written to
/// disk.
pub async fn preview(config: &Config) -> Result<String, ChefError> {
    let client = build_http_client(&config.fetch)?;
    let languages = LanguageTable::with_entries(&config.languages);
    let html = fetch_page(&client, &config.source.url).await?;

    let mut out = String::new();
    for block in extract_blocks(&html, &config.page)? {
        let prepared = block.and_then(|block| prepare_block(block, &languages, config));
        match prepared {
            Ok(Some(topics)) => out.push_str(&format_topic_map(
                &topics.language.display_name(),
                topics.layout,
                &topics.topics,
            )),
            Ok(None) => {}
            Err(e) => out.push_str(&format!("skipped: {}\n", e)),
        }
    }
    Ok(out)
}
