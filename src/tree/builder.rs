//! Topic-tree builder
//!
//! Turns one language's topic map into content nodes, resolving every video
//! on the way. Videos that cannot be resolved, or whose license does not
//! allow redistribution, go to the skip-list and the skip report instead of
//! the tree.

use crate::config::ChannelConfig;
use crate::language::{capitalize, Language, LanguageTable, Layout};
use crate::output::RunStats;
use crate::scrape::{TopicMap, VideoRef};
use crate::skip::{SkipList, SkipReport};
use crate::tree::{License, Node, TopicNode, VideoFile, VideoNode};
use crate::video::{normalize_title, youtube_id, VideoRequest, VideoResolver};
use std::collections::HashSet;

/// What happened to one video reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOutcome {
    /// Resolved with a permissive license
    Added(VideoNode),

    /// Already added under the same parent
    Duplicate { source_id: String },

    /// Could not be resolved, or the license is not permissive
    Skipped { id: String, reason: String },

    /// Excluded by an earlier run's skip-list
    PreviouslySkipped { id: String },

    /// The URL carries no recognizable video id
    Unidentified,
}

/// Builds content nodes for one language at a time
///
/// Borrows the run-wide state (skip-list, report, statistics) owned by the
/// driver, so everything recorded here is flushed once at the end of the run.
pub struct TreeBuilder<'a> {
    pub resolver: &'a dyn VideoResolver,
    pub channel: &'a ChannelConfig,
    pub languages: &'a LanguageTable,
    pub skip_list: &'a mut SkipList,
    pub report: &'a mut SkipReport,
    pub stats: &'a mut RunStats,
}

impl<'a> TreeBuilder<'a> {
    /// Builds the top-level nodes for one language block
    ///
    /// - [`Layout::Standard`]: one language node holding one topic node per
    ///   map entry.
    /// - [`Layout::Single`]: one language node holding every video directly,
    ///   in map order.
    /// - [`Layout::MultiLanguage`]: the map keys are language tags; each known
    ///   tag becomes its own top-level language node laid out as a single
    ///   list. Unknown tags are skipped.
    pub async fn build(&mut self, topics: TopicMap, layout: Layout, language: &Language) -> Vec<Node> {
        match layout {
            Layout::Standard => {
                let mut language_node = self.language_node(&language.display_name(), language);
                for (topic, videos) in topics {
                    let mut topic_node = TopicNode::new(
                        topic.clone(),
                        format!("{}-child-topic-{}", self.channel.id_prefix, topic),
                    );
                    self.add_videos(&mut topic_node, &videos, &topic, language)
                        .await;
                    self.stats.topics += 1;
                    language_node.add_child(Node::Topic(topic_node));
                }
                vec![Node::Topic(language_node)]
            }

            Layout::Single => {
                let mut language_node = self.language_node(&language.display_name(), language);
                for (topic, videos) in topics {
                    self.add_videos(&mut language_node, &videos, &topic, language)
                        .await;
                }
                vec![Node::Topic(language_node)]
            }

            Layout::MultiLanguage => {
                let mut nodes = Vec::new();
                for (tag, videos) in topics {
                    let sub_language = match self.languages.lookup(&tag) {
                        Some(found) => found.clone(),
                        None => {
                            tracing::warn!(
                                "Unknown language tag '{}' in {} block, skipping {} videos",
                                tag,
                                language.name,
                                videos.len()
                            );
                            self.stats.languages_skipped += 1;
                            continue;
                        }
                    };

                    let mut parent = self.language_node(&capitalize(&tag), &sub_language);
                    self.add_videos(&mut parent, &videos, "", &sub_language)
                        .await;
                    tracing::info!("Finished {} ({} videos)", tag, parent.video_count());
                    nodes.push(Node::Topic(parent));
                }
                nodes
            }
        }
    }

    fn language_node(&self, title: &str, language: &Language) -> TopicNode {
        TopicNode::new(
            title,
            format!(
                "{}-parent-topic-{}",
                self.channel.id_prefix,
                language.name.to_lowercase()
            ),
        )
    }

    /// Resolves `videos` in order and adds the accepted ones under `parent`
    ///
    /// A video whose source id is already a child of `parent` is a
    /// duplicate, including one added by an earlier call for the same parent.
    async fn add_videos(
        &mut self,
        parent: &mut TopicNode,
        videos: &[VideoRef],
        topic: &str,
        language: &Language,
    ) {
        let mut seen: HashSet<String> = parent
            .children
            .iter()
            .filter_map(|child| child.as_video())
            .map(|video| video.source_id.clone())
            .collect();

        for video in videos {
            match self.process_video(video, topic, language, &seen).await {
                VideoOutcome::Added(node) => {
                    seen.insert(node.source_id.clone());
                    self.stats.videos_added += 1;
                    parent.add_child(Node::Video(node));
                }
                VideoOutcome::Duplicate { source_id } => {
                    tracing::info!("Skipping duplicate video: {} ({})", video.url, source_id);
                    self.stats.videos_duplicate += 1;
                }
                VideoOutcome::Skipped { id, reason } => {
                    tracing::info!("Skipping video {} ({}): {}", id, video.url, reason);
                    self.stats.videos_skipped += 1;
                }
                VideoOutcome::PreviouslySkipped { id } => {
                    tracing::debug!("Video {} is in the skip-list", id);
                    self.stats.videos_previously_skipped += 1;
                }
                VideoOutcome::Unidentified => {
                    tracing::debug!("No video id in {}", video.url);
                    self.stats.videos_unidentified += 1;
                }
            }
        }
    }

    /// Resolves one video reference and records skips
    pub async fn process_video(
        &mut self,
        video: &VideoRef,
        topic: &str,
        language: &Language,
        seen: &HashSet<String>,
    ) -> VideoOutcome {
        let Some(id) = youtube_id(&video.url) else {
            return VideoOutcome::Unidentified;
        };

        if self.skip_list.contains(&id) {
            return VideoOutcome::PreviouslySkipped { id };
        }

        let request = VideoRequest {
            url: video.url.clone(),
            title: video.title.clone(),
            language_code: language.code.clone(),
        };

        let resolved = match self.resolver.resolve(&request).await {
            Ok(resolved) => resolved,
            Err(e) => {
                self.record_skip(&id, language, topic, &video.url, "");
                return VideoOutcome::Skipped {
                    id,
                    reason: e.to_string(),
                };
            }
        };

        if !resolved.license_is_permissive {
            let license = resolved.license.clone().unwrap_or_default();
            self.record_skip(&resolved.unique_id, language, topic, &video.url, &license);
            return VideoOutcome::Skipped {
                id: resolved.unique_id,
                reason: format!("license not permissive: {:?}", license),
            };
        }

        let source_id = format!("{}-video-{}", self.channel.id_prefix, resolved.unique_id);
        if seen.contains(&source_id) {
            return VideoOutcome::Duplicate { source_id };
        }

        let raw_title = if video.title.trim().is_empty() {
            &resolved.title
        } else {
            &video.title
        };

        VideoOutcome::Added(VideoNode {
            source_id,
            title: normalize_title(raw_title, &language.name),
            description: resolved.description,
            author: self.channel.author.clone(),
            thumbnail: resolved.thumbnail,
            license: License {
                id: self.channel.license.clone(),
                copyright_holder: self.channel.copyright_holder.clone(),
            },
            files: vec![VideoFile::youtube(
                &resolved.unique_id,
                &resolved.language_code,
            )],
        })
    }

    fn record_skip(&mut self, id: &str, language: &Language, topic: &str, url: &str, license: &str) {
        self.skip_list.record(id);
        if let Err(e) = self.report.append(&language.code, topic, url, license) {
            tracing::warn!("Failed to write skip report line for {}: {}", url, e);
        }
    }
}
