//! Content tree nodes handed to the channel uploader

use crate::config::ChannelConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A node of the content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Topic(TopicNode),
    Video(VideoNode),
}

impl Node {
    pub fn source_id(&self) -> &str {
        match self {
            Node::Topic(topic) => &topic.source_id,
            Node::Video(video) => &video.source_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Node::Topic(topic) => &topic.title,
            Node::Video(video) => &video.title,
        }
    }

    pub fn as_topic(&self) -> Option<&TopicNode> {
        match self {
            Node::Topic(topic) => Some(topic),
            Node::Video(_) => None,
        }
    }

    pub fn as_video(&self) -> Option<&VideoNode> {
        match self {
            Node::Video(video) => Some(video),
            Node::Topic(_) => None,
        }
    }
}

/// A folder of topics and videos
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicNode {
    pub source_id: String,
    pub title: String,
    pub children: Vec<Node>,
}

impl TopicNode {
    pub fn new(title: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Counts the videos in this subtree
    pub fn video_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Topic(topic) => topic.video_count(),
                Node::Video(_) => 1,
            })
            .sum()
    }
}

/// License attached to a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub id: String,
    pub copyright_holder: String,
}

/// A file of a video node, referencing the hosted video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoFile {
    pub kind: String,
    pub youtube_id: String,
    pub language: String,
    pub high_resolution: bool,
}

impl VideoFile {
    pub fn youtube(youtube_id: &str, language: &str) -> Self {
        Self {
            kind: "video".to_string(),
            youtube_id: youtube_id.to_string(),
            language: language.to_string(),
            high_resolution: false,
        }
    }
}

/// A playable video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoNode {
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub thumbnail: Option<String>,
    pub license: License,
    pub files: Vec<VideoFile>,
}

/// Channel metadata written alongside the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelInfo {
    pub title: String,
    pub source_domain: String,
    pub source_id: String,
    pub language: String,
    pub thumbnail: String,
    pub description: String,
}

impl From<&ChannelConfig> for ChannelInfo {
    fn from(config: &ChannelConfig) -> Self {
        Self {
            title: config.title.clone(),
            source_domain: config.source_domain.clone(),
            source_id: config.source_id.clone(),
            language: config.language.clone(),
            thumbnail: config.thumbnail.clone(),
            description: config.description.clone(),
        }
    }
}

/// The complete channel tree
#[derive(Debug, Clone, Serialize)]
pub struct Channel {
    pub info: ChannelInfo,
    pub children: Vec<Node>,
    pub generated_at: DateTime<Utc>,
    pub config_hash: Option<String>,
}

impl Channel {
    pub fn new(info: ChannelInfo) -> Self {
        Self {
            info,
            children: Vec::new(),
            generated_at: Utc::now(),
            config_hash: None,
        }
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn video_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Topic(topic) => topic.video_count(),
                Node::Video(_) => 1,
            })
            .sum()
    }
}
