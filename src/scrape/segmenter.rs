//! Topic segmentation of a language block
//!
//! A language block is a flat run of nodes: headings ending in a colon,
//! video links, line breaks and whitespace. A single forward pass keeps one
//! topic open at a time and buffers its videos; a new heading commits the
//! buffer under the open topic's name and opens the next one. In a
//! multi-language block the first word of each video title plays the role
//! of the heading.

use crate::language::Layout;
use crate::scrape::BlockNode;
use crate::video::is_video_link;

/// A video link found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    pub url: String,
    /// Link text as it appears on the page
    pub title: String,
}

impl VideoRef {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Topic name → videos, in order of first appearance
///
/// Inserting an existing name replaces its videos but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicMap {
    entries: Vec<(String, Vec<VideoRef>)>,
}

impl TopicMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the videos of a topic; last write wins
    pub fn insert(&mut self, topic: String, videos: Vec<VideoRef>) {
        match self.entries.iter_mut().find(|(name, _)| *name == topic) {
            Some((_, existing)) => *existing = videos,
            None => self.entries.push((topic, videos)),
        }
    }

    pub fn get(&self, topic: &str) -> Option<&[VideoRef]> {
        self.entries
            .iter()
            .find(|(name, _)| name == topic)
            .map(|(_, videos)| videos.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[VideoRef])> {
        self.entries
            .iter()
            .map(|(name, videos)| (name.as_str(), videos.as_slice()))
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of videos across all topics
    pub fn video_count(&self) -> usize {
        self.entries.iter().map(|(_, videos)| videos.len()).sum()
    }
}

impl IntoIterator for TopicMap {
    type Item = (String, Vec<VideoRef>);
    type IntoIter = std::vec::IntoIter<(String, Vec<VideoRef>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Scan state: the open topic and its uncommitted videos
struct Scan {
    map: TopicMap,
    current: String,
    buffer: Vec<VideoRef>,
    opened: bool,
}

impl Scan {
    fn commit(&mut self) {
        let videos = std::mem::take(&mut self.buffer);
        self.map.insert(self.current.clone(), videos);
    }

    /// Closes the open topic and opens `name`
    ///
    /// Videos seen before the very first topic stay under the empty name.
    fn open(&mut self, name: String) {
        if self.opened || !self.buffer.is_empty() {
            self.commit();
        }
        self.opened = true;
        self.current = name;
    }

    fn push_video(&mut self, video: VideoRef, layout: Layout) {
        if layout.is_multi_language() {
            let tag = match video.title.split_whitespace().next() {
                Some(word) => word.to_lowercase(),
                None => {
                    tracing::debug!("Skipping untitled video in multi-language block: {}", video.url);
                    return;
                }
            };
            if !self.opened {
                self.opened = true;
                self.current = tag;
            } else if self.current != tag {
                self.commit();
                self.current = tag;
            }
        }
        self.buffer.push(video);
    }
}

/// Splits a language block into topics
///
/// # Rules
///
/// - Whitespace text and `<br>` nodes are ignored.
/// - An element whose first link points at a video host is a video entry.
///   In a [`Layout::MultiLanguage`] block a change of the title's first word
///   (lower-cased) closes the open topic and opens one named by that word.
/// - An element without a link (or with an empty href) whose text contains a
///   colon is a heading: it commits the open topic and opens a new one named
///   by its text with colons removed and whitespace trimmed.
/// - Other elements (plain text, links to other hosts) are dropped.
/// - At the end the open topic is always committed, so trailing videos are
///   never lost. A repeated heading replaces the earlier topic's videos.
///
/// # Examples
///
/// ```
/// use toybox_chef::scrape::{segment, BlockNode};
/// use toybox_chef::Layout;
///
/// let nodes = vec![
///     BlockNode::heading("Air:"),
///     BlockNode::link("Balloon", "https://youtu.be/aaaaaaaaaaa"),
/// ];
/// let domains = vec!["youtu.be".to_string()];
/// let map = segment(&nodes, Layout::Standard, &domains);
/// assert_eq!(map.get("Air").unwrap().len(), 1);
/// ```
pub fn segment(nodes: &[BlockNode], layout: Layout, video_domains: &[String]) -> TopicMap {
    let mut scan = Scan {
        map: TopicMap::new(),
        current: String::new(),
        buffer: Vec::new(),
        opened: false,
    };

    for node in nodes {
        let (text, href) = match node {
            BlockNode::Text(_) | BlockNode::LineBreak => continue,
            BlockNode::Element { text, href } => (text.trim(), href.as_deref().map(str::trim)),
        };

        match href {
            Some(href) if !href.is_empty() => {
                if is_video_link(href, video_domains) {
                    scan.push_video(VideoRef::new(href, text), layout);
                } else {
                    tracing::trace!("Ignoring non-video link: {}", href);
                }
            }
            _ => {
                if text.contains(':') {
                    let name = text.replace(':', "").trim().to_string();
                    scan.open(name);
                }
            }
        }
    }

    scan.commit();
    scan.map
}
