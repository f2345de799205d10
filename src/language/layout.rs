use crate::config::LayoutConfig;
use std::fmt;

/// How a language block arranges its videos
///
/// Resolved once per language and handed to the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Colon-terminated headings open topics; one topic node per heading
    Standard,

    /// One flat list of videos under the language node
    Single,

    /// The block holds several languages; each video title starts with its language
    MultiLanguage,
}

impl Layout {
    /// Classifies a language by name
    ///
    /// The single-topic list is checked first, then the multi-language list;
    /// everything else is standard.
    pub fn classify(language_name: &str, config: &LayoutConfig) -> Self {
        let name = language_name.to_lowercase();
        if config.single_topic.iter().any(|n| n.to_lowercase() == name) {
            Layout::Single
        } else if config.multi_language.iter().any(|n| n.to_lowercase() == name) {
            Layout::MultiLanguage
        } else {
            Layout::Standard
        }
    }

    pub fn is_multi_language(&self) -> bool {
        matches!(self, Layout::MultiLanguage)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Standard => write!(f, "standard"),
            Layout::Single => write!(f, "single topic"),
            Layout::MultiLanguage => write!(f, "multi-language"),
        }
    }
}
