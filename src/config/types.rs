use serde::Deserialize;

/// Main configuration structure for the chef
///
/// Every section has defaults that target the Arvind Gupta Toys film page, so an
/// empty file (or no file at all) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub fetch: FetchConfig,
    pub page: BlockRule,
    pub layouts: LayoutConfig,
    pub paths: PathsConfig,
    pub channel: ChannelConfig,
    pub resolver: ResolverConfig,
    #[serde(rename = "language")]
    pub languages: Vec<LanguageEntry>,
}

/// Where the archive page lives and which links count as videos
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL of the film archive page
    pub url: String,

    /// Hosts (and their subdomains) whose links are video entries
    #[serde(rename = "video-domains")]
    pub video_domains: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "http://www.arvindguptatoys.com/films.html".to_string(),
            video_domains: vec!["youtu.be".to_string(), "youtube.com".to_string()],
        }
    }
}

/// HTTP client settings for the page fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("toybox-chef/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// Rule selecting the language blocks on the archive page
///
/// The page has no semantic markup for its language sections. `Positional`
/// walks the raw child nodes of one container section (text nodes included),
/// picking `count` slots from `start` every `stride` nodes. `Selector`
/// takes every element matching a CSS selector instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum BlockRule {
    Positional {
        /// CSS selector of the page's content container (first match)
        container: String,
        /// Child node index of the container that holds the language blocks
        section: usize,
        start: usize,
        stride: usize,
        count: usize,
    },
    Selector {
        selector: String,
    },
}

impl Default for BlockRule {
    fn default() -> Self {
        BlockRule::Positional {
            container: "body > div".to_string(),
            section: 5,
            start: 7,
            stride: 4,
            count: 23,
        }
    }
}

/// Language names whose blocks do not follow the standard topic layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Languages whose videos are listed without topic headings
    #[serde(rename = "single-topic")]
    pub single_topic: Vec<String>,

    /// Languages whose block mixes several languages, tagged by title prefix
    #[serde(rename = "multi-language")]
    pub multi_language: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let single_topic = [
            "bhojpuri; bajpuri; bhojapuri",
            "bhojpuri",
            "nepali",
            "malayalam",
            "telugu",
            "bengali",
            "odiya",
            "punjabi",
            "marwari; marwadi",
            "marwari",
            "assamese",
            "urdu",
            "spanish",
            "chinese",
            "indonesian",
            "sci_edu",
            "science/educational",
        ];
        Self {
            single_topic: single_topic.iter().map(|s| s.to_string()).collect(),
            multi_language: vec!["russian".to_string(), "french".to_string()],
        }
    }
}

/// Files written and read during a run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Persisted skip-list (JSON array of video ids)
    #[serde(rename = "skip-cache")]
    pub skip_cache: String,

    /// Human-readable report of videos skipped this run
    #[serde(rename = "skip-report")]
    pub skip_report: String,

    /// Channel tree written at the end of a run
    pub output: String,

    /// Per-video metadata cache used by the resolver
    #[serde(rename = "video-cache-dir")]
    pub video_cache_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            skip_cache: "cache_skip_videos.json".to_string(),
            skip_report: "skip_videos.txt".to_string(),
            output: "chefdata/channel.json".to_string(),
            video_cache_dir: "chefdata/youtubecache".to_string(),
        }
    }
}

/// Channel metadata and the attribution stamped on every video
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub title: String,
    #[serde(rename = "source-domain")]
    pub source_domain: String,
    #[serde(rename = "source-id")]
    pub source_id: String,
    pub language: String,
    pub thumbnail: String,
    pub description: String,
    pub author: String,
    pub license: String,
    #[serde(rename = "copyright-holder")]
    pub copyright_holder: String,

    /// Prefix of every node source id (`<prefix>-video-<id>`, ...)
    #[serde(rename = "id-prefix")]
    pub id_prefix: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: "Arvind Gupta Toys".to_string(),
            source_domain: "arvindguptatoys.com".to_string(),
            source_id: "toys-from-trash".to_string(),
            language: "mul".to_string(),
            thumbnail: "chefdata/arvind_gupta_thumbnail.png".to_string(),
            description: "Math and science activities through low-cost materials all in the \
                form of videos to provide various pathways for children to explore and deepen \
                their understanding of concepts in low-resource contexts around the world. \
                Valuable resource library for teachers to incorporate in their lessons, for \
                parents to work with children at home using readily available, simple, and \
                low-cost materials."
                .to_string(),
            author: "Arvind Gupta Toys".to_string(),
            license: "CC BY-NC".to_string(),
            copyright_holder: "Arvind Gupta Toys".to_string(),
            id_prefix: "arvind".to_string(),
        }
    }
}

/// Video resolver settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Explicit metadata program; `yt-dlp` then `youtube-dl` are probed when unset
    pub program: Option<String>,
}

/// Extra or overriding entry of the language table
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}
