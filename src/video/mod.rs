//! Video handling: link detection, title cleanup and metadata resolution

mod link;
mod resolver;
mod title;
mod ytdl;

pub use link::{host_matches, is_video_link, link_host, youtube_id};
pub use resolver::{
    is_permissive_license, ResolveError, ResolvedVideo, VideoRequest, VideoResolver,
};
pub use title::normalize_title;
pub use ytdl::{clear_cache, YtdlResolver};
