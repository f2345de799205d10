//! Video link detection and video id extraction

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Extracts the lower-cased host of an href
///
/// Archive hrefs are sometimes written without a scheme
/// (`www.youtube.com/watch?v=...`); those are retried as `https://`.
///
/// # Examples
///
/// ```
/// use toybox_chef::video::link_host;
///
/// assert_eq!(link_host("https://YouTu.be/abc"), Some("youtu.be".to_string()));
/// assert_eq!(link_host("www.youtube.com/watch?v=x"), Some("www.youtube.com".to_string()));
/// assert_eq!(link_host(""), None);
/// ```
pub fn link_host(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let parsed = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", href.trim_start_matches('/'))).ok()?
        }
        Err(_) => return None,
    };

    parsed.host_str().map(|h| h.to_lowercase())
}

/// Checks if a host is one of the video domains or a subdomain of one
pub fn host_matches(domain: &str, host: &str) -> bool {
    let domain = domain.trim().to_lowercase();
    !domain.is_empty() && (host == domain || host.ends_with(&format!(".{}", domain)))
}

/// Returns true if the href points at one of the configured video hosts
pub fn is_video_link(href: &str, video_domains: &[String]) -> bool {
    match link_host(href) {
        Some(host) => video_domains.iter().any(|d| host_matches(d, &host)),
        None => false,
    }
}

const YOUTUBE_ID_PATTERN: &str = concat!(
    r"(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#]*&)?v=|embed/|v/|shorts/)",
    r"|youtu\.be/)",
    r"(?P<youtube_id>[A-Za-z0-9_-]{11})"
);

static YOUTUBE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn youtube_id_re() -> &'static Regex {
    YOUTUBE_ID_RE.get_or_init(|| Regex::new(YOUTUBE_ID_PATTERN).unwrap())
}

/// Extracts the 11-character YouTube id from a video URL
///
/// # Examples
///
/// ```
/// use toybox_chef::video::youtube_id;
///
/// assert_eq!(youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
/// assert_eq!(youtube_id("http://youtu.be/dQw4w9WgXcQ?t=10"), Some("dQw4w9WgXcQ".to_string()));
/// assert_eq!(youtube_id("https://example.com/video"), None);
/// ```
pub fn youtube_id(url: &str) -> Option<String> {
    youtube_id_re()
        .captures(url)
        .and_then(|caps| caps.name("youtube_id"))
        .map(|m| m.as_str().to_string())
}
