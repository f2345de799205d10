//! Scraping of the archive page
//!
//! This module contains everything between the page URL and the topic maps:
//! - Fetching the page
//! - Selecting the language blocks
//! - Segmenting each block into topics

mod blocks;
mod fetcher;
mod segmenter;

pub use blocks::{extract_blocks, BlockNode, LanguageBlock};
pub use fetcher::{build_http_client, fetch_page};
pub use segmenter::{segment, TopicMap, VideoRef};
