//! The language → topic → video content tree

mod builder;
mod nodes;

pub use builder::{TreeBuilder, VideoOutcome};
pub use nodes::{Channel, ChannelInfo, License, Node, TopicNode, VideoFile, VideoNode};
