//! Extracted item model and the per-item adapter contracts.
//!
//! Every list-shaped extraction yields items of one of four kinds. Items
//! are immutable value objects created exclusively by the collectors in
//! [`collector`] and the kind modules; optional fields default to a
//! documented "unknown" sentinel instead of failing the item.

pub mod channel;
pub mod collector;
pub mod comment;
pub mod multi;
pub mod playlist;
pub mod stream;

use serde::{Deserialize, Serialize};

use crate::error::ParsingResult;

pub use channel::{ChannelItem, ChannelItemSource, ChannelItemsCollector};
pub use collector::{CollectorCore, Extracted};
pub use comment::{CommentItem, CommentItemSource, CommentItemsCollector};
pub use multi::{AnyItemSource, MultiItemsCollector};
pub use playlist::{PlaylistItem, PlaylistItemSource, PlaylistItemsCollector};
pub use stream::{StreamItem, StreamItemSource, StreamItemsCollector};

/// Sentinel for numeric fields the platform did not expose.
pub const COUNT_UNKNOWN: i64 = -1;

/// One thumbnail/avatar/banner variant. Dimensions are [`-1`] when the
/// platform does not report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: i32,
    pub height: i32,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: -1,
            height: -1,
        }
    }

    pub fn with_size(url: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }
}

/// Fixed kind of an extracted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoType {
    Stream,
    Channel,
    Playlist,
    Comment,
}

/// One extracted entity of any kind, as produced by unified search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InfoItem {
    Stream(StreamItem),
    Channel(ChannelItem),
    Playlist(PlaylistItem),
    Comment(CommentItem),
}

impl InfoItem {
    pub fn info_type(&self) -> InfoType {
        match self {
            Self::Stream(_) => InfoType::Stream,
            Self::Channel(_) => InfoType::Channel,
            Self::Playlist(_) => InfoType::Playlist,
            Self::Comment(_) => InfoType::Comment,
        }
    }

    pub fn service_id(&self) -> u32 {
        match self {
            Self::Stream(i) => i.service_id,
            Self::Channel(i) => i.service_id,
            Self::Playlist(i) => i.service_id,
            Self::Comment(i) => i.service_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Stream(i) => &i.name,
            Self::Channel(i) => &i.name,
            Self::Playlist(i) => &i.name,
            Self::Comment(i) => &i.name,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Stream(i) => &i.url,
            Self::Channel(i) => &i.url,
            Self::Playlist(i) => &i.url,
            Self::Comment(i) => &i.url,
        }
    }

    pub fn thumbnails(&self) -> &[Image] {
        match self {
            Self::Stream(i) => &i.thumbnails,
            Self::Channel(i) => &i.thumbnails,
            Self::Playlist(i) => &i.thumbnails,
            Self::Comment(i) => &i.thumbnails,
        }
    }
}

/// Base adapter contract for one raw scraped row. Each accessor may fail
/// independently; `name` and `url` are the mandatory pair - when either
/// fails the whole row is dropped by the collector.
pub trait ItemSource {
    fn name(&self) -> ParsingResult<String>;

    fn url(&self) -> ParsingResult<String>;

    fn thumbnails(&self) -> ParsingResult<Vec<Image>> {
        Ok(Vec::new())
    }
}
