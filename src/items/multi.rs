//! Mixed-kind collector for unified search results.

use super::channel::{ChannelItemSource, extract_channel};
use super::collector::CollectorCore;
use super::playlist::{PlaylistItemSource, extract_playlist};
use super::stream::{StreamItemSource, extract_stream};
use super::InfoItem;
use crate::error::ExtractionError;

use tracing::debug;

/// One raw search row tagged with the kind its platform adapter detected.
pub enum AnyItemSource<'a> {
    Stream(&'a dyn StreamItemSource),
    Channel(&'a dyn ChannelItemSource),
    Playlist(&'a dyn PlaylistItemSource),
}

/// Collector for pages that mix streams, channels and playlists, as search
/// result pages do. Each row keeps its kind; the failure policy is the one
/// the kind-specific collectors apply.
#[derive(Debug)]
pub struct MultiItemsCollector {
    core: CollectorCore<InfoItem>,
}

impl MultiItemsCollector {
    pub fn new(service_id: u32) -> Self {
        Self {
            core: CollectorCore::new(service_id),
        }
    }

    pub fn commit(&mut self, source: AnyItemSource<'_>) {
        let service_id = self.core.service_id();
        let result = match source {
            AnyItemSource::Stream(s) => {
                let ad_error = match s.is_ad() {
                    Ok(true) => {
                        debug!("skipping ad row");
                        return;
                    }
                    Ok(false) => None,
                    Err(error) => Some(error),
                };
                extract_stream(service_id, s).map(|mut e| {
                    if let Some(error) = ad_error {
                        e.defaulted.push("is_ad");
                        e.errors.push(error.into());
                    }
                    e.map(InfoItem::Stream)
                })
            }
            AnyItemSource::Channel(s) => {
                extract_channel(service_id, s).map(|e| e.map(InfoItem::Channel))
            }
            AnyItemSource::Playlist(s) => {
                extract_playlist(service_id, s).map(|e| e.map(InfoItem::Playlist))
            }
        };
        match result {
            Ok(extracted) => self.core.push(extracted),
            Err(error) => self.core.drop_item(error),
        }
    }

    pub fn items(&self) -> &[InfoItem] {
        self.core.items()
    }

    pub fn errors(&self) -> &[ExtractionError] {
        self.core.errors()
    }

    pub fn into_parts(self) -> (Vec<InfoItem>, Vec<ExtractionError>) {
        self.core.into_parts()
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }
}
