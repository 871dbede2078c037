//! Playlist (curated set) items.

use serde::{Deserialize, Serialize};

use super::collector::{CollectorCore, Extracted};
use super::{COUNT_UNKNOWN, Image, ItemSource};
use crate::error::{ExtractionError, ExtractionResult, ParsingResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub service_id: u32,
    pub url: String,
    pub name: String,
    pub thumbnails: Vec<Image>,
    pub stream_count: i64,
    pub uploader_name: String,
    pub description: Option<String>,
}

impl PlaylistItem {
    pub fn new(service_id: u32, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            thumbnails: Vec::new(),
            stream_count: COUNT_UNKNOWN,
            uploader_name: String::new(),
            description: None,
        }
    }
}

pub trait PlaylistItemSource: ItemSource {
    fn stream_count(&self) -> ParsingResult<i64> {
        Ok(COUNT_UNKNOWN)
    }

    fn uploader_name(&self) -> ParsingResult<String> {
        Ok(String::new())
    }

    fn description(&self) -> ParsingResult<Option<String>> {
        Ok(None)
    }
}

pub(crate) fn extract_playlist(
    service_id: u32,
    source: &dyn PlaylistItemSource,
) -> ExtractionResult<Extracted<PlaylistItem>> {
    let item = PlaylistItem::new(service_id, source.url()?, source.name()?);
    let mut extracted = Extracted::new(item);

    extracted.field("thumbnails", || source.thumbnails(), |i, v| i.thumbnails = v);
    extracted.field(
        "stream_count",
        || source.stream_count(),
        |i, v| i.stream_count = v,
    );
    extracted.field(
        "uploader_name",
        || source.uploader_name(),
        |i, v| i.uploader_name = v,
    );
    extracted.field("description", || source.description(), |i, v| i.description = v);

    Ok(extracted)
}

#[derive(Debug)]
pub struct PlaylistItemsCollector {
    core: CollectorCore<PlaylistItem>,
}

impl PlaylistItemsCollector {
    pub fn new(service_id: u32) -> Self {
        Self {
            core: CollectorCore::new(service_id),
        }
    }

    pub fn extract(
        &self,
        source: &dyn PlaylistItemSource,
    ) -> ExtractionResult<Extracted<PlaylistItem>> {
        extract_playlist(self.core.service_id(), source)
    }

    pub fn commit(&mut self, source: &dyn PlaylistItemSource) {
        match self.extract(source) {
            Ok(extracted) => self.core.push(extracted),
            Err(error) => self.core.drop_item(error),
        }
    }

    pub fn items(&self) -> &[PlaylistItem] {
        self.core.items()
    }

    pub fn errors(&self) -> &[ExtractionError] {
        self.core.errors()
    }

    pub fn into_parts(self) -> (Vec<PlaylistItem>, Vec<ExtractionError>) {
        self.core.into_parts()
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }
}
