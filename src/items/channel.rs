//! Channel (uploader/account) items.

use serde::{Deserialize, Serialize};

use super::collector::{CollectorCore, Extracted};
use super::{COUNT_UNKNOWN, Image, ItemSource};
use crate::error::{ExtractionError, ExtractionResult, ParsingResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelItem {
    pub service_id: u32,
    pub url: String,
    pub name: String,
    pub thumbnails: Vec<Image>,
    pub subscriber_count: i64,
    pub stream_count: i64,
    pub description: Option<String>,
    pub verified: bool,
}

impl ChannelItem {
    pub fn new(service_id: u32, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            thumbnails: Vec::new(),
            subscriber_count: COUNT_UNKNOWN,
            stream_count: COUNT_UNKNOWN,
            description: None,
            verified: false,
        }
    }
}

pub trait ChannelItemSource: ItemSource {
    fn subscriber_count(&self) -> ParsingResult<i64> {
        Ok(COUNT_UNKNOWN)
    }

    fn stream_count(&self) -> ParsingResult<i64> {
        Ok(COUNT_UNKNOWN)
    }

    fn description(&self) -> ParsingResult<Option<String>> {
        Ok(None)
    }

    fn verified(&self) -> ParsingResult<bool> {
        Ok(false)
    }
}

pub(crate) fn extract_channel(
    service_id: u32,
    source: &dyn ChannelItemSource,
) -> ExtractionResult<Extracted<ChannelItem>> {
    let item = ChannelItem::new(service_id, source.url()?, source.name()?);
    let mut extracted = Extracted::new(item);

    extracted.field("thumbnails", || source.thumbnails(), |i, v| i.thumbnails = v);
    extracted.field(
        "subscriber_count",
        || source.subscriber_count(),
        |i, v| i.subscriber_count = v,
    );
    extracted.field(
        "stream_count",
        || source.stream_count(),
        |i, v| i.stream_count = v,
    );
    extracted.field("description", || source.description(), |i, v| i.description = v);
    extracted.field("verified", || source.verified(), |i, v| i.verified = v);

    Ok(extracted)
}

#[derive(Debug)]
pub struct ChannelItemsCollector {
    core: CollectorCore<ChannelItem>,
}

impl ChannelItemsCollector {
    pub fn new(service_id: u32) -> Self {
        Self {
            core: CollectorCore::new(service_id),
        }
    }

    pub fn extract(
        &self,
        source: &dyn ChannelItemSource,
    ) -> ExtractionResult<Extracted<ChannelItem>> {
        extract_channel(self.core.service_id(), source)
    }

    pub fn commit(&mut self, source: &dyn ChannelItemSource) {
        match self.extract(source) {
            Ok(extracted) => self.core.push(extracted),
            Err(error) => self.core.drop_item(error),
        }
    }

    pub fn items(&self) -> &[ChannelItem] {
        self.core.items()
    }

    pub fn errors(&self) -> &[ExtractionError] {
        self.core.errors()
    }

    pub fn into_parts(self) -> (Vec<ChannelItem>, Vec<ExtractionError>) {
        self.core.into_parts()
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }
}
