//! Stream (video/audio entry) items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::collector::{CollectorCore, Extracted};
use super::{COUNT_UNKNOWN, Image, ItemSource};
use crate::error::{ExtractionResult, ParsingResult};

/// One stream entry as it appears in a channel feed, playlist or search
/// result. Counts default to [`COUNT_UNKNOWN`], strings to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamItem {
    pub service_id: u32,
    pub url: String,
    pub name: String,
    pub thumbnails: Vec<Image>,
    pub duration_seconds: i64,
    pub view_count: i64,
    pub uploader_name: String,
    pub uploader_url: String,
    pub uploader_verified: bool,
    pub upload_date: Option<DateTime<Utc>>,
    /// The date string exactly as scraped, kept alongside the parsed form
    /// for platforms with ambiguous relative dates ("3 weeks ago").
    pub textual_upload_date: Option<String>,
    pub short_description: Option<String>,
}

impl StreamItem {
    pub fn new(service_id: u32, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            thumbnails: Vec::new(),
            duration_seconds: COUNT_UNKNOWN,
            view_count: COUNT_UNKNOWN,
            uploader_name: String::new(),
            uploader_url: String::new(),
            uploader_verified: false,
            upload_date: None,
            textual_upload_date: None,
            short_description: None,
        }
    }
}

/// Per-platform accessor contract for one raw stream row. Optional
/// accessors default to the documented sentinels.
pub trait StreamItemSource: ItemSource {
    /// Promoted rows platforms mix into listings. Ads are skipped without
    /// an item or an error.
    fn is_ad(&self) -> ParsingResult<bool> {
        Ok(false)
    }

    fn duration_seconds(&self) -> ParsingResult<i64> {
        Ok(COUNT_UNKNOWN)
    }

    fn view_count(&self) -> ParsingResult<i64> {
        Ok(COUNT_UNKNOWN)
    }

    fn uploader_name(&self) -> ParsingResult<String> {
        Ok(String::new())
    }

    fn uploader_url(&self) -> ParsingResult<String> {
        Ok(String::new())
    }

    fn uploader_verified(&self) -> ParsingResult<bool> {
        Ok(false)
    }

    fn upload_date(&self) -> ParsingResult<Option<DateTime<Utc>>> {
        Ok(None)
    }

    fn textual_upload_date(&self) -> ParsingResult<Option<String>> {
        Ok(None)
    }

    fn short_description(&self) -> ParsingResult<Option<String>> {
        Ok(None)
    }
}

pub(crate) fn extract_stream(
    service_id: u32,
    source: &dyn StreamItemSource,
) -> ExtractionResult<Extracted<StreamItem>> {
    // Mandatory pair; a failure here drops the row.
    let item = StreamItem::new(service_id, source.url()?, source.name()?);
    let mut extracted = Extracted::new(item);

    extracted.field("thumbnails", || source.thumbnails(), |i, v| i.thumbnails = v);
    extracted.field(
        "duration",
        || source.duration_seconds(),
        |i, v| i.duration_seconds = v,
    );
    extracted.field("view_count", || source.view_count(), |i, v| i.view_count = v);
    extracted.field(
        "uploader_name",
        || source.uploader_name(),
        |i, v| i.uploader_name = v,
    );
    extracted.field(
        "uploader_url",
        || source.uploader_url(),
        |i, v| i.uploader_url = v,
    );
    extracted.field(
        "uploader_verified",
        || source.uploader_verified(),
        |i, v| i.uploader_verified = v,
    );
    extracted.field("upload_date", || source.upload_date(), |i, v| i.upload_date = v);
    extracted.field(
        "textual_upload_date",
        || source.textual_upload_date(),
        |i, v| i.textual_upload_date = v,
    );
    extracted.field(
        "short_description",
        || source.short_description(),
        |i, v| i.short_description = v,
    );

    Ok(extracted)
}

/// Collector turning raw stream rows into validated [`StreamItem`]s with
/// the isolate-and-continue failure policy.
#[derive(Debug)]
pub struct StreamItemsCollector {
    core: CollectorCore<StreamItem>,
}

impl StreamItemsCollector {
    pub fn new(service_id: u32) -> Self {
        Self {
            core: CollectorCore::new(service_id),
        }
    }

    /// Extract one row without committing it.
    pub fn extract(&self, source: &dyn StreamItemSource) -> ExtractionResult<Extracted<StreamItem>> {
        extract_stream(self.core.service_id(), source)
    }

    /// Commit one row. Never propagates: a mandatory-field failure drops
    /// the row into the error list, an ad row is skipped silently. A
    /// failing ad check defaults to "not an ad" and is recorded like any
    /// other optional-field failure.
    pub fn commit(&mut self, source: &dyn StreamItemSource) {
        let ad_error = match source.is_ad() {
            Ok(true) => {
                debug!("skipping ad row");
                return;
            }
            Ok(false) => None,
            Err(error) => Some(error),
        };
        match self.extract(source) {
            Ok(mut extracted) => {
                if let Some(error) = ad_error {
                    extracted.defaulted.push("is_ad");
                    extracted.errors.push(error.into());
                }
                self.core.push(extracted);
            }
            Err(error) => self.core.drop_item(error),
        }
    }

    pub fn items(&self) -> &[StreamItem] {
        self.core.items()
    }

    pub fn errors(&self) -> &[crate::error::ExtractionError] {
        self.core.errors()
    }

    pub fn into_parts(self) -> (Vec<StreamItem>, Vec<crate::error::ExtractionError>) {
        self.core.into_parts()
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }
}
