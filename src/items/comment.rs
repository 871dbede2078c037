//! Comment items, including reply-thread continuation.

use serde::{Deserialize, Serialize};

use super::collector::{CollectorCore, Extracted};
use super::{COUNT_UNKNOWN, Image, ItemSource};
use crate::error::{ExtractionError, ExtractionResult, ParsingResult};
use crate::page::Page;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentItem {
    pub service_id: u32,
    pub url: String,
    /// Commenter display name; comments have no title of their own.
    pub name: String,
    pub thumbnails: Vec<Image>,
    pub comment_text: String,
    pub uploader_url: String,
    pub uploader_verified: bool,
    pub like_count: i64,
    pub textual_upload_date: Option<String>,
    pub reply_count: i64,
    /// Cursor into the reply thread, synthesized by the adapter. `None`
    /// when the comment has no replies or the platform hides them.
    pub replies: Option<Page>,
    pub pinned: bool,
}

impl CommentItem {
    pub fn new(service_id: u32, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            thumbnails: Vec::new(),
            comment_text: String::new(),
            uploader_url: String::new(),
            uploader_verified: false,
            like_count: COUNT_UNKNOWN,
            textual_upload_date: None,
            reply_count: COUNT_UNKNOWN,
            replies: None,
            pinned: false,
        }
    }
}

pub trait CommentItemSource: ItemSource {
    fn comment_text(&self) -> ParsingResult<String> {
        Ok(String::new())
    }

    fn uploader_url(&self) -> ParsingResult<String> {
        Ok(String::new())
    }

    fn uploader_verified(&self) -> ParsingResult<bool> {
        Ok(false)
    }

    fn like_count(&self) -> ParsingResult<i64> {
        Ok(COUNT_UNKNOWN)
    }

    fn textual_upload_date(&self) -> ParsingResult<Option<String>> {
        Ok(None)
    }

    fn reply_count(&self) -> ParsingResult<i64> {
        Ok(COUNT_UNKNOWN)
    }

    /// Synthesized continuation into the reply thread. Follows the same
    /// isolate-and-continue rule as any other optional field.
    fn replies(&self) -> ParsingResult<Option<Page>> {
        Ok(None)
    }

    fn pinned(&self) -> ParsingResult<bool> {
        Ok(false)
    }
}

pub(crate) fn extract_comment(
    service_id: u32,
    source: &dyn CommentItemSource,
) -> ExtractionResult<Extracted<CommentItem>> {
    let item = CommentItem::new(service_id, source.url()?, source.name()?);
    let mut extracted = Extracted::new(item);

    extracted.field("thumbnails", || source.thumbnails(), |i, v| i.thumbnails = v);
    extracted.field(
        "comment_text",
        || source.comment_text(),
        |i, v| i.comment_text = v,
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
    extracted.field("like_count", || source.like_count(), |i, v| i.like_count = v);
    extracted.field(
        "textual_upload_date",
        || source.textual_upload_date(),
        |i, v| i.textual_upload_date = v,
    );
    extracted.field("reply_count", || source.reply_count(), |i, v| i.reply_count = v);
    extracted.field("replies", || source.replies(), |i, v| i.replies = v);
    extracted.field("pinned", || source.pinned(), |i, v| i.pinned = v);

    Ok(extracted)
}

#[derive(Debug)]
pub struct CommentItemsCollector {
    core: CollectorCore<CommentItem>,
}

impl CommentItemsCollector {
    pub fn new(service_id: u32) -> Self {
        Self {
            core: CollectorCore::new(service_id),
        }
    }

    pub fn extract(
        &self,
        source: &dyn CommentItemSource,
    ) -> ExtractionResult<Extracted<CommentItem>> {
        extract_comment(self.core.service_id(), source)
    }

    pub fn commit(&mut self, source: &dyn CommentItemSource) {
        match self.extract(source) {
            Ok(extracted) => self.core.push(extracted),
            Err(error) => self.core.drop_item(error),
        }
    }

    pub fn items(&self) -> &[CommentItem] {
        self.core.items()
    }

    pub fn errors(&self) -> &[ExtractionError] {
        self.core.errors()
    }

    pub fn into_parts(self) -> (Vec<CommentItem>, Vec<ExtractionError>) {
        self.core.into_parts()
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }
}
