//! Shared test fixtures: a canned-response transport and a small demo
//! platform ("tapedeck") wired through the full pipeline.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use medialens::downloader::{Downloader, Request, Response};
use medialens::error::{
    DownloadError, ExtractionError, ExtractionResult, ParsingError, ParsingResult,
};
use medialens::extractor::{ExtractorBase, ItemsPage, ListExtractor};
use medialens::filter::{FilterContainer, FilterGroup, FilterItem, SearchFilters};
use medialens::items::{
    AnyItemSource, ChannelItemSource, CommentItem, CommentItemSource, CommentItemsCollector,
    COUNT_UNKNOWN, Image, InfoItem, ItemSource, MultiItemsCollector, PlaylistItemSource,
    StreamItem, StreamItemSource, StreamItemsCollector,
};
use medialens::linkhandler::{
    LinkHandlerFactory, ListLinkHandler, ListLinkHandlerFactory, UrlClassifier,
};
use medialens::page::Page;
use medialens::service::MediaService;
use medialens::utils;

pub const TAPEDECK_ID: u32 = 0;
pub const HOST: &str = "tapedeck.example";

/// Transport fake: canned bodies per URL, a request counter and a set of
/// URLs that answer with a challenge wall.
#[derive(Default)]
pub struct MockDownloader {
    bodies: Mutex<HashMap<String, String>>,
    challenges: Mutex<HashSet<String>>,
    requests: AtomicUsize,
}

impl MockDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, url: impl Into<String>, body: impl Into<String>) {
        self.bodies.lock().unwrap().insert(url.into(), body.into());
    }

    pub fn challenge_at(&self, url: impl Into<String>) {
        self.challenges.lock().unwrap().insert(url.into());
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Downloader for MockDownloader {
    async fn execute(&self, request: Request) -> Result<Response, DownloadError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.challenges.lock().unwrap().contains(&request.url) {
            return Err(DownloadError::Challenge {
                url: request.url,
                status: 429,
            });
        }
        match self.bodies.lock().unwrap().get(&request.url) {
            Some(body) => Ok(Response::new(
                200,
                vec![("Content-Type".into(), "application/json".into())],
                body.clone(),
                request.url,
            )),
            None => Err(DownloadError::HttpStatus {
                status: 404,
                url: request.url,
            }),
        }
    }
}

fn parse_json(body: &str) -> ParsingResult<Value> {
    serde_json::from_str(body).map_err(|e| ParsingError::shape(e.to_string()))
}

fn str_field(row: &Value, field: &'static str) -> ParsingResult<String> {
    row[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ParsingError::field_missing(field, "absent or not a string"))
}

fn count_field(row: &Value, field: &'static str) -> ParsingResult<i64> {
    match &row[field] {
        Value::Null => Ok(COUNT_UNKNOWN),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ParsingError::InvalidCount(n.to_string())),
        Value::String(s) => utils::parse_count_text(s),
        other => Err(ParsingError::InvalidCount(other.to_string())),
    }
}

fn next_cursor(doc: &Value) -> Option<Page> {
    doc["next"].as_str().map(Page::for_url)
}

// ---- raw row adapters -------------------------------------------------

struct StreamRow<'a>(&'a Value);

impl ItemSource for StreamRow<'_> {
    fn name(&self) -> ParsingResult<String> {
        str_field(self.0, "title")
    }

    fn url(&self) -> ParsingResult<String> {
        str_field(self.0, "url")
    }

    fn thumbnails(&self) -> ParsingResult<Vec<Image>> {
        match &self.0["thumb"] {
            Value::Null => Ok(Vec::new()),
            Value::String(s) => Ok(vec![Image::new(s.clone())]),
            other => Err(ParsingError::shape(format!("thumb: {other}"))),
        }
    }
}

impl StreamItemSource for StreamRow<'_> {
    fn is_ad(&self) -> ParsingResult<bool> {
        Ok(self.0["ad"].as_bool().unwrap_or(false))
    }

    fn view_count(&self) -> ParsingResult<i64> {
        count_field(self.0, "views")
    }

    fn duration_seconds(&self) -> ParsingResult<i64> {
        count_field(self.0, "duration")
    }

    fn uploader_name(&self) -> ParsingResult<String> {
        Ok(self.0["uploader"].as_str().unwrap_or_default().to_string())
    }

    fn textual_upload_date(&self) -> ParsingResult<Option<String>> {
        Ok(self.0["uploaded"].as_str().map(str::to_string))
    }
}

struct ChannelRow<'a>(&'a Value);

impl ItemSource for ChannelRow<'_> {
    fn name(&self) -> ParsingResult<String> {
        str_field(self.0, "name")
    }

    fn url(&self) -> ParsingResult<String> {
        str_field(self.0, "url")
    }
}

impl ChannelItemSource for ChannelRow<'_> {
    fn subscriber_count(&self) -> ParsingResult<i64> {
        count_field(self.0, "subscribers")
    }
}

struct PlaylistRow<'a>(&'a Value);

impl ItemSource for PlaylistRow<'_> {
    fn name(&self) -> ParsingResult<String> {
        str_field(self.0, "name")
    }

    fn url(&self) -> ParsingResult<String> {
        str_field(self.0, "url")
    }
}

impl PlaylistItemSource for PlaylistRow<'_> {
    fn stream_count(&self) -> ParsingResult<i64> {
        count_field(self.0, "tracks")
    }
}

struct CommentRow<'a>(&'a Value);

impl ItemSource for CommentRow<'_> {
    fn name(&self) -> ParsingResult<String> {
        str_field(self.0, "author")
    }

    fn url(&self) -> ParsingResult<String> {
        str_field(self.0, "url")
    }
}

impl CommentItemSource for CommentRow<'_> {
    fn comment_text(&self) -> ParsingResult<String> {
        str_field(self.0, "text")
    }

    fn like_count(&self) -> ParsingResult<i64> {
        count_field(self.0, "likes")
    }

    fn reply_count(&self) -> ParsingResult<i64> {
        count_field(self.0, "replies")
    }

    fn replies(&self) -> ParsingResult<Option<Page>> {
        Ok(self.0["replies_token"]
            .as_str()
            .map(|token| Page::for_url(format!("https://{HOST}/api/replies?thread={token}"))))
    }
}

// ---- link handler factories -------------------------------------------

pub struct TrackFactory;

impl LinkHandlerFactory for TrackFactory {
    fn id_from_url(&self, url: &str) -> ParsingResult<String> {
        utils::query_value(url, "t")
            .ok_or_else(|| ParsingError::field_missing("t", "missing query parameter"))
    }

    fn url_from_id(&self, id: &str) -> ParsingResult<String> {
        Ok(format!("https://{HOST}/play?t={id}"))
    }

    fn accepts_url(&self, url: &str) -> bool {
        utils::canonical_host(url).ok().as_deref() == Some(HOST) && url.contains("/play")
    }
}

static CHANNEL_URLS: Lazy<UrlClassifier> = Lazy::new(|| {
    UrlClassifier::new()
        .host(HOST)
        .path_pattern(Regex::new(r"^/channel/([a-z0-9_-]+)").unwrap())
});

pub struct ChannelFactory;

impl ListLinkHandlerFactory for ChannelFactory {
    fn id_from_url(&self, url: &str) -> ParsingResult<String> {
        CHANNEL_URLS
            .capture_id(url)
            .ok_or_else(|| ParsingError::malformed_url(url, "no channel id in path"))
    }

    fn url_with_filters(
        &self,
        id: &str,
        _content_filters: &[String],
        _sort_filter: Option<&str>,
    ) -> ParsingResult<String> {
        Ok(format!("https://{HOST}/channel/{id}"))
    }

    fn accepts_url(&self, url: &str) -> bool {
        CHANNEL_URLS.accepts(url)
    }
}

pub const FILTER_STREAMS: u32 = 1;
pub const FILTER_CHANNELS: u32 = 2;
pub const FILTER_PLAYLISTS: u32 = 3;
pub const SORT_NEWEST: u32 = 10;
pub const SORT_VIEWS: u32 = 11;

/// The typed filter tree backing [`SearchFactory`]: item names are the
/// strings `from_query` accepts, item queries are the fragments the
/// request URL carries. Sorting is only meaningful for streams.
pub fn tapedeck_search_filters() -> SearchFilters {
    let content = FilterContainer::new(vec![FilterGroup::new(
        0,
        "kind",
        true,
        Some(FILTER_STREAMS),
        vec![
            FilterItem::new(FILTER_STREAMS, "streams", Some("kind=streams")),
            FilterItem::new(FILTER_CHANNELS, "channels", Some("kind=channels")),
            FilterItem::new(FILTER_PLAYLISTS, "playlists", Some("kind=playlists")),
        ],
    )]);
    let stream_sorts = FilterContainer::new(vec![FilterGroup::new(
        1,
        "order",
        true,
        None,
        vec![
            FilterItem::new(SORT_NEWEST, "newest", Some("sort=newest")),
            FilterItem::new(SORT_VIEWS, "views", Some("sort=views")),
        ],
    )]);
    SearchFilters::new(content).with_sort_variant(FILTER_STREAMS, stream_sorts)
}

pub struct SearchFactory;

impl ListLinkHandlerFactory for SearchFactory {
    fn id_from_url(&self, url: &str) -> ParsingResult<String> {
        utils::query_value(url, "q")
            .ok_or_else(|| ParsingError::field_missing("q", "missing query parameter"))
    }

    fn url_with_filters(
        &self,
        id: &str,
        content_filters: &[String],
        sort_filter: Option<&str>,
    ) -> ParsingResult<String> {
        let mut url = format!("https://{HOST}/search?q={id}");
        for filter in content_filters {
            url.push_str(&format!("&kind={filter}"));
        }
        if let Some(sort) = sort_filter {
            url.push_str(&format!("&sort={sort}"));
        }
        Ok(url)
    }

    fn accepts_url(&self, url: &str) -> bool {
        utils::canonical_host(url).ok().as_deref() == Some(HOST) && url.contains("/search")
    }

    fn available_content_filters(&self) -> &'static [&'static str] {
        &["streams", "channels", "playlists"]
    }

    fn available_sort_filters(&self) -> &'static [&'static str] {
        &["newest", "views"]
    }
}

pub struct CommentsFactory;

impl ListLinkHandlerFactory for CommentsFactory {
    fn id_from_url(&self, url: &str) -> ParsingResult<String> {
        utils::query_value(url, "t")
            .ok_or_else(|| ParsingError::field_missing("t", "missing query parameter"))
    }

    fn url_with_filters(
        &self,
        id: &str,
        _content_filters: &[String],
        _sort_filter: Option<&str>,
    ) -> ParsingResult<String> {
        Ok(format!("https://{HOST}/comments?t={id}"))
    }

    fn accepts_url(&self, url: &str) -> bool {
        utils::canonical_host(url).ok().as_deref() == Some(HOST) && url.contains("/comments")
    }
}

// ---- extractors -------------------------------------------------------

fn fetch_doc_error(doc: &Value) -> Option<ExtractionError> {
    match doc["status"].as_str() {
        Some("private") => Some(ExtractionError::PrivateContent("members only".into())),
        Some("gone") => Some(ExtractionError::ContentNotAvailable("removed".into())),
        _ => None,
    }
}

fn stream_batch(service_id: u32, doc: &Value) -> ItemsPage<StreamItem> {
    let mut collector = StreamItemsCollector::new(service_id);
    if let Some(rows) = doc["streams"].as_array() {
        for row in rows {
            collector.commit(&StreamRow(row));
        }
    }
    let next = next_cursor(doc);
    let (items, errors) = collector.into_parts();
    ItemsPage::new(items, next, errors)
}

pub struct TapedeckChannelExtractor {
    base: ExtractorBase,
    doc: Option<Value>,
}

impl TapedeckChannelExtractor {
    pub fn new(handler: ListLinkHandler, downloader: Arc<dyn Downloader>) -> Self {
        Self {
            base: ExtractorBase::new(TAPEDECK_ID, handler, downloader),
            doc: None,
        }
    }

    fn doc(&self) -> &Value {
        self.base.assert_fetched();
        self.doc.as_ref().unwrap()
    }
}

#[async_trait]
impl ListExtractor for TapedeckChannelExtractor {
    type Item = StreamItem;

    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self) -> ExtractionResult<()> {
        let url = format!("https://{HOST}/api/channel/{}?page=1", self.id());
        let response = self.base.downloader().get(&url).await.map_err(ExtractionError::from)?;
        let doc = parse_json(response.body())?;
        if let Some(error) = fetch_doc_error(&doc) {
            return Err(error);
        }
        self.doc = Some(doc);
        Ok(())
    }

    fn name(&self) -> ExtractionResult<String> {
        Ok(str_field(self.doc(), "name")?)
    }

    fn initial_page(&mut self) -> ExtractionResult<ItemsPage<StreamItem>> {
        Ok(stream_batch(self.service_id(), self.doc()))
    }

    async fn page(&mut self, page: &Page) -> ExtractionResult<ItemsPage<StreamItem>> {
        let url = page.url.clone().ok_or_else(|| {
            ExtractionError::Configuration("channel cursor without url".into())
        })?;
        let response = self.base.downloader().get(&url).await.map_err(ExtractionError::from)?;
        let doc = parse_json(response.body())?;
        Ok(stream_batch(self.service_id(), &doc))
    }
}

pub struct TapedeckSearchExtractor {
    base: ExtractorBase,
    doc: Option<Value>,
}

impl TapedeckSearchExtractor {
    pub fn new(handler: ListLinkHandler, downloader: Arc<dyn Downloader>) -> Self {
        Self {
            base: ExtractorBase::new(TAPEDECK_ID, handler, downloader),
            doc: None,
        }
    }

    fn api_url(&self) -> String {
        let handler = self.base.link_handler();
        let mut url = format!("https://{HOST}/api/search?q={}", handler.id());
        for filter in handler.content_filters() {
            url.push_str(&format!("&kind={filter}"));
        }
        if let Some(sort) = handler.sort_filter() {
            url.push_str(&format!("&sort={sort}"));
        }
        url
    }

    fn mixed_batch(&self, doc: &Value) -> ItemsPage<InfoItem> {
        let mut collector = MultiItemsCollector::new(self.base.service_id());
        if let Some(rows) = doc["results"].as_array() {
            for row in rows {
                match row["kind"].as_str() {
                    Some("channel") => collector.commit(AnyItemSource::Channel(&ChannelRow(row))),
                    Some("playlist") => {
                        collector.commit(AnyItemSource::Playlist(&PlaylistRow(row)))
                    }
                    _ => collector.commit(AnyItemSource::Stream(&StreamRow(row))),
                }
            }
        }
        let next = next_cursor(doc);
        let (items, errors) = collector.into_parts();
        ItemsPage::new(items, next, errors)
    }
}

#[async_trait]
impl ListExtractor for TapedeckSearchExtractor {
    type Item = InfoItem;

    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self) -> ExtractionResult<()> {
        let url = self.api_url();
        let response = self.base.downloader().get(&url).await.map_err(ExtractionError::from)?;
        self.doc = Some(parse_json(response.body())?);
        Ok(())
    }

    fn name(&self) -> ExtractionResult<String> {
        self.base.assert_fetched();
        // Search aggregates are named after the query string.
        Ok(self.base.link_handler().id().to_string())
    }

    fn initial_page(&mut self) -> ExtractionResult<ItemsPage<InfoItem>> {
        self.base.assert_fetched();
        let doc = self.doc.take().unwrap();
        Ok(self.mixed_batch(&doc))
    }

    async fn page(&mut self, page: &Page) -> ExtractionResult<ItemsPage<InfoItem>> {
        let url = page.url.clone().ok_or_else(|| {
            ExtractionError::Configuration("search cursor without url".into())
        })?;
        let response = self.base.downloader().get(&url).await.map_err(ExtractionError::from)?;
        let doc = parse_json(response.body())?;
        Ok(self.mixed_batch(&doc))
    }
}

pub struct TapedeckCommentsExtractor {
    base: ExtractorBase,
    doc: Option<Value>,
}

impl TapedeckCommentsExtractor {
    pub fn new(handler: ListLinkHandler, downloader: Arc<dyn Downloader>) -> Self {
        Self {
            base: ExtractorBase::new(TAPEDECK_ID, handler, downloader),
            doc: None,
        }
    }

    fn comment_batch(&self, doc: &Value) -> ItemsPage<CommentItem> {
        let mut collector = CommentItemsCollector::new(self.base.service_id());
        if let Some(rows) = doc["comments"].as_array() {
            for row in rows {
                collector.commit(&CommentRow(row));
            }
        }
        let next = next_cursor(doc);
        let (items, errors) = collector.into_parts();
        ItemsPage::new(items, next, errors)
    }
}

#[async_trait]
impl ListExtractor for TapedeckCommentsExtractor {
    type Item = CommentItem;

    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self) -> ExtractionResult<()> {
        let url = format!("https://{HOST}/api/comments?t={}", self.id());
        let response = self.base.downloader().get(&url).await.map_err(ExtractionError::from)?;
        let doc = parse_json(response.body())?;
        if let Some(error) = fetch_doc_error(&doc) {
            return Err(error);
        }
        self.doc = Some(doc);
        Ok(())
    }

    fn name(&self) -> ExtractionResult<String> {
        self.base.assert_fetched();
        Ok(format!("comments for {}", self.base.link_handler().id()))
    }

    fn initial_page(&mut self) -> ExtractionResult<ItemsPage<CommentItem>> {
        self.base.assert_fetched();
        let doc = self.doc.take().unwrap();
        Ok(self.comment_batch(&doc))
    }

    async fn page(&mut self, page: &Page) -> ExtractionResult<ItemsPage<CommentItem>> {
        let url = page.url.clone().ok_or_else(|| {
            ExtractionError::Configuration("comment cursor without url".into())
        })?;
        let response = self.base.downloader().get(&url).await.map_err(ExtractionError::from)?;
        let doc = parse_json(response.body())?;
        Ok(self.comment_batch(&doc))
    }
}

// ---- the service ------------------------------------------------------

pub struct TapedeckService {
    track_factory: TrackFactory,
    channel_factory: ChannelFactory,
    search_factory: SearchFactory,
    comments_factory: CommentsFactory,
}

impl TapedeckService {
    pub fn new() -> Self {
        Self {
            track_factory: TrackFactory,
            channel_factory: ChannelFactory,
            search_factory: SearchFactory,
            comments_factory: CommentsFactory,
        }
    }
}

impl Default for TapedeckService {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaService for TapedeckService {
    fn service_id(&self) -> u32 {
        TAPEDECK_ID
    }

    fn name(&self) -> &'static str {
        "tapedeck"
    }

    fn base_url(&self) -> &'static str {
        "https://tapedeck.example"
    }

    fn stream_factory(&self) -> Option<&dyn LinkHandlerFactory> {
        Some(&self.track_factory)
    }

    fn channel_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        Some(&self.channel_factory)
    }

    fn search_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        Some(&self.search_factory)
    }

    fn comments_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        Some(&self.comments_factory)
    }

    fn search_filters(&self) -> SearchFilters {
        tapedeck_search_filters()
    }

    fn channel_extractor(
        &self,
        handler: ListLinkHandler,
        downloader: Arc<dyn Downloader>,
    ) -> ExtractionResult<Box<dyn ListExtractor<Item = StreamItem>>> {
        Ok(Box::new(TapedeckChannelExtractor::new(handler, downloader)))
    }

    fn search_extractor(
        &self,
        handler: ListLinkHandler,
        downloader: Arc<dyn Downloader>,
    ) -> ExtractionResult<Box<dyn ListExtractor<Item = InfoItem>>> {
        Ok(Box::new(TapedeckSearchExtractor::new(handler, downloader)))
    }

    fn comments_extractor(
        &self,
        handler: ListLinkHandler,
        downloader: Arc<dyn Downloader>,
    ) -> ExtractionResult<Box<dyn ListExtractor<Item = CommentItem>>> {
        Ok(Box::new(TapedeckCommentsExtractor::new(handler, downloader)))
    }
}
