//! List-shaped extraction: fetch-once state machine plus pagination.
//!
//! An extractor is single-use and bound to one entity through its
//! [`ListLinkHandler`]. `fetch_page` runs the adapter's network work exactly
//! once; accessors that need fetched state call
//! [`ExtractorBase::assert_fetched`] and panic on misuse, since calling them
//! early is a programming error, not a runtime condition.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::downloader::Downloader;
use crate::error::{ExtractionError, ExtractionResult};
use crate::linkhandler::ListLinkHandler;
use crate::page::Page;

/// Total-count sentinel: the platform does not expose a count.
pub const ITEM_COUNT_UNKNOWN: i64 = -1;
/// Total-count sentinel: the list is endless (live feeds, radio mixes).
pub const ITEM_COUNT_INFINITE: i64 = -2;
/// Total-count sentinel: the platform reports only "more than 100".
pub const ITEM_COUNT_MORE_THAN_100: i64 = -3;

/// One fetched batch: items in presentation order, the cursor for the next
/// batch, and the failures recovered while building the batch.
#[derive(Debug)]
pub struct ItemsPage<T> {
    pub items: Vec<T>,
    pub next_page: Option<Page>,
    pub errors: Vec<ExtractionError>,
}

impl<T> ItemsPage<T> {
    pub fn new(items: Vec<T>, next_page: Option<Page>, errors: Vec<ExtractionError>) -> Self {
        Self {
            items,
            next_page,
            errors,
        }
    }

    /// Terminal batch: nothing in it and nothing after it.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_page: None,
            errors: Vec::new(),
        }
    }

    pub fn has_next_page(&self) -> bool {
        Page::is_valid(self.next_page.as_ref())
    }
}

/// Shared per-extractor state. Adapters embed one and expose it through
/// [`ListExtractor::base`].
pub struct ExtractorBase {
    service_id: u32,
    link_handler: ListLinkHandler,
    downloader: Arc<dyn Downloader>,
    fetched: bool,
}

impl ExtractorBase {
    pub fn new(
        service_id: u32,
        link_handler: ListLinkHandler,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        Self {
            service_id,
            link_handler,
            downloader,
            fetched: false,
        }
    }

    pub fn service_id(&self) -> u32 {
        self.service_id
    }

    pub fn link_handler(&self) -> &ListLinkHandler {
        &self.link_handler
    }

    pub fn downloader(&self) -> &Arc<dyn Downloader> {
        &self.downloader
    }

    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    pub fn mark_fetched(&mut self) {
        self.fetched = true;
    }

    /// Guard for accessors that require fetched state.
    ///
    /// # Panics
    /// When `fetch_page` has not completed yet.
    pub fn assert_fetched(&self) {
        assert!(
            self.fetched,
            "extractor accessor called before fetch_page for {}",
            self.link_handler.url()
        );
    }
}

impl std::fmt::Debug for ExtractorBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorBase")
            .field("service_id", &self.service_id)
            .field("url", &self.link_handler.url())
            .field("fetched", &self.fetched)
            .finish()
    }
}

/// A single-use extractor over one list-shaped entity.
///
/// Lifecycle: construct, `fetch_page().await`, read `name`/`initial_page`,
/// then follow cursors with `page`. `page` does not require `fetch_page`,
/// matching resumable pagination from a persisted cursor.
#[async_trait]
pub trait ListExtractor: Send {
    type Item;

    fn base(&self) -> &ExtractorBase;

    fn base_mut(&mut self) -> &mut ExtractorBase;

    /// Adapter hook: download and parse everything the initial page needs.
    /// Fatal identity errors propagate from here.
    async fn on_fetch_page(&mut self) -> ExtractionResult<()>;

    /// Run the fetch exactly once. Subsequent calls are no-ops.
    async fn fetch_page(&mut self) -> ExtractionResult<()> {
        if self.base().is_fetched() {
            return Ok(());
        }
        debug!(url = self.base().link_handler().url(), "fetching initial page");
        self.on_fetch_page().await?;
        self.base_mut().mark_fetched();
        Ok(())
    }

    /// Display name of the root entity. Requires fetched state.
    fn name(&self) -> ExtractionResult<String>;

    /// First batch of items. Requires fetched state.
    fn initial_page(&mut self) -> ExtractionResult<ItemsPage<Self::Item>>;

    /// Fetch the batch a cursor points at. Stateless with respect to
    /// `fetch_page`; a persisted cursor works on a fresh extractor.
    async fn page(&mut self, page: &Page) -> ExtractionResult<ItemsPage<Self::Item>>;

    /// Total item count when the platform reports one, otherwise one of
    /// the `ITEM_COUNT_*` sentinels.
    fn total_count(&self) -> i64 {
        ITEM_COUNT_UNKNOWN
    }

    fn service_id(&self) -> u32 {
        self.base().service_id()
    }

    fn link_handler(&self) -> &ListLinkHandler {
        self.base().link_handler()
    }

    fn url(&self) -> &str {
        self.base().link_handler().url()
    }

    fn id(&self) -> &str {
        self.base().link_handler().id()
    }

    fn original_url(&self) -> &str {
        self.base().link_handler().original_url()
    }
}
