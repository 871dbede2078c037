//! Aggregate assembly on top of extractors.
//!
//! Assembly is two-phase. Phase one establishes identity (service, id,
//! URLs, name) by running the extractor's fetch; any failure there is fatal
//! and no aggregate is produced. Phase two gathers everything else under
//! the isolate-and-continue policy: failures land in the aggregate's error
//! list, and that list never holds a fatal identity error.

use tracing::warn;

use crate::error::{ExtractionError, ExtractionResult};
use crate::extractor::{ItemsPage, ListExtractor};
use crate::page::Page;

/// Identity core shared by every aggregate, plus the recovered errors
/// collected while filling in the rest.
#[derive(Debug)]
pub struct Info {
    pub service_id: u32,
    pub id: String,
    pub url: String,
    pub original_url: String,
    pub name: String,
    pub errors: Vec<ExtractionError>,
}

impl Info {
    /// Phase one: freeze identity from a fetched extractor. A name failure
    /// here is fatal.
    pub fn from_extractor<E>(extractor: &E) -> ExtractionResult<Self>
    where
        E: ListExtractor + ?Sized,
    {
        let handler = extractor.link_handler();
        Ok(Self {
            service_id: extractor.service_id(),
            id: handler.id().to_string(),
            url: handler.url().to_string(),
            original_url: handler.original_url().to_string(),
            name: extractor.name()?,
            errors: Vec::new(),
        })
    }

    pub fn add_error(&mut self, error: ExtractionError) {
        debug_assert!(!error.is_fatal_identity());
        self.errors.push(error);
    }

    pub fn add_errors(&mut self, errors: impl IntoIterator<Item = ExtractionError>) {
        for error in errors {
            self.add_error(error);
        }
    }
}

/// Phase-two field helper: run one optional accessor, record a recoverable
/// failure, propagate a fatal one.
pub fn try_field<T>(
    errors: &mut Vec<ExtractionError>,
    get: impl FnOnce() -> ExtractionResult<T>,
) -> ExtractionResult<Option<T>> {
    match get() {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_fatal_identity() => Err(error),
        Err(error) => {
            warn!(%error, "optional aggregate field failed");
            errors.push(error);
            Ok(None)
        }
    }
}

/// Failure buffer for a cluster of logically related optional fields
/// (uploader name/url/avatar, for instance). Some entities legitimately
/// lack the whole cluster; the caller decides after all attempts whether
/// the buffered failures count as errors or as expected absence.
#[derive(Debug, Default)]
pub struct FieldGroup {
    errors: Vec<ExtractionError>,
    attempts: usize,
    failures: usize,
}

impl FieldGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one accessor of the cluster. Recoverable failures are buffered
    /// here instead of the aggregate; fatal ones propagate.
    pub fn attempt<T>(
        &mut self,
        get: impl FnOnce() -> ExtractionResult<T>,
    ) -> ExtractionResult<Option<T>> {
        self.attempts += 1;
        match get() {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_fatal_identity() => Err(error),
            Err(error) => {
                self.failures += 1;
                self.errors.push(error);
                Ok(None)
            }
        }
    }

    /// True when every attempt so far failed. The usual absence heuristic
    /// combines this with an adapter-specific signal.
    pub fn all_failed(&self) -> bool {
        self.attempts > 0 && self.failures == self.attempts
    }

    /// Resolve the cluster: discard the buffered failures when the entity
    /// legitimately lacks these fields, otherwise flush them into the
    /// aggregate's error list.
    pub fn finish(self, errors: &mut Vec<ExtractionError>, absent_ok: bool) {
        if !absent_ok {
            errors.extend(self.errors);
        }
    }
}

fn items_page_or_record<T>(
    result: ExtractionResult<ItemsPage<T>>,
    errors: &mut Vec<ExtractionError>,
) -> ExtractionResult<ItemsPage<T>> {
    match result {
        Ok(page) => Ok(page),
        Err(error) if error.is_fatal_identity() => Err(error),
        Err(error) => {
            warn!(%error, "initial items unavailable, keeping identity");
            errors.push(error);
            Ok(ItemsPage::empty())
        }
    }
}

/// Aggregate for list-shaped content: the identity core, the first batch of
/// items and the cursor to continue from.
#[derive(Debug)]
pub struct ListInfo<T> {
    pub info: Info,
    pub related_items: Vec<T>,
    pub next_page: Option<Page>,
    pub content_filters: Vec<String>,
    pub sort_filter: Option<String>,
}

impl<T> ListInfo<T> {
    /// Drive an extractor through fetch, identity and the initial batch.
    ///
    /// Only fatal identity errors surface as `Err`; batch-level failures
    /// degrade into `info.errors` with an empty item list.
    pub async fn collect<E>(extractor: &mut E) -> ExtractionResult<Self>
    where
        E: ListExtractor<Item = T> + ?Sized,
    {
        extractor.fetch_page().await?;
        let mut info = Info::from_extractor(extractor)?;

        let handler = extractor.link_handler();
        let content_filters = handler.content_filters().to_vec();
        let sort_filter = handler.sort_filter().map(str::to_string);

        let page = items_page_or_record(extractor.initial_page(), &mut info.errors)?;
        info.add_errors(page.errors);

        Ok(Self {
            info,
            related_items: page.items,
            next_page: page.next_page,
            content_filters,
            sort_filter,
        })
    }

    /// Follow a cursor. The caller owns loop termination via
    /// [`Page::is_valid`] on the returned batch's cursor.
    pub async fn more_items<E>(
        extractor: &mut E,
        page: &Page,
    ) -> ExtractionResult<ItemsPage<T>>
    where
        E: ListExtractor<Item = T> + ?Sized,
    {
        extractor.page(page).await
    }

    pub fn has_next_page(&self) -> bool {
        Page::is_valid(self.next_page.as_ref())
    }
}
