//! Bidirectional URL/id mapping contracts.
//!
//! One factory exists per service and content kind (stream, channel,
//! playlist, search, comments). Factories are stateless, so callers may
//! build as many handlers as they like concurrently. `id_from_url` is
//! allowed to perform a network round-trip on platforms whose slugs are
//! not purely syntactic, but must stay idempotent so results are cacheable.

use tracing::trace;

use super::{LinkHandler, ListLinkHandler};
use crate::error::{ExtractionError, ExtractionResult, ParsingError, ParsingResult};

/// URL/id mapping for single-entity content kinds.
///
/// Invariant: `id_from_url(url_from_id(id)) == id` for every id this
/// factory itself produced.
pub trait LinkHandlerFactory: Send + Sync {
    /// Extract the stable content id. Fails with [`ParsingError`] when the
    /// URL does not belong to this factory's domain or content kind.
    fn id_from_url(&self, url: &str) -> ParsingResult<String>;

    /// Build the canonical URL for an id. Pure; the left inverse of
    /// [`Self::id_from_url`].
    fn url_from_id(&self, id: &str) -> ParsingResult<String>;

    /// Cheap router predicate used to pick between competing factories of
    /// the same service. Must never panic for well-formed strings.
    fn accepts_url(&self, url: &str) -> bool;

    /// Resolve a raw caller-supplied URL into a canonical handler.
    fn from_url(&self, url: &str) -> ParsingResult<LinkHandler> {
        if !self.accepts_url(url) {
            return Err(ParsingError::UnsupportedUrl(url.to_string()));
        }
        let id = self.id_from_url(url)?;
        let canonical = self.url_from_id(&id)?;
        trace!(url, id, canonical, "resolved link handler");
        Ok(LinkHandler::new(url, canonical, id))
    }

    /// Build a handler directly from a known-good id.
    fn from_id(&self, id: &str) -> ParsingResult<LinkHandler> {
        let url = self.url_from_id(id)?;
        Ok(LinkHandler::new(url.clone(), url, id))
    }
}

/// URL/id mapping for list-shaped content kinds, threading content and
/// sort filters through URL construction.
pub trait ListLinkHandlerFactory: Send + Sync {
    fn id_from_url(&self, url: &str) -> ParsingResult<String>;

    /// Build the canonical URL for an id under the given filters. Pure.
    fn url_with_filters(
        &self,
        id: &str,
        content_filters: &[String],
        sort_filter: Option<&str>,
    ) -> ParsingResult<String>;

    fn accepts_url(&self, url: &str) -> bool;

    /// The enumerable content-filter option set. Empty when the kind has
    /// no filters.
    fn available_content_filters(&self) -> &'static [&'static str] {
        &[]
    }

    /// The enumerable sort-filter option set.
    fn available_sort_filters(&self) -> &'static [&'static str] {
        &[]
    }

    fn from_url(&self, url: &str) -> ParsingResult<ListLinkHandler> {
        if !self.accepts_url(url) {
            return Err(ParsingError::UnsupportedUrl(url.to_string()));
        }
        let id = self.id_from_url(url)?;
        let canonical = self.url_with_filters(&id, &[], None)?;
        Ok(ListLinkHandler::new(
            LinkHandler::new(url, canonical, id),
            Vec::new(),
            None,
        ))
    }

    fn from_id(&self, id: &str) -> ParsingResult<ListLinkHandler> {
        let url = self.url_with_filters(id, &[], None)?;
        Ok(ListLinkHandler::new(
            LinkHandler::new(url.clone(), url, id),
            Vec::new(),
            None,
        ))
    }

    /// Build a handler from an id plus selected filters. Selecting a
    /// filter not present in the advertised option sets is a configuration
    /// error, raised here - before any network call.
    fn from_query(
        &self,
        id: &str,
        content_filters: &[String],
        sort_filter: Option<&str>,
    ) -> ExtractionResult<ListLinkHandler> {
        for filter in content_filters {
            if !self.available_content_filters().contains(&filter.as_str()) {
                return Err(ExtractionError::Configuration(format!(
                    "unknown content filter '{filter}'"
                )));
            }
        }
        if let Some(sort) = sort_filter {
            if !self.available_sort_filters().contains(&sort) {
                return Err(ExtractionError::Configuration(format!(
                    "unknown sort filter '{sort}'"
                )));
            }
        }

        let url = self.url_with_filters(id, content_filters, sort_filter)?;
        Ok(ListLinkHandler::new(
            LinkHandler::new(url.clone(), url, id),
            content_filters.to_vec(),
            sort_filter.map(str::to_string),
        ))
    }
}
