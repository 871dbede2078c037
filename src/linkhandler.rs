//! Canonical identity handling for extractable content.
//!
//! A [`LinkHandler`] freezes the (original URL, canonical URL, content id)
//! triple at adapter construction time; everything downstream addresses the
//! entity by that triple. Factories in [`factory`] perform the bidirectional
//! URL/id mapping per service and content kind; [`classifier`] carries the
//! host/path matching logic shared between mirror platforms.

pub mod classifier;
pub mod factory;

pub use classifier::UrlClassifier;
pub use factory::{LinkHandlerFactory, ListLinkHandlerFactory};

/// Canonical content identity. Immutable once built; the id is the
/// platform-meaningful identifier (never a full URL) wherever the platform
/// exposes one, and the canonical URL is reproducible from the id via the
/// factory that produced this handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHandler {
    original_url: String,
    url: String,
    id: String,
}

impl LinkHandler {
    pub fn new(
        original_url: impl Into<String>,
        url: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            url: url.into(),
            id: id.into(),
        }
    }

    /// The URL exactly as supplied by the caller.
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    /// The cleaned, canonical URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The stable, platform-meaningful content id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Identity for list-shaped content, additionally carrying the query
/// filters that were baked into the canonical URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLinkHandler {
    handler: LinkHandler,
    content_filters: Vec<String>,
    sort_filter: Option<String>,
}

impl ListLinkHandler {
    pub fn new(
        handler: LinkHandler,
        content_filters: Vec<String>,
        sort_filter: Option<String>,
    ) -> Self {
        Self {
            handler,
            content_filters,
            sort_filter,
        }
    }

    pub fn original_url(&self) -> &str {
        self.handler.original_url()
    }

    pub fn url(&self) -> &str {
        self.handler.url()
    }

    pub fn id(&self) -> &str {
        self.handler.id()
    }

    pub fn content_filters(&self) -> &[String] {
        &self.content_filters
    }

    pub fn sort_filter(&self) -> Option<&str> {
        self.sort_filter.as_deref()
    }
}

impl From<LinkHandler> for ListLinkHandler {
    fn from(handler: LinkHandler) -> Self {
        Self::new(handler, Vec::new(), None)
    }
}
