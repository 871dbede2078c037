//! Service abstraction and the registry that routes URLs to services.
//!
//! A [`MediaService`] bundles one platform's factories and extractor
//! constructors behind a stable numeric id. Capability is expressed by
//! which factory getters return `Some`; extractor constructors for
//! unsupported kinds fail with a configuration error instead of
//! pretending to work.

use std::sync::Arc;

use tracing::debug;

use crate::downloader::Downloader;
use crate::error::{ExtractionError, ExtractionResult};
use crate::extractor::ListExtractor;
use crate::filter::SearchFilters;
use crate::items::{CommentItem, InfoItem, StreamItem};
use crate::linkhandler::{LinkHandlerFactory, ListLinkHandler, ListLinkHandlerFactory};

/// What kind of entity a URL points at within one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    None,
    Stream,
    Channel,
    Playlist,
}

/// One platform integration. Implementations are stateless and shared;
/// per-extraction state lives in the extractors they construct.
pub trait MediaService: Send + Sync {
    /// Registry-unique numeric id, stamped into every item this service
    /// produces.
    fn service_id(&self) -> u32;

    fn name(&self) -> &'static str;

    fn base_url(&self) -> &'static str;

    fn stream_factory(&self) -> Option<&dyn LinkHandlerFactory> {
        None
    }

    fn channel_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        None
    }

    fn playlist_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        None
    }

    fn search_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        None
    }

    fn comments_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        None
    }

    /// The typed search filters this service understands. Empty by
    /// default.
    fn search_filters(&self) -> SearchFilters {
        SearchFilters::default()
    }

    /// Classify a URL against this service's factories. Stream wins over
    /// channel wins over playlist when patterns overlap.
    fn link_type_of(&self, url: &str) -> LinkType {
        if self.stream_factory().is_some_and(|f| f.accepts_url(url)) {
            LinkType::Stream
        } else if self.channel_factory().is_some_and(|f| f.accepts_url(url)) {
            LinkType::Channel
        } else if self.playlist_factory().is_some_and(|f| f.accepts_url(url)) {
            LinkType::Playlist
        } else {
            LinkType::None
        }
    }

    fn supports_url(&self, url: &str) -> bool {
        self.link_type_of(url) != LinkType::None
    }

    fn channel_extractor(
        &self,
        handler: ListLinkHandler,
        downloader: Arc<dyn Downloader>,
    ) -> ExtractionResult<Box<dyn ListExtractor<Item = StreamItem>>> {
        let _ = (handler, downloader);
        Err(ExtractionError::unsupported(format!(
            "{} does not support channel extraction",
            self.name()
        )))
    }

    fn playlist_extractor(
        &self,
        handler: ListLinkHandler,
        downloader: Arc<dyn Downloader>,
    ) -> ExtractionResult<Box<dyn ListExtractor<Item = StreamItem>>> {
        let _ = (handler, downloader);
        Err(ExtractionError::unsupported(format!(
            "{} does not support playlist extraction",
            self.name()
        )))
    }

    fn search_extractor(
        &self,
        handler: ListLinkHandler,
        downloader: Arc<dyn Downloader>,
    ) -> ExtractionResult<Box<dyn ListExtractor<Item = InfoItem>>> {
        let _ = (handler, downloader);
        Err(ExtractionError::unsupported(format!(
            "{} does not support search",
            self.name()
        )))
    }

    fn comments_extractor(
        &self,
        handler: ListLinkHandler,
        downloader: Arc<dyn Downloader>,
    ) -> ExtractionResult<Box<dyn ListExtractor<Item = CommentItem>>> {
        let _ = (handler, downloader);
        Err(ExtractionError::unsupported(format!(
            "{} does not support comments",
            self.name()
        )))
    }
}

/// Explicit, order-preserving service collection.
///
/// URL routing asks services in registration order and the first service
/// that recognizes a URL wins, so registration order is part of the
/// routing contract.
#[derive(Default)]
pub struct ServiceRegistry {
    services: Vec<Arc<dyn MediaService>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service.
    ///
    /// # Panics
    /// When the service id is already taken; two services with one id is a
    /// wiring bug that must not survive startup.
    pub fn register(&mut self, service: Arc<dyn MediaService>) {
        assert!(
            self.by_id(service.service_id()).is_none(),
            "service id {} registered twice",
            service.service_id()
        );
        debug!(id = service.service_id(), name = service.name(), "registered service");
        self.services.push(service);
    }

    pub fn by_id(&self, service_id: u32) -> Option<&Arc<dyn MediaService>> {
        self.services.iter().find(|s| s.service_id() == service_id)
    }

    pub fn services(&self) -> &[Arc<dyn MediaService>] {
        &self.services
    }

    /// Route a URL to the first registered service that recognizes it,
    /// together with the link type it recognized.
    pub fn service_for_url(&self, url: &str) -> Option<(&Arc<dyn MediaService>, LinkType)> {
        self.services.iter().find_map(|service| {
            match service.link_type_of(url) {
                LinkType::None => None,
                link_type => Some((service, link_type)),
            }
        })
    }
}
