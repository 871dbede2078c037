//! medialens - resilient metadata extraction for third-party media
//! platforms.
//!
//! The pipeline turns platform URLs into typed aggregates while tolerating
//! the breakage scraping implies: a malformed row, a missing field or an
//! unavailable page degrades the result instead of failing the whole
//! extraction. Everything recovered from is recorded, nothing is silently
//! lost.
//!
//! The moving parts:
//! - [`linkhandler`]: canonical (URL, id) identity and per-kind factories.
//! - [`page`]: opaque, serializable pagination cursors.
//! - [`items`]: per-kind collectors with the isolate-and-continue policy.
//! - [`extractor`]: the single-use fetch/paginate state machine.
//! - [`info`]: two-phase aggregate assembly on top of extractors.
//! - [`service`] / [`ServiceRegistry`]: routing URLs to platform adapters.
//! - [`filter`]: typed, enumerable search filters.
//! - [`downloader`]: the injected transport boundary.
//!
//! ```no_run
//! use std::sync::Arc;
//! use medialens::{HttpDownloader, DownloaderConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let downloader = Arc::new(HttpDownloader::new(&DownloaderConfig::default())?);
//! // Hand `downloader` to a service's extractor constructors.
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod info;
pub mod items;
pub mod linkhandler;
pub mod logging;
pub mod page;
pub mod service;
pub mod utils;

pub use config::{DownloaderConfig, ExtractorConfig};
pub use downloader::{Downloader, HttpDownloader, Request, Response};
pub use error::{DownloadError, ExtractionError, ExtractionResult, ParsingError, ParsingResult};
pub use extractor::{ExtractorBase, ItemsPage, ListExtractor};
pub use filter::{FilterContainer, FilterGroup, FilterItem, SearchFilters};
pub use info::{FieldGroup, Info, ListInfo};
pub use items::{
    ChannelItem, CommentItem, InfoItem, InfoType, PlaylistItem, StreamItem,
};
pub use linkhandler::{
    LinkHandler, LinkHandlerFactory, ListLinkHandler, ListLinkHandlerFactory, UrlClassifier,
};
pub use page::Page;
pub use service::{LinkType, MediaService, ServiceRegistry};
