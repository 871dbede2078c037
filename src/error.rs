//! Error taxonomy for the extraction pipeline.
//!
//! Three layers with a strict propagation policy:
//! - [`ParsingError`] - field- and shape-level failures while interpreting
//!   scraped data. Cloneable so it can live in aggregate error lists.
//! - [`DownloadError`] - transport failures, with a dedicated challenge
//!   variant so callers can tell "blocked by a bot wall" apart from
//!   "content is gone".
//! - [`ExtractionError`] - the single type crossing the pipeline boundary.
//!   Fatal identity errors abort aggregate construction; everything after
//!   identity is established degrades into the aggregate's error list.

use thiserror::Error;

/// Field- and shape-level failures raised while interpreting scraped data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("required field '{field}' could not be extracted: {reason}")]
    FieldMissing { field: String, reason: String },

    #[error("url not handled by this factory: {0}")]
    UnsupportedUrl(String),

    #[error("malformed url '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("could not parse count from '{0}'")]
    InvalidCount(String),
}

impl ParsingError {
    pub fn field_missing(field: &str, reason: impl Into<String>) -> Self {
        Self::FieldMissing {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed_url(url: &str, reason: impl Into<String>) -> Self {
        Self::MalformedUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape(message.into())
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;

/// Transport failures reported by a [`Downloader`](crate::downloader::Downloader).
///
/// `Challenge` is deliberately distinct from `HttpStatus`: a challenge page
/// (CAPTCHA, bot check) is recoverable by retrying under different network
/// conditions and must never be mistaken for permanent content loss.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("challenge page returned for {url} (status {status})")]
    Challenge { url: String, status: u16 },

    #[error("http status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// The one error type that crosses the pipeline boundary.
///
/// The first five variants are fatal identity errors: the root entity
/// itself cannot be established, so no aggregate is produced. They are
/// never absorbed into an aggregate's error list.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("content not available: {0}")]
    ContentNotAvailable(String),

    #[error("content not available in the caller's region: {0}")]
    GeoRestricted(String),

    #[error("age-restricted content: {0}")]
    AgeRestricted(String),

    #[error("private content: {0}")]
    PrivateContent(String),

    #[error("account terminated: {0}")]
    AccountTerminated(String),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Programmer-facing misuse of the API: unknown filter identifier,
    /// unsupported content kind, mis-registered factory. Reported
    /// immediately, never degraded into an error list.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ExtractionError {
    /// True for errors that deny the root entity itself. These abort
    /// aggregate construction instead of being collected.
    pub fn is_fatal_identity(&self) -> bool {
        matches!(
            self,
            Self::ContentNotAvailable(_)
                | Self::GeoRestricted(_)
                | Self::AgeRestricted(_)
                | Self::PrivateContent(_)
                | Self::AccountTerminated(_)
        )
    }

    /// True when the underlying transport hit a bot-check/CAPTCHA wall.
    pub fn is_challenge(&self) -> bool {
        matches!(self, Self::Download(DownloadError::Challenge { .. }))
    }

    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Configuration(what.into())
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
