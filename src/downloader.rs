//! Transport collaborator boundary.
//!
//! The pipeline never talks to the network directly: adapters receive a
//! [`Downloader`] and issue [`Request`]s through it. The default
//! implementation lives in [`http`]; tests inject deterministic fakes.
//! Retry and caching policy belong to the implementation behind this trait,
//! not to the pipeline.

pub mod http;

use async_trait::async_trait;

use crate::error::DownloadError;

pub use http::HttpDownloader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Head,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Head => "HEAD",
        }
    }
}

/// One outgoing request. Built with the short constructors and the
/// builder-style `header`/`body` methods.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self {
            method: Method::Head,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// One transport response. `final_url` reflects any redirects the
/// transport followed, which adapters use for canonicalization.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
    final_url: String,
}

impl Response {
    pub fn new(
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
        final_url: String,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            final_url,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Injected transport. Implementations decide on retries, caching,
/// cookies and rate limiting; the pipeline only requires that challenge
/// walls surface as [`DownloadError::Challenge`].
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, DownloadError>;

    async fn get(&self, url: &str) -> Result<Response, DownloadError> {
        self.execute(Request::get(url)).await
    }

    async fn get_with_headers(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Response, DownloadError> {
        let mut request = Request::get(url);
        request.headers = headers.to_vec();
        self.execute(request).await
    }

    async fn post(&self, url: &str, body: &str) -> Result<Response, DownloadError> {
        self.execute(Request::post(url, body)).await
    }
}
