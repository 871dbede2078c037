//! Default reqwest-backed transport with rate limiting.
//!
//! Platforms drop clients that hammer them, so the default downloader
//! enforces a per-second request quota and sends a stable user agent.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use tracing::{debug, warn};

use super::{Downloader, Method, Request, Response};
use crate::config::DownloaderConfig;
use crate::error::DownloadError;

// Body markers that indicate a bot wall rather than a real error page.
const CHALLENGE_MARKERS: [&str; 3] = ["captcha", "unusual traffic", "are you a robot"];

/// Rate-limited HTTP transport over reqwest.
pub struct HttpDownloader {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpDownloader {
    pub fn new(config: &DownloaderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("invalid user agent")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("failed to build http client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("rate limit must be greater than 0")?,
        );

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
        })
    }

    fn is_challenge(status: u16, body: &str) -> bool {
        if status == 429 {
            return true;
        }
        if status == 403 || status == 503 {
            let lowered = body.to_ascii_lowercase();
            return CHALLENGE_MARKERS.iter().any(|m| lowered.contains(m));
        }
        false
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn execute(&self, request: Request) -> Result<Response, DownloadError> {
        self.rate_limiter.until_ready().await;

        debug!(url = %request.url, method = request.method.as_str(), "executing request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Head => self.client.head(&request.url),
        };
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| DownloadError::InvalidRequest(format!("header '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| DownloadError::InvalidRequest(format!("header value: {e}")))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|source| DownloadError::Transport {
            url: request.url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let body = response.text().await.map_err(|source| DownloadError::Transport {
            url: request.url.clone(),
            source,
        })?;

        if Self::is_challenge(status, &body) {
            warn!(url = %request.url, status, "transport hit a challenge wall");
            return Err(DownloadError::Challenge {
                url: request.url,
                status,
            });
        }
        if !(200..300).contains(&status) {
            return Err(DownloadError::HttpStatus {
                status,
                url: request.url,
            });
        }

        Ok(Response::new(status, headers, body, final_url))
    }
}
