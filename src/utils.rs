//! Small URL and text helpers shared by link handler factories, adapters
//! and tests.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{ParsingError, ParsingResult};

static COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\d.]+)\s*([KMB])?$").unwrap_or_else(|e| panic!("count regex: {e}")));

/// Scheme + host (+ explicit port) of a URL, without path or query.
pub fn base_url(url: &str) -> ParsingResult<String> {
    let parsed = Url::parse(url).map_err(|e| ParsingError::malformed_url(url, e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ParsingError::malformed_url(url, "no host"))?;
    Ok(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// Value of the first query parameter named `key`, if present.
pub fn query_value(url: &str, key: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Host of a URL with a leading `www.` stripped, lowercased.
pub fn canonical_host(url: &str) -> ParsingResult<String> {
    let parsed = Url::parse(url).map_err(|e| ParsingError::malformed_url(url, e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ParsingError::malformed_url(url, "no host"))?
        .to_ascii_lowercase();
    Ok(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Strip one trailing slash, as platforms are inconsistent about emitting
/// it in canonical URLs.
pub fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Parse human-readable counts as platforms print them: "1,234", "1.2K",
/// "3.4M", "12B". Returns the expanded integer value.
pub fn parse_count_text(text: &str) -> ParsingResult<i64> {
    let cleaned = text.trim().replace(',', "").replace('\u{00a0}', "");
    let caps = COUNT_RE
        .captures(&cleaned)
        .ok_or_else(|| ParsingError::InvalidCount(text.to_string()))?;

    let number: f64 = caps[1]
        .parse()
        .map_err(|_| ParsingError::InvalidCount(text.to_string()))?;
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("K") => 1_000.0,
        Some("M") => 1_000_000.0,
        Some("B") => 1_000_000_000.0,
        _ => 1.0,
    };

    Ok((number * multiplier) as i64)
}
