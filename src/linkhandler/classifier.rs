//! Shared URL classification for families of related platforms.
//!
//! Mirror frontends of the same platform differ only in their host lists
//! and path shapes. Instead of a factory inheritance chain, each factory
//! owns (or shares) a [`UrlClassifier`] value and delegates its accept and
//! id-capture checks to it.

use regex::Regex;

use crate::utils;

/// Host/path matcher. Hosts are compared after lowercasing and stripping a
/// leading `www.`; path patterns are tried in order, first hit wins.
#[derive(Debug, Clone, Default)]
pub struct UrlClassifier {
    hosts: Vec<String>,
    host_suffixes: Vec<String>,
    path_patterns: Vec<Regex>,
}

impl UrlClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept this exact host (after `www.` stripping).
    pub fn host(mut self, host: &str) -> Self {
        self.hosts.push(host.to_ascii_lowercase());
        self
    }

    /// Accept any host ending in this suffix, e.g. `.example.com`.
    pub fn host_suffix(mut self, suffix: &str) -> Self {
        self.host_suffixes.push(suffix.to_ascii_lowercase());
        self
    }

    /// Require the path (plus query) to match one of the given patterns.
    /// The pattern's first capture group is the content id.
    pub fn path_pattern(mut self, pattern: Regex) -> Self {
        self.path_patterns.push(pattern);
        self
    }

    fn host_matches(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h == host)
            || self.host_suffixes.iter().any(|s| host.ends_with(s.as_str()))
    }

    fn path_of(url: &str) -> Option<String> {
        let parsed = url::Url::parse(url).ok()?;
        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }
        Some(path)
    }

    /// Cheap router predicate: does this URL belong to the classified
    /// family? Never panics on well-formed strings.
    pub fn accepts(&self, url: &str) -> bool {
        let Ok(host) = utils::canonical_host(url) else {
            return false;
        };
        if !self.host_matches(&host) {
            return false;
        }
        if self.path_patterns.is_empty() {
            return true;
        }
        Self::path_of(url)
            .is_some_and(|path| self.path_patterns.iter().any(|p| p.is_match(&path)))
    }

    /// Extract the content id (first capture group of the first matching
    /// path pattern). `None` when the URL is not accepted.
    pub fn capture_id(&self, url: &str) -> Option<String> {
        if !utils::canonical_host(url).is_ok_and(|h| self.host_matches(&h)) {
            return None;
        }
        let path = Self::path_of(url)?;
        self.path_patterns
            .iter()
            .find_map(|p| p.captures(&path))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
