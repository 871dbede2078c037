//! Opaque continuation cursor for paginated extraction.
//!
//! A [`Page`] is produced by an adapter after each fetch and handed back to
//! the same adapter type on the next call. Callers treat it as opaque; only
//! string/string-map payloads are allowed so cursors can be serialized and
//! persisted across process restarts for resumable pagination.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Continuation cursor. At least one field is non-empty while more results
/// exist; an absent or content-less cursor is the *only* termination signal.
/// Never mutated in place - adapters replace it wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Next request URL, when pagination is URL-driven.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Auxiliary id list, for platforms that paginate over pre-fetched ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,

    /// Request body/parameter map, for POST-driven continuation schemes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub body: BTreeMap<String, String>,
}

impl Page {
    /// Cursor carrying only a next-page URL.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Cursor carrying a list of ids still to be fetched.
    pub fn for_ids(ids: Vec<String>) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_body_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// True when the cursor actually points somewhere.
    pub fn has_content(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
            || !self.ids.is_empty()
            || !self.body.is_empty()
    }

    /// Whether `page` signals that more results exist. This is the single
    /// place that interprets the termination sentinel.
    pub fn is_valid(page: Option<&Page>) -> bool {
        page.is_some_and(Page::has_content)
    }
}
