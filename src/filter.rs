//! Typed, enumerable query parameters for list queries.
//!
//! Content filters narrow *what* a list query returns ("videos",
//! "channels"); sort filters order it. Which sort options are legal
//! depends on the active content filter, so sort containers are nested
//! under content-filter items. Adapters fold the selected items into a
//! platform query fragment; the generic engine only validates selections
//! and concatenates fragments.

use std::collections::HashMap;

use crate::error::{ExtractionError, ExtractionResult};

/// Separator used when folding selected filter fragments into one query
/// string.
const QUERY_SEPARATOR: char = '&';

/// One selectable filter option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterItem {
    /// Unique within one container (and its variants).
    pub identifier: u32,
    /// Display-name key; translation is the caller's concern.
    pub name: &'static str,
    /// Adapter-specific query fragment, `None` for pure-default options
    /// that contribute nothing to the query.
    pub query: Option<&'static str>,
}

impl FilterItem {
    pub const fn new(identifier: u32, name: &'static str, query: Option<&'static str>) -> Self {
        Self {
            identifier,
            name,
            query,
        }
    }
}

/// A named group of filter items, either mutually exclusive (pick one) or
/// independent (pick any), with one item marked as the default.
#[derive(Debug, Clone)]
pub struct FilterGroup {
    pub identifier: u32,
    pub name: &'static str,
    pub only_one_selectable: bool,
    pub default_item: Option<u32>,
    pub items: Vec<FilterItem>,
}

impl FilterGroup {
    pub fn new(
        identifier: u32,
        name: &'static str,
        only_one_selectable: bool,
        default_item: Option<u32>,
        items: Vec<FilterItem>,
    ) -> Self {
        Self {
            identifier,
            name,
            only_one_selectable,
            default_item,
            items,
        }
    }

    fn contains(&self, identifier: u32) -> bool {
        self.items.iter().any(|i| i.identifier == identifier)
    }
}

/// A set of filter groups with an id index for O(1) selection validation.
///
/// Duplicate item identifiers are a programmer error and panic at
/// construction, before the container can reach any caller.
#[derive(Debug, Clone, Default)]
pub struct FilterContainer {
    groups: Vec<FilterGroup>,
    index: HashMap<u32, FilterItem>,
}

impl FilterContainer {
    pub fn new(groups: Vec<FilterGroup>) -> Self {
        let mut index = HashMap::new();
        for group in &groups {
            for item in &group.items {
                if index.insert(item.identifier, *item).is_some() {
                    panic!(
                        "filter item id {} used more than once in one container",
                        item.identifier
                    );
                }
            }
        }
        Self { groups, index }
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    pub fn item(&self, identifier: u32) -> Option<&FilterItem> {
        self.index.get(&identifier)
    }

    fn group_of(&self, identifier: u32) -> Option<&FilterGroup> {
        self.groups.iter().find(|g| g.contains(identifier))
    }
}

/// Selection and evaluation engine for one service's search filters.
///
/// Built once per service from its content-filter container plus the sort
/// variants attached to individual content items.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    content: FilterContainer,
    sort_variants: HashMap<u32, FilterContainer>,
    selected_content: Vec<FilterItem>,
    selected_sort: Vec<FilterItem>,
}

impl SearchFilters {
    pub fn new(content: FilterContainer) -> Self {
        Self {
            content,
            sort_variants: HashMap::new(),
            selected_content: Vec::new(),
            selected_sort: Vec::new(),
        }
    }

    /// Attach the sort options that become legal when `content_item_id` is
    /// the active content filter. Panics if the content item is unknown
    /// (mis-wired service definition).
    pub fn with_sort_variant(mut self, content_item_id: u32, variant: FilterContainer) -> Self {
        assert!(
            self.content.item(content_item_id).is_some(),
            "sort variant attached to unknown content filter id {content_item_id}"
        );
        self.sort_variants.insert(content_item_id, variant);
        self
    }

    pub fn content_filters(&self) -> &FilterContainer {
        &self.content
    }

    /// Sort options eligible under the given content filter, if any.
    pub fn sort_variant(&self, content_item_id: u32) -> Option<&FilterContainer> {
        self.sort_variants.get(&content_item_id)
    }

    /// Select content filters by identifier. Unknown identifiers and
    /// double selections within a pick-one group are configuration errors,
    /// reported before any network activity. Clears the sort selection
    /// when it is no longer legal under the new content selection.
    pub fn set_selected_content_filters(&mut self, identifiers: &[u32]) -> ExtractionResult<()> {
        let mut selected = Vec::with_capacity(identifiers.len());
        let mut seen_groups: Vec<u32> = Vec::new();

        for &id in identifiers {
            let item = self.content.item(id).ok_or_else(|| {
                ExtractionError::Configuration(format!("unknown content filter id {id}"))
            })?;
            let group = self
                .content
                .group_of(id)
                .unwrap_or_else(|| panic!("indexed filter id {id} missing from groups"));
            if group.only_one_selectable && seen_groups.contains(&group.identifier) {
                return Err(ExtractionError::Configuration(format!(
                    "group '{}' allows only one selection",
                    group.name
                )));
            }
            seen_groups.push(group.identifier);
            selected.push(*item);
        }

        self.selected_content = selected;
        let legal: Vec<FilterItem> = self
            .selected_sort
            .iter()
            .filter(|item| self.sort_id_is_legal(item.identifier))
            .copied()
            .collect();
        self.selected_sort = legal;
        Ok(())
    }

    fn sort_id_is_legal(&self, id: u32) -> bool {
        if self.selected_content.is_empty() {
            return self.sort_variants.values().any(|v| v.item(id).is_some());
        }
        self.selected_content.iter().any(|c| {
            self.sort_variants
                .get(&c.identifier)
                .is_some_and(|v| v.item(id).is_some())
        })
    }

    /// Select sort filters by identifier, validated against the sort
    /// variants eligible under the current content selection.
    pub fn set_selected_sort_filters(&mut self, identifiers: &[u32]) -> ExtractionResult<()> {
        let mut selected = Vec::with_capacity(identifiers.len());
        for &id in identifiers {
            if !self.sort_id_is_legal(id) {
                return Err(ExtractionError::Configuration(format!(
                    "sort filter id {id} is not eligible under the current content selection"
                )));
            }
            let item = self
                .sort_variants
                .values()
                .find_map(|v| v.item(id))
                .unwrap_or_else(|| panic!("legal sort id {id} missing from variants"));
            selected.push(*item);
        }
        self.selected_sort = selected;
        Ok(())
    }

    pub fn selected_content_filters(&self) -> &[FilterItem] {
        &self.selected_content
    }

    pub fn selected_sort_filters(&self) -> &[FilterItem] {
        &self.selected_sort
    }

    /// Fold the selected content filters into a query fragment, in
    /// selection order. Empty selection evaluates to the empty string.
    pub fn evaluate_content_filters(&self) -> String {
        Self::join_fragments(&self.selected_content)
    }

    /// Fold the selected sort filters into a query fragment.
    pub fn evaluate_sort_filters(&self) -> String {
        Self::join_fragments(&self.selected_sort)
    }

    fn join_fragments(items: &[FilterItem]) -> String {
        let fragments: Vec<&str> = items.iter().filter_map(|i| i.query).collect();
        fragments.join(&QUERY_SEPARATOR.to_string())
    }
}
