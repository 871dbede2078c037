//! The partial-failure extraction engine shared by all item kinds.
//!
//! One malformed row on a page must not lose the rest of the page, and one
//! missing optional field must not lose its row. [`Extracted`] records the
//! outcome of a single row - value, defaulted fields, errors - and
//! [`CollectorCore`] accumulates rows in presentation order while keeping
//! every recovered failure auditable.

use tracing::{debug, warn};

use crate::error::{ExtractionError, ParsingResult};

/// Outcome of extracting one row: the (possibly partially defaulted) value
/// plus the record of which optional fields fell back and why.
#[derive(Debug)]
pub struct Extracted<T> {
    pub value: T,
    pub defaulted: Vec<&'static str>,
    pub errors: Vec<ExtractionError>,
}

impl<T> Extracted<T> {
    /// Start from a value whose mandatory fields already extracted.
    pub fn new(value: T) -> Self {
        Self {
            value,
            defaulted: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Attempt one optional field: on success store it through `set`, on
    /// failure keep the documented default and record the error. Never
    /// propagates.
    pub fn field<V>(
        &mut self,
        name: &'static str,
        get: impl FnOnce() -> ParsingResult<V>,
        set: impl FnOnce(&mut T, V),
    ) {
        match get() {
            Ok(value) => set(&mut self.value, value),
            Err(error) => {
                debug!(field = name, %error, "optional field defaulted");
                self.defaulted.push(name);
                self.errors.push(error.into());
            }
        }
    }

    /// Re-wrap the value, keeping the failure record. Used by the unified
    /// search collector to lift kind-specific items into `InfoItem`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        Extracted {
            value: f(self.value),
            defaulted: self.defaulted,
            errors: self.errors,
        }
    }
}

/// Ordered accumulator for extracted items and recovered errors.
///
/// Items keep the order `push` was called in - that order is the
/// platform's presentation order and is never re-sorted.
#[derive(Debug)]
pub struct CollectorCore<T> {
    service_id: u32,
    items: Vec<T>,
    errors: Vec<ExtractionError>,
}

impl<T> CollectorCore<T> {
    pub fn new(service_id: u32) -> Self {
        Self {
            service_id,
            items: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn service_id(&self) -> u32 {
        self.service_id
    }

    /// Accept a row whose mandatory fields extracted; its recovered
    /// field-level errors join the collector's list.
    pub fn push(&mut self, extracted: Extracted<T>) {
        self.errors.extend(extracted.errors);
        self.items.push(extracted.value);
    }

    /// Drop a row whose mandatory extraction failed, recording exactly one
    /// error for it.
    pub fn drop_item(&mut self, error: ExtractionError) {
        warn!(%error, "dropping malformed item");
        self.errors.push(error);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn errors(&self) -> &[ExtractionError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<ExtractionError>) {
        (self.items, self.errors)
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.errors.clear();
    }
}
