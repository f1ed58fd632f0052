//! Per-item results of an extraction pass.

use serde::Serialize;

/// An input item that was dropped during extraction, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub item: String,
    pub reason: String,
}

impl SkippedItem {
    pub fn new(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            reason: reason.into(),
        }
    }
}

/// Extracted value together with the items that could not be used.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub value: T,
    pub skipped: Vec<SkippedItem>,
}

impl<T> Extraction<T> {
    pub fn new(value: T, skipped: Vec<SkippedItem>) -> Self {
        Self { value, skipped }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extraction<U> {
        Extraction {
            value: f(self.value),
            skipped: self.skipped,
        }
    }
}

/// Log and remember a dropped item.
pub(crate) fn record_skip(
    skipped: &mut Vec<SkippedItem>,
    item: impl Into<String>,
    reason: impl Into<String>,
) {
    let entry = SkippedItem::new(item, reason);
    log::warn!("skipping {}: {}", entry.item, entry.reason);
    skipped.push(entry);
}
