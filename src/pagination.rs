//! Pagination utilities for Travis API responses.
//!
//! Travis v3 collections are paged with `limit`/`offset` and describe the
//! current window in an `@pagination` object.

use serde::{Deserialize, Serialize};

/// A page of results from the Travis API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages (if known).
    pub total: Option<u64>,
    /// Offset of the first item on this page.
    pub offset: u32,
    /// Maximum number of items per page.
    pub limit: u32,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, offset: u32, limit: u32, total: Option<u64>) -> Self {
        let has_more = match total {
            Some(t) => u64::from(offset) + (items.len() as u64) < t,
            None => items.len() >= limit as usize,
        };
        Self {
            items,
            total,
            offset,
            limit,
            has_more,
        }
    }

    /// Build a page from the `@pagination` block Travis returns.
    #[must_use]
    pub fn from_travis(items: Vec<T>, info: &PaginationInfo) -> Self {
        Self {
            items,
            total: Some(info.count),
            offset: info.offset,
            limit: info.limit,
            has_more: !info.is_last,
        }
    }

    /// Offset to request for the next page.
    #[must_use]
    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.items.len() as u32)
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The `@pagination` object attached to Travis collection responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub limit: u32,
    pub offset: u32,
    /// Total number of items in the collection.
    pub count: u64,
    #[serde(default)]
    pub is_first: bool,
    #[serde(default)]
    pub is_last: bool,
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl PaginationParams {
    /// Create pagination params for a specific window.
    #[must_use]
    pub fn window(offset: u32, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}
