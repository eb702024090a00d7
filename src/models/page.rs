//! Page model
//!
//! `Page<T>` is one slice of an ordered result set together with the metadata
//! a client needs to walk the remaining pages.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Paginated result container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in the current page (at most `size`)
    pub content: Vec<T>,
    /// Zero-based page index
    pub page: u32,
    /// Requested page size
    pub size: u32,
    /// Number of matching items across all pages
    pub total_elements: i64,
    /// `ceil(total_elements / size)`, 0 when nothing matched
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: u32, size: NonZeroU32, total_elements: i64) -> Self {
        let total_elements = total_elements.max(0);
        let size_i64 = i64::from(size.get());
        let total_pages = (total_elements + size_i64 - 1) / size_i64;

        Self {
            content,
            page,
            size: size.get(),
            total_elements,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Convert every item while keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
