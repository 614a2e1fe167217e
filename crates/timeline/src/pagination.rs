//! Load-more pagination over the window-filtered task list.

use crate::error::{TimelineError, TimelineResult};
use serde::Serialize;

/// Number of tasks shown before the first "load more".
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of tasks each "load more" adds.
pub const DEFAULT_PAGE_INCREMENT: usize = 10;

/// The currently visible prefix of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Whether more items exist beyond `items`.
    pub has_more: bool,
    /// Number of items shown (`items.len()`).
    pub shown: usize,
    /// Number of items in the full list.
    pub total: usize,
}

/// Cursor over a list that only ever grows within one query.
///
/// The cursor is reset to the initial page size when the query changes
/// (a new window or granularity); items are never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    initial: usize,
    increment: usize,
    visible_count: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            initial: DEFAULT_PAGE_SIZE,
            increment: DEFAULT_PAGE_INCREMENT,
            visible_count: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paginator {
    /// Create a paginator with custom page sizes.
    ///
    /// # Errors
    ///
    /// Returns `TimelineError::ZeroValue` if either size is zero.
    pub fn new(initial: usize, increment: usize) -> TimelineResult<Self> {
        if initial == 0 {
            return Err(TimelineError::ZeroValue {
                field: "initial_page_size",
            });
        }
        if increment == 0 {
            return Err(TimelineError::ZeroValue {
                field: "page_increment",
            });
        }
        Ok(Self {
            initial,
            increment,
            visible_count: initial,
        })
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Show `increment` more items.
    pub fn load_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(self.increment);
    }

    /// Show the first `pages` pages at once, as if `load_more` had been
    /// called `pages - 1` times. Zero is treated as one page.
    pub fn show_pages(&mut self, pages: usize) {
        let extra = self.increment.saturating_mul(pages.saturating_sub(1));
        self.visible_count = self.initial.saturating_add(extra);
    }

    /// Go back to the first page.
    pub fn reset(&mut self) {
        self.visible_count = self.initial;
    }

    /// Slice the visible prefix of `items`.
    pub fn page<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        let shown = items.len().min(self.visible_count);
        Page {
            items: &items[..shown],
            has_more: items.len() > self.visible_count,
            shown,
            total: items.len(),
        }
    }
}
