//! Offset and limit pagination primitives.
//!
//! Callers describe a page with a one-based `page` number and a `limit`
//! (page size). [`PageRequest::window`] turns that pair into a
//! [`PageWindow`] over a collection of known length:
//!
//! - `start = (page - 1) * limit`, `end = start + limit`.
//! - When `start` is at or beyond the collection length the window is
//!   [`PageWindow::BeyondEnd`].
//! - Otherwise `end` is clamped to the collection length and the window is
//!   [`PageWindow::Slice`].
//!
//! Neither field is validated. A zero page or a negative limit yields a
//! window that is empty or partially clipped at zero; it never panics.
//!
//! # Examples
//! ```
//! use pagination::{PageRequest, PageWindow};
//!
//! let request = PageRequest::new(2, 10);
//! assert_eq!(request.window(15), PageWindow::Slice { start: 10, end: 15 });
//! assert_eq!(request.window(10), PageWindow::BeyondEnd);
//! ```

use serde::{Deserialize, Serialize};

/// Page selection supplied by a caller.
///
/// Missing fields deserialise to zero, mirroring protobuf scalar defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// One-based page number.
    pub page: i32,
    /// Maximum number of items on the page.
    pub limit: i32,
}

impl PageRequest {
    /// Build a page request from raw caller values.
    #[must_use]
    pub const fn new(page: i32, limit: i32) -> Self {
        Self { page, limit }
    }

    /// Unclamped zero-based offset of the first item on this page.
    ///
    /// Arithmetic is widened to `i64` so extreme inputs cannot overflow.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.limit))
    }

    /// Resolve the slice of a collection holding `total` items.
    #[must_use]
    pub fn window(&self, total: usize) -> PageWindow {
        let total_items = i64::try_from(total).unwrap_or(i64::MAX);
        let start = self.offset();
        if start >= total_items {
            return PageWindow::BeyondEnd;
        }

        let end = start.saturating_add(i64::from(self.limit));
        let first = start.max(0);
        let last = end.clamp(first, total_items);
        PageWindow::Slice {
            start: to_index(first),
            end: to_index(last),
        }
    }
}

fn to_index(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// Window resolved by [`PageRequest::window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageWindow {
    /// The page starts at or after the end of the collection.
    BeyondEnd,
    /// Half-open range `[start, end)` of items on the page.
    Slice {
        /// Index of the first item on the page.
        start: usize,
        /// Index one past the last item on the page.
        end: usize,
    },
}

impl PageWindow {
    /// Keep only the items inside this window.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::new(1, 2).window(3).select(vec!['a', 'b', 'c']);
    /// assert_eq!(page, vec!['a', 'b']);
    /// ```
    #[must_use]
    pub fn select<T>(self, items: Vec<T>) -> Vec<T> {
        match self {
            Self::BeyondEnd => Vec::new(),
            Self::Slice { start, end } => items
                .into_iter()
                .skip(start)
                .take(end.saturating_sub(start))
                .collect(),
        }
    }

    /// Whether the requested page lies past the end of the collection.
    #[must_use]
    pub const fn is_beyond_end(&self) -> bool {
        matches!(self, Self::BeyondEnd)
    }
}
