//! Pagination cursor arithmetic for windowed library listings.
//!
//! Kodi listing methods accept a half-open `limits` window `[start, end)`
//! and report the overall item count back as `limits.total`. The helpers
//! here are pure so the same arithmetic drives both the server-side page
//! fetches and the browser-side "load more" accumulation.

use serde::{Deserialize, Serialize};

/// Items requested per page unless a caller says otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Half-open request window `[start, end)`, Kodi's `limits` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

impl PageWindow {
    /// The window of `page_size` items beginning at `cursor`.
    pub fn at(cursor: u32, page_size: u32) -> Self {
        Self {
            start: cursor,
            end: cursor.saturating_add(page_size),
        }
    }
}

/// Cursor of the page after `cursor`, if the server-reported total extends
/// past the current window.
pub fn next_cursor(total: u32, cursor: u32, page_size: u32) -> Option<u32> {
    let window_end = cursor.saturating_add(page_size);
    (total > window_end).then_some(window_end)
}

/// Pages of a listing, retained in cursor order.
///
/// Ordering invariant: items of the page fetched at cursor N precede the
/// items fetched at any later cursor, regardless of response arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedAccumulator<T> {
    /// `(cursor, items)` pairs kept sorted by cursor.
    pages: Vec<(u32, Vec<T>)>,
    /// Server-reported total, known after the first page lands.
    total: Option<u32>,
    page_size: u32,
}

impl<T: Clone> PagedAccumulator<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            pages: Vec::new(),
            total: None,
            page_size,
        }
    }

    /// Cursor of the next page to request; `None` once the listing is
    /// complete. Before anything has been fetched this is cursor zero.
    pub fn next_cursor(&self) -> Option<u32> {
        let Some(total) = self.total else {
            return Some(0);
        };
        let fetched_through = self
            .pages
            .last()
            .map(|(cursor, _)| cursor.saturating_add(self.page_size))
            .unwrap_or(0);
        (total > fetched_through).then_some(fetched_through)
    }

    /// Ingest one fetched page. Out-of-order arrivals slot in by cursor;
    /// refetching a cursor replaces that page.
    pub fn ingest(&mut self, cursor: u32, items: Vec<T>, total: u32) {
        self.total = Some(total);
        match self.pages.binary_search_by_key(&cursor, |(c, _)| *c) {
            Ok(i) => self.pages[i] = (cursor, items),
            Err(i) => self.pages.insert(i, (cursor, items)),
        }
    }

    /// All items, page order preserved.
    pub fn items(&self) -> Vec<T> {
        self.pages
            .iter()
            .flat_map(|(_, items)| items.iter().cloned())
            .collect()
    }

    /// Server-reported total, if any page has landed yet.
    pub fn total(&self) -> Option<u32> {
        self.total
    }

    /// Number of items loaded so far.
    pub fn loaded(&self) -> usize {
        self.pages.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded() == 0
    }

    /// Sort or filter changed: drop everything and restart at cursor zero.
    pub fn reset(&mut self) {
        self.pages.clear();
        self.total = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_half_open() {
        assert_eq!(PageWindow::at(0, 100), PageWindow { start: 0, end: 100 });
        assert_eq!(
            PageWindow::at(200, 100),
            PageWindow {
                start: 200,
                end: 300
            }
        );
    }

    #[test]
    fn cursor_sequence_for_250_items() {
        // 250 > 100 and 250 > 200, but 250 <= 300: three pages, then done.
        assert_eq!(next_cursor(250, 0, 100), Some(100));
        assert_eq!(next_cursor(250, 100, 100), Some(200));
        assert_eq!(next_cursor(250, 200, 100), None);
    }

    #[test]
    fn exact_multiple_terminates_without_empty_page() {
        assert_eq!(next_cursor(200, 100, 100), None);
    }

    #[test]
    fn empty_listing_has_no_next_page() {
        assert_eq!(next_cursor(0, 0, 100), None);
    }

    #[test]
    fn accumulator_walks_the_cursor_sequence() {
        let mut acc = PagedAccumulator::new(100);
        assert_eq!(acc.next_cursor(), Some(0));

        acc.ingest(0, (0..100).collect(), 250);
        assert_eq!(acc.next_cursor(), Some(100));

        acc.ingest(100, (100..200).collect(), 250);
        assert_eq!(acc.next_cursor(), Some(200));

        acc.ingest(200, (200..250).collect(), 250);
        assert_eq!(acc.next_cursor(), None);
        assert_eq!(acc.loaded(), 250);
        assert_eq!(acc.total(), Some(250));
    }

    #[test]
    fn items_keep_page_order_under_out_of_order_arrival() {
        let mut acc = PagedAccumulator::new(2);
        // Second page lands before the first.
        acc.ingest(2, vec!["c", "d"], 5);
        acc.ingest(0, vec!["a", "b"], 5);
        acc.ingest(4, vec!["e"], 5);
        assert_eq!(acc.items(), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn refetched_page_replaces_not_duplicates() {
        let mut acc = PagedAccumulator::new(2);
        acc.ingest(0, vec![1, 2], 2);
        acc.ingest(0, vec![3, 4], 2);
        assert_eq!(acc.items(), vec![3, 4]);
    }

    #[test]
    fn reset_restarts_from_cursor_zero() {
        let mut acc = PagedAccumulator::new(100);
        acc.ingest(0, vec![1], 1);
        assert_eq!(acc.next_cursor(), None);

        acc.reset();
        assert_eq!(acc.next_cursor(), Some(0));
        assert!(acc.is_empty());
        assert_eq!(acc.total(), None);
    }
}
