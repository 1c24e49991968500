// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Page and page-size state for a remote collection.
//!
//! The total count is supplied externally (from each page response) and is
//! the authoritative source of truth for bounds. All derived values are
//! recomputed on demand so they can never go stale. Out-of-range input is
//! clamped rather than rejected; callers never need to pre-validate.

/// Current page, page size, and externally supplied total count.
///
/// Invariant: `1 <= page <= total_pages()` after every mutation, including
/// total-count refreshes. An empty collection is represented as a valid,
/// empty page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pagination {
    page: u64,
    limit: u64,
    total_count: u64,

    initial_page: u64,
    initial_limit: u64,
}

impl Pagination {
    pub(crate) fn new(initial_page: u64, initial_limit: u64, total_count: u64) -> Self {
        let initial_page = initial_page.max(1);
        let initial_limit = initial_limit.max(1);

        let mut pagination = Self {
            page: 1,
            limit: initial_limit,
            total_count,
            initial_page,
            initial_limit,
        };
        pagination.set_page(initial_page);
        pagination
    }

    pub(crate) fn page(&self) -> u64 {
        self.page
    }

    pub(crate) fn limit(&self) -> u64 {
        self.limit
    }

    pub(crate) fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Total number of pages, never less than one: an empty collection still
    /// has a single (empty) page so page 1 is always in range.
    pub(crate) fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.limit).max(1)
    }

    pub(crate) fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub(crate) fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Zero-based index of the first item on the current page.
    pub(crate) fn start_index(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Zero-based index of the last item on the current page, or `None` when
    /// the collection is empty.
    pub(crate) fn end_index(&self) -> Option<u64> {
        if self.total_count == 0 {
            return None;
        }
        Some((self.start_index() + self.limit - 1).min(self.total_count - 1))
    }

    /// Moves to the given page, clamped into `[1, total_pages()]`.
    pub(crate) fn set_page(&mut self, page: u64) {
        self.page = page.clamp(1, self.total_pages());
    }

    /// Changes the page size and returns to page 1, since the old page no
    /// longer means anything under the new size. A size of zero is
    /// normalized to one.
    pub(crate) fn set_limit(&mut self, limit: u64) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    /// Refreshes the total count from a page response, re-clamping the
    /// current page if the collection shrank underneath it.
    pub(crate) fn set_total_count(&mut self, total_count: u64) {
        self.total_count = total_count;
        self.set_page(self.page);
    }

    pub(crate) fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub(crate) fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub(crate) fn first_page(&mut self) {
        self.set_page(1);
    }

    pub(crate) fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    /// Restores the page and limit supplied at construction. The total count
    /// is kept; it belongs to the collection, not to this view of it.
    pub(crate) fn reset(&mut self) {
        self.limit = self.initial_limit;
        self.set_page(self.initial_page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let pagination = Pagination::new(1, 10, 45);
        assert_eq!(pagination.total_pages(), 5);

        let pagination = Pagination::new(1, 10, 50);
        assert_eq!(pagination.total_pages(), 5);

        let pagination = Pagination::new(1, 10, 51);
        assert_eq!(pagination.total_pages(), 6);
    }

    #[test]
    fn test_empty_collection_is_a_valid_single_page() {
        let pagination = Pagination::new(1, 10, 0);
        assert_eq!(pagination.total_pages(), 1);
        assert_eq!(pagination.page(), 1);
        assert!(!pagination.has_next_page());
        assert!(!pagination.has_previous_page());
        assert_eq!(pagination.end_index(), None);
    }

    #[test]
    fn test_set_page_clamps_to_bounds() {
        let mut pagination = Pagination::new(1, 10, 45);

        pagination.set_page(0);
        assert_eq!(pagination.page(), 1);

        pagination.set_page(99);
        assert_eq!(pagination.page(), 5);

        pagination.set_page(3);
        assert_eq!(pagination.page(), 3);
    }

    #[test]
    fn test_set_limit_resets_to_first_page() {
        let mut pagination = Pagination::new(1, 10, 45);
        pagination.set_page(4);

        pagination.set_limit(25);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 25);
        assert_eq!(pagination.total_pages(), 2);
    }

    #[test]
    fn test_set_limit_normalizes_zero() {
        let mut pagination = Pagination::new(1, 10, 45);
        pagination.set_limit(0);
        assert_eq!(pagination.limit(), 1);
    }

    #[test]
    fn test_next_page_on_last_page_is_a_noop() {
        let mut pagination = Pagination::new(1, 10, 45);
        pagination.last_page();
        assert_eq!(pagination.page(), 5);

        pagination.next_page();
        assert_eq!(pagination.page(), 5);
    }

    #[test]
    fn test_previous_page_on_first_page_is_a_noop() {
        let mut pagination = Pagination::new(1, 10, 45);
        pagination.previous_page();
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_last_page_bounds_scenario() {
        // 45 items at 10 per page: last page holds items 40..=44.
        let mut pagination = Pagination::new(1, 10, 45);
        pagination.last_page();

        assert_eq!(pagination.page(), 5);
        assert!(!pagination.has_next_page());
        assert!(pagination.has_previous_page());
        assert_eq!(pagination.start_index(), 40);
        assert_eq!(pagination.end_index(), Some(44));
    }

    #[test]
    fn test_full_middle_page_bounds() {
        let mut pagination = Pagination::new(1, 10, 45);
        pagination.set_page(2);

        assert_eq!(pagination.start_index(), 10);
        assert_eq!(pagination.end_index(), Some(19));
        assert!(pagination.has_next_page());
    }

    #[test]
    fn test_total_count_refresh_reclamps_page() {
        let mut pagination = Pagination::new(1, 10, 100);
        pagination.set_page(10);

        // The collection shrank between fetches.
        pagination.set_total_count(31);
        assert_eq!(pagination.total_pages(), 4);
        assert_eq!(pagination.page(), 4);

        pagination.set_total_count(0);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_reset_restores_construction_values() {
        let mut pagination = Pagination::new(2, 20, 100);
        pagination.set_limit(50);
        pagination.set_page(2);

        pagination.reset();
        assert_eq!(pagination.page(), 2);
        assert_eq!(pagination.limit(), 20);
        assert_eq!(pagination.total_count(), 100);
    }
}
