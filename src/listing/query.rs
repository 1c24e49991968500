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

//! The list-query facade: pagination, sorting, and filters behind one type.
//!
//! The facade owns the coupling between the three primitives that each view
//! would otherwise have to remember on its own: any filter, sort, or search
//! change returns pagination to page 1. It also owns two pieces of fetch
//! plumbing:
//!
//! * free-text search is debounced, so a request is not issued per keystroke;
//!   the pending text is committed when [`ListQuery::poll_search`] observes
//!   its deadline has passed (the tick event drives polling);
//! * every snapshot taken for a fetch carries a monotonically increasing
//!   generation, and [`ListQuery::is_current`] lets the owning view drop a
//!   stale response that arrives after a newer request was issued.

use std::time::{Duration, Instant};

use crate::listing::{FilterSet, FilterValue, Pagination, SortOrder, Sorting};

/// One page of fetched rows plus the authoritative total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Page<T> {
    pub(crate) rows: Vec<T>,
    pub(crate) total_count: u64,
}

/// The parameter snapshot handed to the data source for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListRequest {
    pub(crate) page: u64,
    pub(crate) limit: u64,
    pub(crate) sort_by: String,
    pub(crate) sort_order: SortOrder,
    pub(crate) search: String,
    pub(crate) filters: Vec<(String, FilterValue)>,
}

impl ListRequest {
    pub(crate) fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

pub(crate) struct ListQuery {
    pub(crate) pagination: Pagination,
    sorting: Sorting<String>,
    filters: FilterSet,

    search: String,
    pending_search: Option<(String, Instant)>,
    debounce: Duration,

    generation: u64,
}

impl ListQuery {
    pub(crate) fn new(
        sort_by: &str,
        sort_order: SortOrder,
        limit: u64,
        filters: FilterSet,
        debounce: Duration,
    ) -> Self {
        Self {
            pagination: Pagination::new(1, limit, 0),
            sorting: Sorting::new(sort_by.to_string(), sort_order),
            filters,
            search: String::new(),
            pending_search: None,
            debounce,
            generation: 0,
        }
    }

    pub(crate) fn sort_by(&self) -> &str {
        self.sorting.sort_by()
    }

    pub(crate) fn sort_order(&self) -> SortOrder {
        self.sorting.sort_order()
    }

    pub(crate) fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub(crate) fn search(&self) -> &str {
        &self.search
    }

    /// Header-click sort selection: toggle on reselect, ascending on a new
    /// column. Returns to page 1 either way.
    pub(crate) fn handle_sort(&mut self, key: impl Into<String>) {
        self.sorting.handle_sort(key.into());
        self.pagination.first_page();
    }

    /// Flips the direction of the active sort column.
    pub(crate) fn toggle_sort_order(&mut self) {
        let key = self.sorting.sort_by().clone();
        self.handle_sort(key);
    }

    /// Direct sort-key selection (the `sort` command), bypassing the
    /// header-click toggle. Returns to page 1.
    pub(crate) fn set_sort_by(&mut self, key: impl Into<String>) {
        self.sorting.set_sort_by(key.into());
        self.pagination.first_page();
    }

    pub(crate) fn set_sort_order(&mut self, order: SortOrder) {
        self.sorting.set_sort_order(order);
        self.pagination.first_page();
    }

    /// Parses and applies one filter from raw command text. Returns `false`
    /// for unknown keys or unparseable values; on success, pagination returns
    /// to page 1.
    pub(crate) fn set_filter_parsed(&mut self, key: &str, raw: &str) -> bool {
        if self.filters.set_parsed(key, raw) {
            self.pagination.first_page();
            true
        } else {
            false
        }
    }

    pub(crate) fn set_filter(&mut self, key: &str, value: FilterValue) -> bool {
        if self.filters.set(key, value) {
            self.pagination.first_page();
            true
        } else {
            false
        }
    }

    pub(crate) fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.pagination.first_page();
    }

    pub(crate) fn reset_filters(&mut self) {
        self.filters.reset();
        self.pagination.first_page();
    }

    pub(crate) fn set_limit(&mut self, limit: u64) {
        // Pagination itself owns the return to page 1 here.
        self.pagination.set_limit(limit);
    }

    /// Records in-progress search text. The value only influences fetches
    /// once the debounce window elapses without further edits; retyping the
    /// committed text cancels the pending edit.
    pub(crate) fn set_search_input(&mut self, text: &str, now: Instant) {
        if text == self.search {
            self.pending_search = None;
        } else {
            self.pending_search = Some((text.to_string(), now + self.debounce));
        }
    }

    /// Commits pending search text whose debounce deadline has passed.
    /// Returns whether a commit happened (and a re-fetch is therefore due).
    pub(crate) fn poll_search(&mut self, now: Instant) -> bool {
        match &self.pending_search {
            Some((text, due)) if now >= *due => {
                self.search = text.clone();
                self.pending_search = None;
                self.pagination.first_page();
                true
            }
            _ => false,
        }
    }

    /// Commits search text immediately, bypassing the debounce (Enter in the
    /// search box, or an explicit `search` command). Returns whether the
    /// committed text actually changed.
    pub(crate) fn commit_search(&mut self, text: &str) -> bool {
        self.pending_search = None;
        if text != self.search {
            self.search = text.to_string();
            self.pagination.first_page();
            true
        } else {
            false
        }
    }

    /// Abandons any pending, uncommitted search edit.
    pub(crate) fn cancel_pending_search(&mut self) {
        self.pending_search = None;
    }

    /// Returns the whole query to its construction state: default sort,
    /// default filters, page 1 at the initial page size, no search.
    pub(crate) fn reset(&mut self) {
        self.sorting.reset();
        self.filters.reset();
        self.search.clear();
        self.pending_search = None;
        self.pagination.reset();
    }

    /// Takes the parameter snapshot for a fetch and stamps it with a fresh
    /// generation. Responses must echo the generation back so stale ones can
    /// be rejected with [`ListQuery::is_current`].
    pub(crate) fn snapshot(&mut self) -> (ListRequest, u64) {
        self.generation += 1;
        let request = ListRequest {
            page: self.pagination.page(),
            limit: self.pagination.limit(),
            sort_by: self.sorting.sort_by().clone(),
            sort_order: self.sorting.sort_order(),
            search: self.search.clone(),
            filters: self
                .filters
                .engaged()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        };
        (request, self.generation)
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ListQuery {
        ListQuery::new(
            "created",
            SortOrder::Desc,
            10,
            FilterSet::new([
                ("status", FilterValue::Text(String::new())),
                ("banned", FilterValue::Flag(None)),
            ]),
            Duration::from_millis(450),
        )
    }

    fn on_page_3(mut query: ListQuery) -> ListQuery {
        query.pagination.set_total_count(100);
        query.pagination.set_page(3);
        assert_eq!(query.pagination.page(), 3);
        query
    }

    #[test]
    fn test_filter_changes_return_to_page_one() {
        let mut query = on_page_3(sample());
        assert!(query.set_filter_parsed("status", "pending"));
        assert_eq!(query.pagination.page(), 1);

        let mut query = on_page_3(sample());
        query.clear_filters();
        assert_eq!(query.pagination.page(), 1);

        let mut query = on_page_3(sample());
        query.reset_filters();
        assert_eq!(query.pagination.page(), 1);
    }

    #[test]
    fn test_unknown_filter_does_not_touch_pagination() {
        let mut query = on_page_3(sample());
        assert!(!query.set_filter_parsed("no_such_filter", "x"));
        assert_eq!(query.pagination.page(), 3);
    }

    #[test]
    fn test_sort_changes_return_to_page_one() {
        let mut query = on_page_3(sample());
        query.handle_sort("rating");
        assert_eq!(query.sort_by(), "rating");
        assert_eq!(query.sort_order(), SortOrder::Asc);
        assert_eq!(query.pagination.page(), 1);

        let mut query = on_page_3(sample());
        query.toggle_sort_order();
        assert_eq!(query.sort_by(), "created");
        assert_eq!(query.sort_order(), SortOrder::Asc);
        assert_eq!(query.pagination.page(), 1);
    }

    #[test]
    fn test_search_commits_only_after_the_debounce_window() {
        let mut query = on_page_3(sample());
        let t0 = Instant::now();

        query.set_search_input("al", t0);
        assert!(!query.poll_search(t0 + Duration::from_millis(200)));
        assert_eq!(query.search(), "");
        assert_eq!(query.pagination.page(), 3, "uncommitted search must not reset the page");

        assert!(query.poll_search(t0 + Duration::from_millis(500)));
        assert_eq!(query.search(), "al");
        assert_eq!(query.pagination.page(), 1);

        // Nothing pending any more.
        assert!(!query.poll_search(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_retyping_pushes_the_deadline_back() {
        let mut query = sample();
        let t0 = Instant::now();

        query.set_search_input("a", t0);
        query.set_search_input("al", t0 + Duration::from_millis(400));
        assert!(!query.poll_search(t0 + Duration::from_millis(600)));
        assert!(query.poll_search(t0 + Duration::from_millis(850)));
        assert_eq!(query.search(), "al");
    }

    #[test]
    fn test_retyping_the_committed_text_cancels_the_pending_edit() {
        let mut query = sample();
        let t0 = Instant::now();
        query.commit_search("alice");

        query.set_search_input("alicex", t0);
        query.set_search_input("alice", t0 + Duration::from_millis(100));
        assert!(!query.poll_search(t0 + Duration::from_secs(5)));
        assert_eq!(query.search(), "alice");
    }

    #[test]
    fn test_stale_generations_are_rejected() {
        let mut query = sample();

        let (_, first) = query.snapshot();
        let (_, second) = query.snapshot();

        assert!(!query.is_current(first));
        assert!(query.is_current(second));

        // A later snapshot invalidates everything before it.
        let (_, third) = query.snapshot();
        assert!(!query.is_current(second));
        assert!(query.is_current(third));
    }

    #[test]
    fn test_snapshot_carries_only_engaged_filters() {
        let mut query = sample();
        query.set_filter("status", FilterValue::text("pending"));

        let (request, _) = query.snapshot();
        assert_eq!(
            request.filters,
            vec![("status".to_string(), FilterValue::text("pending"))]
        );
        assert_eq!(request.sort_by, "created");
        assert_eq!(request.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_request_offset() {
        let mut query = sample();
        query.pagination.set_total_count(100);
        query.pagination.set_page(4);

        let (request, _) = query.snapshot();
        assert_eq!(request.page, 4);
        assert_eq!(request.limit, 10);
        assert_eq!(request.offset(), 30);
    }

    #[test]
    fn test_reset_restores_the_construction_state() {
        let mut query = on_page_3(sample());
        query.handle_sort("rating");
        query.set_filter("status", FilterValue::text("pending"));
        query.commit_search("alice");
        query.set_limit(50);

        query.reset();
        assert_eq!(query.sort_by(), "created");
        assert_eq!(query.sort_order(), SortOrder::Desc);
        assert_eq!(query.search(), "");
        assert_eq!(query.filters().engaged().count(), 0);
        assert_eq!(query.pagination.page(), 1);
        assert_eq!(query.pagination.limit(), 10);
    }

    #[test]
    fn test_set_sort_by_does_not_toggle() {
        let mut query = on_page_3(sample());

        query.set_sort_by("rating");
        assert_eq!(query.sort_by(), "rating");
        assert_eq!(query.sort_order(), SortOrder::Desc, "direction is kept");
        assert_eq!(query.pagination.page(), 1);

        query.set_sort_by("rating");
        assert_eq!(query.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_set_limit_returns_to_page_one_via_pagination() {
        let mut query = on_page_3(sample());
        query.set_limit(25);
        assert_eq!(query.pagination.page(), 1);
        assert_eq!(query.pagination.limit(), 25);
    }
}
