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

//! The roster: one reusable table view over any administrative collection.
//!
//! Every collection screen is the same component instantiated with a
//! different row type. The row type supplies the static parts (columns,
//! default sort and filters, how a record renders); the roster owns the
//! dynamic parts: the list query, the fetched page, the cursor, and the
//! search box.
//!
//! The roster never performs I/O. It emits fetch commands built from query
//! snapshots and applies the pages that come back, dropping any response
//! whose generation is no longer current.

mod event;
mod render;

use std::time::Instant;

use ratatui::layout::Constraint;
use ratatui::widgets::{Row, TableState};
use tui_input::Input;

use crate::actions::AppCommand;
use crate::config::AppConfig;
use crate::listing::{FilterSet, ListQuery, Page, Pagination, SortOrder};
use crate::model::EntityKind;
use crate::theme::Theme;

/// Static description of one table column.
pub(crate) struct Column {
    pub(crate) title: &'static str,
    pub(crate) width: Constraint,
    /// Sort key selected when this column is targeted, if sortable.
    pub(crate) sort_key: Option<&'static str>,
    pub(crate) numeric: bool,
}

/// A record type that can populate a roster.
pub(crate) trait RosterRow: Sized + Send + 'static {
    const KIND: EntityKind;

    fn columns() -> &'static [Column];
    fn default_sort() -> (&'static str, SortOrder);
    fn default_filters() -> FilterSet;
    fn id(&self) -> i64;
    fn row(&self, theme: &Theme) -> Row<'static>;
}

/// Signal back to the event loop that the query changed and a re-fetch is
/// due.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RosterAction {
    QueryChanged,
}

pub(crate) struct Roster<R: RosterRow> {
    pub(crate) query: ListQuery,
    rows: Vec<R>,
    table_state: TableState,
    search_input: Input,
    search_active: bool,
    loaded: bool,
}

impl<R: RosterRow> Roster<R> {
    pub(crate) fn new(config: &AppConfig) -> Self {
        let (sort_by, sort_order) = R::default_sort();
        Self {
            query: ListQuery::new(
                sort_by,
                sort_order,
                config.page_size,
                R::default_filters(),
                std::time::Duration::from_millis(config.search_debounce_ms),
            ),
            rows: vec![],
            table_state: TableState::new(),
            search_input: Input::default(),
            search_active: false,
            loaded: false,
        }
    }

    pub(crate) fn loaded(&self) -> bool {
        self.loaded
    }

    pub(crate) fn search_active(&self) -> bool {
        self.search_active
    }

    pub(crate) fn selected(&self) -> Option<&R> {
        self.rows.get(self.table_state.selected()?)
    }

    /// Snapshots the current query into a fetch command for the worker.
    pub(crate) fn fetch_command(&mut self) -> AppCommand {
        let (request, generation) = self.query.snapshot();
        self.loaded = true;
        AppCommand::FetchPage {
            kind: R::KIND,
            request,
            generation,
        }
    }

    /// Installs a fetched page. Responses from superseded fetches are
    /// dropped; the cursor is clamped into the new page.
    pub(crate) fn apply_page(&mut self, page: Page<R>, generation: u64) -> bool {
        if !self.query.is_current(generation) {
            log::debug!("dropping stale {} page", R::KIND.title());
            return false;
        }

        self.query.pagination.set_total_count(page.total_count);
        self.rows = page.rows;

        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            let row = self
                .table_state
                .selected()
                .unwrap_or(0)
                .min(self.rows.len() - 1);
            self.table_state.select(Some(row));
        }
        true
    }

    pub(crate) fn poll_search(&mut self, now: Instant) -> bool {
        self.query.poll_search(now)
    }

    fn goto_next(&mut self) {
        let len = self.rows.len();
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.rows.len();
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self) {
        self.table_state.select_first();
    }

    fn goto_last(&mut self) {
        if !self.rows.is_empty() {
            self.table_state.select(Some(self.rows.len() - 1));
        }
    }

    fn change_page(&mut self, advance: fn(&mut Pagination)) -> Option<RosterAction> {
        let before = self.query.pagination.page();
        advance(&mut self.query.pagination);
        (self.query.pagination.page() != before).then_some(RosterAction::QueryChanged)
    }
}
