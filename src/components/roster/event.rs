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

//! Input handling and event processing for the roster.
//!
//! This module maps raw terminal keyboard events to cursor movement, page
//! navigation, sort toggling, and the search box. Actions that change the
//! query are reported back so the owner can issue a re-fetch.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyModifiers};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::components::{Roster, RosterAction, RosterRow};
use crate::listing::Pagination;

impl<R: RosterRow> Roster<R> {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<RosterAction> {
        if self.search_active {
            return self.process_search_event(event);
        }

        match event {
            Event::Key(key_event) => match (key_event.code, key_event.modifiers) {
                (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
                    self.goto_next();
                    None
                }
                (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
                    self.goto_previous();
                    None
                }
                (KeyCode::Char('g'), _) => {
                    self.goto_first();
                    None
                }
                (KeyCode::Char('G'), _) => {
                    self.goto_last();
                    None
                }

                (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
                    self.change_page(Pagination::next_page)
                }
                (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
                    self.change_page(Pagination::previous_page)
                }

                (KeyCode::Char('o'), _) => {
                    self.query.toggle_sort_order();
                    Some(RosterAction::QueryChanged)
                }

                (KeyCode::Char('/'), _) => {
                    self.search_active = true;
                    None
                }

                _ => None,
            },

            _ => None,
        }
    }

    /// Search-box mode: Esc abandons the edit, Enter commits immediately,
    /// anything else edits the text and (re)arms the debounce.
    fn process_search_event(&mut self, event: &Event) -> Option<RosterAction> {
        if let Event::Key(key_event) = event {
            match key_event.code {
                KeyCode::Esc => {
                    self.query.cancel_pending_search();
                    self.search_input = Input::new(self.query.search().to_string());
                    self.search_active = false;
                    return None;
                }
                KeyCode::Enter => {
                    self.search_active = false;
                    let value = self.search_input.value().to_string();
                    return self
                        .query
                        .commit_search(&value)
                        .then_some(RosterAction::QueryChanged);
                }
                _ => {}
            }
        }

        self.search_input.handle_event(event);
        self.query
            .set_search_input(self.search_input.value(), Instant::now());
        None
    }
}
