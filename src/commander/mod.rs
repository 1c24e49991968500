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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component,
//! handling a text input component, and dispatching a corresponding
//! application event when typing is finished and a command is submitted.
//! Parse failures are reported back through the event loop as error toasts.

use std::sync::mpsc::Sender;

use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    actions::events::AppEvent,
    listing::SortOrder,
    model::{Audience, EntityKind},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown audience '{0}' (all, contestants, setters)")]
    UnknownAudience(String),

    #[error("Not a number: {0}")]
    InvalidNumber(String),

    #[error("Order must be asc or desc")]
    UnknownOrder,
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Consumes the event if the commander is active, or if it is the `:`
    /// activation key. Submitted command lines are parsed and dispatched to
    /// the event loop; parse failures become error events.
    pub(crate) fn handle_event(&mut self, event: &Event, event_sender: &Sender<AppEvent>) -> bool {
        if self.active {
            match event {
                Event::Key(key_event) => {
                    match key_event.code {
                        KeyCode::Esc => {
                            self.active = false;
                            self.input.reset();
                            true
                        }

                        KeyCode::Enter => {
                            let buffer = self.input.value().trim().to_string();
                            if !buffer.is_empty() {
                                let outcome = match parse_command(&buffer) {
                                    Ok(app_event) => app_event,
                                    Err(error) => AppEvent::Error(error.to_string()),
                                };
                                let _ = event_sender.send(outcome);
                                self.input.reset();
                            }
                            self.active = false;

                            true
                        }

                        _ => {
                            // Delegate all key events to the managed input component.
                            self.input.handle_event(event);
                            true
                        }
                    }
                }

                _ => false,
            }
        } else {
            match event {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Char(':') => {
                        self.active = true;
                        true
                    }

                    _ => false,
                },

                _ => false,
            }
        }
    }
}

fn parse_number(raw: &str) -> Result<u64, CommandError> {
    raw.parse::<u64>()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

/// Parses one submitted command line into the event it stands for.
fn parse_command(buffer: &str) -> Result<AppEvent, CommandError> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        ["q"] => AppEvent::ExitApplication,

        ["users"] => AppEvent::SetMainView(EntityKind::Users),
        ["problems"] => AppEvent::SetMainView(EntityKind::Problems),
        ["contests"] => AppEvent::SetMainView(EntityKind::Contests),
        ["purchases"] => AppEvent::SetMainView(EntityKind::Purchases),
        ["store"] => AppEvent::SetMainView(EntityKind::StoreItems),
        ["badges"] => AppEvent::SetMainView(EntityKind::Badges),
        ["notices"] => AppEvent::SetMainView(EntityKind::Notices),

        ["sort", key] => AppEvent::SortBy(key.to_string()),
        ["sort", ..] => return Err(CommandError::Usage("sort <key>")),

        ["order", raw] => match SortOrder::parse(raw) {
            Some(order) => AppEvent::SetSortOrder(order),
            None => return Err(CommandError::UnknownOrder),
        },
        ["order", ..] => return Err(CommandError::Usage("order asc|desc")),

        ["limit", raw] => AppEvent::SetLimit(parse_number(raw)?),
        ["limit", ..] => return Err(CommandError::Usage("limit <n>")),

        ["page", raw] => AppEvent::GoToPage(parse_number(raw)?),
        ["page", ..] => return Err(CommandError::Usage("page <n>")),

        // A missing value disengages the filter.
        ["filter", key] => AppEvent::SetFilter(key.to_string(), "-".to_string()),
        ["filter", key, value] => AppEvent::SetFilter(key.to_string(), value.to_string()),
        ["filter", ..] => return Err(CommandError::Usage("filter <key> [<value>]")),

        ["clear-filters"] => AppEvent::ClearFilters,
        ["reset-filters"] => AppEvent::ResetFilters,
        ["reset"] => AppEvent::ResetView,

        ["search", terms @ ..] => AppEvent::SetSearch(terms.join(" ")),

        ["notify", audience, message @ ..] => {
            if message.is_empty() {
                return Err(CommandError::Usage("notify <audience> <message>"));
            }
            match Audience::parse(audience) {
                Some(audience) => AppEvent::DispatchNotice {
                    audience,
                    message: message.join(" "),
                },
                None => return Err(CommandError::UnknownAudience((*audience).to_string())),
            }
        }
        ["notify"] => return Err(CommandError::Usage("notify <audience> <message>")),

        ["refresh"] => AppEvent::RefreshView,

        [cmd, ..] => return Err(CommandError::UnknownCommand((*cmd).to_string())),

        [] => return Err(CommandError::Usage("")),
    };

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn test_parse_views_and_simple_verbs() {
        assert!(matches!(parse_command("q"), Ok(AppEvent::ExitApplication)));
        assert!(matches!(
            parse_command("store"),
            Ok(AppEvent::SetMainView(EntityKind::StoreItems))
        ));
        assert!(matches!(parse_command("refresh"), Ok(AppEvent::RefreshView)));
        assert!(matches!(parse_command("clear-filters"), Ok(AppEvent::ClearFilters)));
    }

    #[test]
    fn test_parse_query_verbs() {
        assert!(matches!(
            parse_command("sort rating"),
            Ok(AppEvent::SortBy(key)) if key == "rating"
        ));
        assert!(matches!(
            parse_command("order desc"),
            Ok(AppEvent::SetSortOrder(SortOrder::Desc))
        ));
        assert!(matches!(parse_command("limit 50"), Ok(AppEvent::SetLimit(50))));
        assert!(matches!(parse_command("page 3"), Ok(AppEvent::GoToPage(3))));
        assert!(matches!(
            parse_command("filter status pending"),
            Ok(AppEvent::SetFilter(key, value)) if key == "status" && value == "pending"
        ));
        assert!(matches!(
            parse_command("filter status"),
            Ok(AppEvent::SetFilter(_, value)) if value == "-"
        ));
        assert!(matches!(
            parse_command("search binary search"),
            Ok(AppEvent::SetSearch(text)) if text == "binary search"
        ));
    }

    #[test]
    fn test_parse_notify() {
        assert!(matches!(
            parse_command("notify contestants Round starts soon"),
            Ok(AppEvent::DispatchNotice { audience: Audience::Contestants, message })
                if message == "Round starts soon"
        ));
        assert_eq!(
            parse_command("notify everyone hi").unwrap_err(),
            CommandError::UnknownAudience("everyone".to_string())
        );
        assert_eq!(
            parse_command("notify all").unwrap_err(),
            CommandError::Usage("notify <audience> <message>")
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command("frobnicate").unwrap_err(),
            CommandError::UnknownCommand("frobnicate".to_string())
        );
        assert_eq!(
            parse_command("limit lots").unwrap_err(),
            CommandError::InvalidNumber("lots".to_string())
        );
        assert_eq!(parse_command("order sideways").unwrap_err(), CommandError::UnknownOrder);
    }

    #[test]
    fn test_submitting_a_command_dispatches_an_event() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));

        assert!(commander.handle_event(&key(KeyCode::Char(':')), &tx));
        assert!(commander.active());

        for c in "refresh".chars() {
            assert!(commander.handle_event(&key(KeyCode::Char(c)), &tx));
        }
        assert!(commander.handle_event(&key(KeyCode::Enter), &tx));

        assert!(!commander.active());
        assert!(matches!(rx.try_recv(), Ok(AppEvent::RefreshView)));
    }

    #[test]
    fn test_bad_command_lines_become_error_events() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));

        commander.handle_event(&key(KeyCode::Char(':')), &tx);
        for c in "limit lots".chars() {
            commander.handle_event(&key(KeyCode::Char(c)), &tx);
        }
        commander.handle_event(&key(KeyCode::Enter), &tx);

        assert!(matches!(rx.try_recv(), Ok(AppEvent::Error(message)) if message.contains("lots")));
    }
}
