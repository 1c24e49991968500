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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! processed event to provide a reactive user interface.

mod commander;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    widgets::Tabs,
};

use crate::{
    App,
    model::EntityKind,
    render::{commander::draw_commander, status::draw_status},
    theme::Theme,
};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// This function calculates the layout constraints and populates the frame
/// with widgets based on the current state of the [`App`].
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - A mutable reference to the application state, allowing the UI
///   to reflect changes and update internal view state (like table cursor
///   positions).
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: view tabs, main table, status line, command line
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_tabs(f, outer[0], app);

    let theme = app.theme;
    match app.main_view {
        EntityKind::Users => app.users.draw(f, outer[1], &theme),
        EntityKind::Problems => app.problems.draw(f, outer[1], &theme),
        EntityKind::Contests => app.contests.draw(f, outer[1], &theme),
        EntityKind::Purchases => app.purchases.draw(f, outer[1], &theme),
        EntityKind::StoreItems => app.store_items.draw(f, outer[1], &theme),
        EntityKind::Badges => app.badges.draw(f, outer[1], &theme),
        EntityKind::Notices => app.notices.draw(f, outer[1], &theme),
    };

    draw_status(f, outer[2], app);

    draw_commander(f, outer[3], app);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles = EntityKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| format!("{} {}", i + 1, kind.title()));
    let selected = EntityKind::ALL
        .iter()
        .position(|kind| *kind == app.main_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(app.theme.border_colour))
        .highlight_style(Style::default().bold().fg(app.theme.accent_colour))
        .divider("│");

    f.render_widget(tabs, area);
}
