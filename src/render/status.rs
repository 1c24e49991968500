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

//! Render the status line: a transient toast when one is pending, otherwise
//! a summary of the key map for the active view.

use ratatui::{Frame, layout::Rect, style::Style, widgets::Paragraph};

use crate::{App, Toast, model::EntityKind};

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let (text, colour) = match &app.toast {
        Some(Toast::Info(message)) => (message.clone(), app.theme.ok_colour),
        Some(Toast::Error(message)) => (message.clone(), app.theme.error_colour),
        None => (key_hints(app.main_view).to_string(), app.theme.table_muted_fg),
    };

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(colour)),
        area,
    );
}

fn key_hints(view: EntityKind) -> &'static str {
    match view {
        EntityKind::Users => {
            "1-7 views · j/k move · C-f/C-b page · o order · / search · b ban · : command · q quit"
        }
        EntityKind::Purchases => {
            "1-7 views · j/k move · C-f/C-b page · o order · / search · a approve · x reject · q quit"
        }
        EntityKind::StoreItems => {
            "1-7 views · j/k move · C-f/C-b page · o order · / search · t toggle · : command · q quit"
        }
        _ => "1-7 views · j/k move · C-f/C-b page · o order · / search · : command · q quit",
    }
}
