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

//! UI rendering logic for the roster.
//!
//! Draws the search line, the themed table with a sort indicator in its
//! header, and the summary footer (page window, totals, active sort and
//! filters).

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table},
};

use crate::{
    components::{Roster, RosterRow},
    listing::SortOrder,
    render::Render,
    theme::Theme,
};

impl<R: RosterRow> Render for Roster<R> {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let [search_area, table_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        self.draw_search(f, search_area, theme);
        self.draw_table(f, table_area, theme);
        self.draw_footer(f, footer_area, theme);
    }
}

impl<R: RosterRow> Roster<R> {
    fn draw_search(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let style = if self.search_active {
            Style::default().fg(theme.accent_colour)
        } else {
            Style::default().fg(theme.table_muted_fg)
        };

        let line = Line::from(vec![
            Span::styled("/", style),
            Span::styled(self.search_input.value().to_string(), style),
        ]);
        f.render_widget(Paragraph::new(line), area);

        if self.search_active {
            f.set_cursor_position((
                area.x + 1 + self.search_input.visual_cursor() as u16,
                area.y,
            ));
        }
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let sort_by = self.query.sort_by().to_string();
        let indicator = match self.query.sort_order() {
            SortOrder::Asc => " ▲",
            SortOrder::Desc => " ▼",
        };

        let header_cells = R::columns().iter().map(|column| {
            let mut title = column.title.to_string();
            if column.sort_key == Some(sort_by.as_str()) {
                title.push_str(indicator);
            }
            let alignment = if column.numeric {
                Alignment::Right
            } else {
                Alignment::Left
            };
            Cell::from(Line::from(title).alignment(alignment))
        });

        let rows = self.rows.iter().map(|item| item.row(theme));
        let widths = R::columns().iter().map(|column| column.width);

        let table = Table::new(rows, widths)
            .header(
                Row::new(header_cells)
                    .style(Style::default().bold().fg(theme.accent_colour))
                    .bottom_margin(1),
            )
            .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .block(Block::default());

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let pagination = &self.query.pagination;
        let window = match pagination.end_index() {
            Some(end) => format!(
                "items {}-{} of {}",
                pagination.start_index() + 1,
                end + 1,
                pagination.total_count()
            ),
            None => "no items".to_string(),
        };
        let before = if pagination.has_previous_page() { "◂ " } else { "" };
        let after = if pagination.has_next_page() { " ▸" } else { "" };

        let mut footer = format!(
            "{}page {}/{}{} · {} · sort {} {}",
            before,
            pagination.page(),
            pagination.total_pages(),
            after,
            window,
            self.query.sort_by(),
            self.query.sort_order().as_str(),
        );

        let engaged: Vec<String> = self
            .query
            .filters()
            .engaged()
            .map(|(key, value)| format!("{key}={}", value.summary()))
            .collect();
        if !engaged.is_empty() {
            footer.push_str(" · ");
            footer.push_str(&engaged.join(" "));
        }

        f.render_widget(
            Paragraph::new(footer).style(Style::default().fg(theme.table_muted_fg)),
            area,
        );
    }
}
