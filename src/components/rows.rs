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

//! Roster bindings for each administrative collection: columns, defaults,
//! and how one record renders as a table row.

use ratatui::layout::{Alignment, Constraint};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Row};

use crate::components::{Column, RosterRow};
use crate::listing::{FilterSet, FilterValue, SortOrder};
use crate::model::{
    Badge, CoinPurchase, Contest, ContestStatus, EntityKind, Notice, NoticeStatus, Problem,
    PurchaseStatus, StoreItem, Tier, UserAccount,
};
use crate::theme::Theme;
use crate::util::format::{format_coins, format_money_cents, format_timestamp};

fn id_cell(id: i64, theme: &Theme) -> Cell<'static> {
    Cell::from(
        Line::from(id.to_string())
            .style(Style::default().fg(theme.table_id_fg))
            .alignment(Alignment::Right),
    )
}

fn text_cell(text: impl Into<String>, colour: Color) -> Cell<'static> {
    Cell::from(Line::from(text.into()).style(Style::default().fg(colour)))
}

fn numeric_cell(text: impl Into<String>, colour: Color) -> Cell<'static> {
    Cell::from(
        Line::from(text.into())
            .style(Style::default().fg(colour))
            .alignment(Alignment::Right),
    )
}

fn created_cell(timestamp: i64, theme: &Theme) -> Cell<'static> {
    text_cell(format_timestamp(timestamp), theme.table_muted_fg)
}

fn flag_cell(value: bool, theme: &Theme) -> Cell<'static> {
    if value {
        text_cell("yes", theme.ok_colour)
    } else {
        text_cell("no", theme.table_muted_fg)
    }
}

impl RosterRow for UserAccount {
    const KIND: EntityKind = EntityKind::Users;

    fn columns() -> &'static [Column] {
        &[
            Column { title: "ID", width: Constraint::Length(6), sort_key: None, numeric: true },
            Column { title: "Handle", width: Constraint::Percentage(14), sort_key: Some("handle"), numeric: false },
            Column { title: "Name", width: Constraint::Percentage(18), sort_key: None, numeric: false },
            Column { title: "Email", width: Constraint::Percentage(22), sort_key: None, numeric: false },
            Column { title: "Role", width: Constraint::Length(10), sort_key: None, numeric: false },
            Column { title: "Rating", width: Constraint::Length(7), sort_key: Some("rating"), numeric: true },
            Column { title: "Coins", width: Constraint::Length(8), sort_key: Some("coins"), numeric: true },
            Column { title: "Banned", width: Constraint::Length(7), sort_key: None, numeric: false },
            Column { title: "Created", width: Constraint::Length(17), sort_key: Some("created"), numeric: false },
        ]
    }

    fn default_sort() -> (&'static str, SortOrder) {
        ("created", SortOrder::Desc)
    }

    fn default_filters() -> FilterSet {
        FilterSet::new([
            ("role", FilterValue::Text(String::new())),
            ("banned", FilterValue::Flag(None)),
        ])
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn row(&self, theme: &Theme) -> Row<'static> {
        let banned = if self.banned {
            text_cell("banned", theme.error_colour)
        } else {
            text_cell("", theme.table_muted_fg)
        };
        Row::new(vec![
            id_cell(self.id, theme),
            text_cell(self.handle.clone(), theme.table_text_fg),
            text_cell(self.display_name.clone(), theme.table_muted_fg),
            text_cell(self.email.clone(), theme.table_muted_fg),
            text_cell(self.role.as_str(), theme.table_text_fg),
            numeric_cell(self.rating.to_string(), theme.table_numeric_fg),
            numeric_cell(format_coins(self.coins), theme.table_numeric_fg),
            banned,
            created_cell(self.created_at, theme),
        ])
    }
}

impl RosterRow for Problem {
    const KIND: EntityKind = EntityKind::Problems;

    fn columns() -> &'static [Column] {
        &[
            Column { title: "ID", width: Constraint::Length(6), sort_key: None, numeric: true },
            Column { title: "Code", width: Constraint::Length(7), sort_key: Some("code"), numeric: false },
            Column { title: "Title", width: Constraint::Percentage(30), sort_key: Some("title"), numeric: false },
            Column { title: "Difficulty", width: Constraint::Length(10), sort_key: None, numeric: false },
            Column { title: "Points", width: Constraint::Length(7), sort_key: Some("points"), numeric: true },
            Column { title: "Author", width: Constraint::Percentage(14), sort_key: None, numeric: false },
            Column { title: "Visible", width: Constraint::Length(8), sort_key: None, numeric: false },
            Column { title: "Subs", width: Constraint::Length(6), sort_key: Some("submissions"), numeric: true },
            Column { title: "Solved", width: Constraint::Length(7), sort_key: Some("solved"), numeric: true },
            Column { title: "Created", width: Constraint::Length(17), sort_key: Some("created"), numeric: false },
        ]
    }

    fn default_sort() -> (&'static str, SortOrder) {
        ("created", SortOrder::Desc)
    }

    fn default_filters() -> FilterSet {
        FilterSet::new([
            ("difficulty", FilterValue::Text(String::new())),
            ("visible", FilterValue::Flag(None)),
        ])
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn row(&self, theme: &Theme) -> Row<'static> {
        Row::new(vec![
            id_cell(self.id, theme),
            text_cell(self.code.clone(), theme.table_text_fg),
            text_cell(self.title.clone(), theme.table_text_fg),
            text_cell(self.difficulty.as_str(), theme.table_numeric_fg),
            numeric_cell(self.points.to_string(), theme.table_numeric_fg),
            text_cell(self.author.clone(), theme.table_muted_fg),
            flag_cell(self.visible, theme),
            numeric_cell(self.submissions.to_string(), theme.table_numeric_fg),
            numeric_cell(self.solved.to_string(), theme.table_numeric_fg),
            created_cell(self.created_at, theme),
        ])
    }
}

impl RosterRow for Contest {
    const KIND: EntityKind = EntityKind::Contests;

    fn columns() -> &'static [Column] {
        &[
            Column { title: "ID", width: Constraint::Length(6), sort_key: None, numeric: true },
            Column { title: "Title", width: Constraint::Percentage(35), sort_key: Some("title"), numeric: false },
            Column { title: "Status", width: Constraint::Length(10), sort_key: None, numeric: false },
            Column { title: "Starts", width: Constraint::Length(17), sort_key: Some("starts"), numeric: false },
            Column { title: "Minutes", width: Constraint::Length(8), sort_key: None, numeric: true },
            Column { title: "Entrants", width: Constraint::Length(9), sort_key: Some("participants"), numeric: true },
            Column { title: "Created", width: Constraint::Length(17), sort_key: Some("created"), numeric: false },
        ]
    }

    fn default_sort() -> (&'static str, SortOrder) {
        ("starts", SortOrder::Desc)
    }

    fn default_filters() -> FilterSet {
        FilterSet::new([("status", FilterValue::Text(String::new()))])
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn row(&self, theme: &Theme) -> Row<'static> {
        let status_colour = match self.status {
            ContestStatus::Scheduled => theme.warn_colour,
            ContestStatus::Running => theme.ok_colour,
            ContestStatus::Finished => theme.table_muted_fg,
        };
        Row::new(vec![
            id_cell(self.id, theme),
            text_cell(self.title.clone(), theme.table_text_fg),
            text_cell(self.status.as_str(), status_colour),
            text_cell(format_timestamp(self.starts_at), theme.table_text_fg),
            numeric_cell(self.duration_minutes.to_string(), theme.table_numeric_fg),
            numeric_cell(self.participants.to_string(), theme.table_numeric_fg),
            created_cell(self.created_at, theme),
        ])
    }
}

impl RosterRow for CoinPurchase {
    const KIND: EntityKind = EntityKind::Purchases;

    fn columns() -> &'static [Column] {
        &[
            Column { title: "ID", width: Constraint::Length(6), sort_key: None, numeric: true },
            Column { title: "User", width: Constraint::Percentage(16), sort_key: Some("user"), numeric: false },
            Column { title: "Coins", width: Constraint::Length(8), sort_key: Some("coins"), numeric: true },
            Column { title: "Amount", width: Constraint::Length(9), sort_key: Some("amount"), numeric: true },
            Column { title: "Provider", width: Constraint::Length(9), sort_key: None, numeric: false },
            Column { title: "Status", width: Constraint::Length(9), sort_key: None, numeric: false },
            Column { title: "Reference", width: Constraint::Percentage(16), sort_key: None, numeric: false },
            Column { title: "Created", width: Constraint::Length(17), sort_key: Some("created"), numeric: false },
        ]
    }

    fn default_sort() -> (&'static str, SortOrder) {
        ("created", SortOrder::Desc)
    }

    fn default_filters() -> FilterSet {
        FilterSet::new([
            ("status", FilterValue::Text(String::new())),
            ("provider", FilterValue::Text(String::new())),
        ])
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn row(&self, theme: &Theme) -> Row<'static> {
        let status_colour = match self.status {
            PurchaseStatus::Pending => theme.warn_colour,
            PurchaseStatus::Approved => theme.ok_colour,
            PurchaseStatus::Rejected => theme.error_colour,
        };
        Row::new(vec![
            id_cell(self.id, theme),
            text_cell(self.user_handle.clone(), theme.table_text_fg),
            numeric_cell(format_coins(self.coins), theme.table_numeric_fg),
            numeric_cell(format_money_cents(self.amount_cents), theme.table_numeric_fg),
            text_cell(self.provider.as_str(), theme.table_muted_fg),
            text_cell(self.status.as_str(), status_colour),
            text_cell(self.reference.clone(), theme.table_muted_fg),
            created_cell(self.created_at, theme),
        ])
    }
}

impl RosterRow for StoreItem {
    const KIND: EntityKind = EntityKind::StoreItems;

    fn columns() -> &'static [Column] {
        &[
            Column { title: "ID", width: Constraint::Length(6), sort_key: None, numeric: true },
            Column { title: "Name", width: Constraint::Percentage(35), sort_key: Some("name"), numeric: false },
            Column { title: "Kind", width: Constraint::Length(9), sort_key: None, numeric: false },
            Column { title: "Price", width: Constraint::Length(8), sort_key: Some("price"), numeric: true },
            Column { title: "Stock", width: Constraint::Length(7), sort_key: None, numeric: true },
            Column { title: "Active", width: Constraint::Length(7), sort_key: None, numeric: false },
            Column { title: "Created", width: Constraint::Length(17), sort_key: Some("created"), numeric: false },
        ]
    }

    fn default_sort() -> (&'static str, SortOrder) {
        ("name", SortOrder::Asc)
    }

    fn default_filters() -> FilterSet {
        FilterSet::new([
            ("kind", FilterValue::Text(String::new())),
            ("active", FilterValue::Flag(None)),
        ])
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn row(&self, theme: &Theme) -> Row<'static> {
        let stock = match self.stock {
            Some(stock) => stock.to_string(),
            None => "∞".to_string(),
        };
        Row::new(vec![
            id_cell(self.id, theme),
            text_cell(self.name.clone(), theme.table_text_fg),
            text_cell(self.kind.as_str(), theme.table_muted_fg),
            numeric_cell(format_coins(self.price_coins), theme.table_numeric_fg),
            numeric_cell(stock, theme.table_numeric_fg),
            flag_cell(self.active, theme),
            created_cell(self.created_at, theme),
        ])
    }
}

impl RosterRow for Badge {
    const KIND: EntityKind = EntityKind::Badges;

    fn columns() -> &'static [Column] {
        &[
            Column { title: "ID", width: Constraint::Length(6), sort_key: None, numeric: true },
            Column { title: "Name", width: Constraint::Percentage(22), sort_key: Some("name"), numeric: false },
            Column { title: "Description", width: Constraint::Percentage(42), sort_key: None, numeric: false },
            Column { title: "Tier", width: Constraint::Length(7), sort_key: None, numeric: false },
            Column { title: "Awarded", width: Constraint::Length(8), sort_key: Some("awarded"), numeric: true },
            Column { title: "Created", width: Constraint::Length(17), sort_key: Some("created"), numeric: false },
        ]
    }

    fn default_sort() -> (&'static str, SortOrder) {
        ("name", SortOrder::Asc)
    }

    fn default_filters() -> FilterSet {
        FilterSet::new([("tier", FilterValue::Text(String::new()))])
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn row(&self, theme: &Theme) -> Row<'static> {
        let tier_colour = match self.tier {
            Tier::Bronze => theme.table_muted_fg,
            Tier::Silver => theme.table_text_fg,
            Tier::Gold => theme.warn_colour,
        };
        Row::new(vec![
            id_cell(self.id, theme),
            text_cell(self.name.clone(), theme.table_text_fg),
            text_cell(self.description.clone(), theme.table_muted_fg),
            text_cell(self.tier.as_str(), tier_colour),
            numeric_cell(self.awarded.to_string(), theme.table_numeric_fg),
            created_cell(self.created_at, theme),
        ])
    }
}

impl RosterRow for Notice {
    const KIND: EntityKind = EntityKind::Notices;

    fn columns() -> &'static [Column] {
        &[
            Column { title: "ID", width: Constraint::Length(6), sort_key: None, numeric: true },
            Column { title: "Audience", width: Constraint::Length(12), sort_key: Some("audience"), numeric: false },
            Column { title: "Message", width: Constraint::Percentage(60), sort_key: None, numeric: false },
            Column { title: "Status", width: Constraint::Length(7), sort_key: None, numeric: false },
            Column { title: "Created", width: Constraint::Length(17), sort_key: Some("created"), numeric: false },
        ]
    }

    fn default_sort() -> (&'static str, SortOrder) {
        ("created", SortOrder::Desc)
    }

    fn default_filters() -> FilterSet {
        FilterSet::new([
            ("audience", FilterValue::Text(String::new())),
            ("status", FilterValue::Text(String::new())),
        ])
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn row(&self, theme: &Theme) -> Row<'static> {
        let status_colour = match self.status {
            NoticeStatus::Queued => theme.warn_colour,
            NoticeStatus::Sent => theme.ok_colour,
        };
        Row::new(vec![
            id_cell(self.id, theme),
            text_cell(self.audience.as_str(), theme.table_numeric_fg),
            text_cell(self.message.clone(), theme.table_text_fg),
            text_cell(self.status.as_str(), status_colour),
            created_cell(self.created_at, theme),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Record;

    // Every UI sort key must be understood by the data source, or clicking a
    // header would silently fall back to the default order.
    fn assert_sort_keys_whitelisted<R: RosterRow + Record>() {
        for column in R::columns() {
            if let Some(key) = column.sort_key {
                assert!(
                    R::SPEC.sortable.iter().any(|(k, _)| *k == key),
                    "{} sort key '{}' missing from the table spec",
                    R::KIND.title(),
                    key
                );
            }
        }
        let (default_key, _) = R::default_sort();
        assert!(R::SPEC.sortable.iter().any(|(k, _)| *k == default_key));
    }

    // Every default filter must name a filterable column, or engaging it
    // would be silently ignored by the query builder.
    fn assert_filter_keys_whitelisted<R: RosterRow + Record>() {
        let filters = R::default_filters();
        for key in filters.keys() {
            assert!(
                R::SPEC.filter_columns.contains(&key),
                "{} filter '{}' missing from the table spec",
                R::KIND.title(),
                key
            );
        }
    }

    #[test]
    fn test_view_keys_match_the_table_specs() {
        assert_sort_keys_whitelisted::<UserAccount>();
        assert_sort_keys_whitelisted::<Problem>();
        assert_sort_keys_whitelisted::<Contest>();
        assert_sort_keys_whitelisted::<CoinPurchase>();
        assert_sort_keys_whitelisted::<StoreItem>();
        assert_sort_keys_whitelisted::<Badge>();
        assert_sort_keys_whitelisted::<Notice>();

        assert_filter_keys_whitelisted::<UserAccount>();
        assert_filter_keys_whitelisted::<Problem>();
        assert_filter_keys_whitelisted::<Contest>();
        assert_filter_keys_whitelisted::<CoinPurchase>();
        assert_filter_keys_whitelisted::<StoreItem>();
        assert_filter_keys_whitelisted::<Badge>();
        assert_filter_keys_whitelisted::<Notice>();
    }
}
