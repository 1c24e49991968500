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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard), background worker updates
//! (fetched pages, mutation confirmations), and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    asynchronous channel.
//! 2. **Process**: The [`process_events`] function updates the [`App`] state
//!    and issues commands to the database worker where a query changed.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!   `ratatui` terminal.

use std::{io::Stdout, time::Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, Toast,
    actions::commands::AppCommand,
    components::RosterAction,
    listing::{Page, SortOrder},
    model::{
        Audience, Badge, CoinPurchase, Contest, EntityKind, Notice, Problem, PurchaseStatus,
        StoreItem, UserAccount,
    },
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    SetMainView(EntityKind),

    UsersPage(Page<UserAccount>, u64),
    ProblemsPage(Page<Problem>, u64),
    ContestsPage(Page<Contest>, u64),
    PurchasesPage(Page<CoinPurchase>, u64),
    StoreItemsPage(Page<StoreItem>, u64),
    BadgesPage(Page<Badge>, u64),
    NoticesPage(Page<Notice>, u64),

    SortBy(String),
    SetSortOrder(SortOrder),
    SetLimit(u64),
    GoToPage(u64),
    SetFilter(String, String),
    ClearFilters,
    ResetFilters,
    ResetView,
    SetSearch(String),
    RefreshView,

    DispatchNotice { audience: Audience, message: String },
    MutationApplied(String),

    Tick,

    ExitApplication,

    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,

            AppEvent::SetMainView(kind) => {
                app.main_view = kind;
                app.ensure_loaded();
            }

            AppEvent::UsersPage(page, generation) => {
                app.users.apply_page(page, generation);
            }
            AppEvent::ProblemsPage(page, generation) => {
                app.problems.apply_page(page, generation);
            }
            AppEvent::ContestsPage(page, generation) => {
                app.contests.apply_page(page, generation);
            }
            AppEvent::PurchasesPage(page, generation) => {
                app.purchases.apply_page(page, generation);
            }
            AppEvent::StoreItemsPage(page, generation) => {
                app.store_items.apply_page(page, generation);
            }
            AppEvent::BadgesPage(page, generation) => {
                app.badges.apply_page(page, generation);
            }
            AppEvent::NoticesPage(page, generation) => {
                app.notices.apply_page(page, generation);
            }

            AppEvent::SortBy(key) => {
                app.with_active_query(|query| query.set_sort_by(key));
                app.refetch_active();
            }
            AppEvent::SetSortOrder(order) => {
                app.with_active_query(|query| query.set_sort_order(order));
                app.refetch_active();
            }
            AppEvent::SetLimit(limit) => {
                app.with_active_query(|query| query.set_limit(limit));
                app.refetch_active();
            }
            AppEvent::GoToPage(page) => {
                let changed = app.with_active_query(|query| {
                    let before = query.pagination.page();
                    query.pagination.set_page(page);
                    query.pagination.page() != before
                });
                if changed {
                    app.refetch_active();
                }
            }
            AppEvent::SetFilter(key, value) => {
                let applied =
                    app.with_active_query(|query| query.set_filter_parsed(&key, &value));
                if applied {
                    app.refetch_active();
                } else {
                    app.toast = Some(Toast::Error(format!("Cannot apply filter {key}={value}")));
                }
            }
            AppEvent::ClearFilters => {
                app.with_active_query(|query| query.clear_filters());
                app.refetch_active();
            }
            AppEvent::ResetFilters => {
                app.with_active_query(|query| query.reset_filters());
                app.refetch_active();
            }
            AppEvent::ResetView => {
                app.with_active_query(|query| query.reset());
                app.refetch_active();
            }
            AppEvent::SetSearch(text) => {
                let changed = app.with_active_query(|query| query.commit_search(&text));
                if changed {
                    app.refetch_active();
                }
            }
            AppEvent::RefreshView => app.refetch_active(),

            AppEvent::DispatchNotice { audience, message } => {
                app.command_tx
                    .send(AppCommand::DispatchNotice { audience, message })?;
            }
            AppEvent::MutationApplied(message) => {
                app.toast = Some(Toast::Info(message));
                app.refetch_active();
            }

            AppEvent::Tick => {
                if app.poll_active_search(Instant::now()) {
                    app.refetch_active();
                }
            }

            AppEvent::Error(message) => {
                log::warn!("{}", message);
                app.toast = Some(Toast::Error(message));
            }

            AppEvent::ExitApplication => unreachable!(),
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Maps keyboard input to application actions.
///
/// This function acts as the primary input router for the TUI. The commander
/// takes precedence, then an active search box, then the global key map, and
/// finally the active roster's own navigation keys.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Any keypress dismisses a toast.
    app.toast = None;

    let event = Event::Key(key);
    if app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    if app.active_search_active() {
        if let Some(RosterAction::QueryChanged) = app.process_active_roster_event(&event) {
            app.refetch_active();
        }
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        (KeyCode::Char('1'), _) => app.event_tx.send(AppEvent::SetMainView(EntityKind::Users))?,
        (KeyCode::Char('2'), _) => app
            .event_tx
            .send(AppEvent::SetMainView(EntityKind::Problems))?,
        (KeyCode::Char('3'), _) => app
            .event_tx
            .send(AppEvent::SetMainView(EntityKind::Contests))?,
        (KeyCode::Char('4'), _) => app
            .event_tx
            .send(AppEvent::SetMainView(EntityKind::Purchases))?,
        (KeyCode::Char('5'), _) => app
            .event_tx
            .send(AppEvent::SetMainView(EntityKind::StoreItems))?,
        (KeyCode::Char('6'), _) => app
            .event_tx
            .send(AppEvent::SetMainView(EntityKind::Badges))?,
        (KeyCode::Char('7'), _) => app
            .event_tx
            .send(AppEvent::SetMainView(EntityKind::Notices))?,

        (KeyCode::Char('r'), _) => app.refetch_active(),

        // Reconciliation of the selected purchase.
        (KeyCode::Char('a'), KeyModifiers::NONE)
            if app.main_view == EntityKind::Purchases =>
        {
            if let Some(purchase) = app.purchases.selected() {
                app.command_tx.send(AppCommand::SetPurchaseStatus {
                    id: purchase.id,
                    status: PurchaseStatus::Approved,
                })?;
            }
        }
        (KeyCode::Char('x'), KeyModifiers::NONE)
            if app.main_view == EntityKind::Purchases =>
        {
            if let Some(purchase) = app.purchases.selected() {
                app.command_tx.send(AppCommand::SetPurchaseStatus {
                    id: purchase.id,
                    status: PurchaseStatus::Rejected,
                })?;
            }
        }

        (KeyCode::Char('b'), KeyModifiers::NONE) if app.main_view == EntityKind::Users => {
            if let Some(user) = app.users.selected() {
                app.command_tx
                    .send(AppCommand::ToggleUserBan { id: user.id })?;
            }
        }

        (KeyCode::Char('t'), KeyModifiers::NONE)
            if app.main_view == EntityKind::StoreItems =>
        {
            if let Some(item) = app.store_items.selected() {
                app.command_tx
                    .send(AppCommand::ToggleStoreItem { id: item.id })?;
            }
        }

        // Everything else belongs to the active roster: cursor movement,
        // page keys, sort toggle, search activation.
        _ => {
            let event = Event::Key(key);
            if let Some(RosterAction::QueryChanged) = app.process_active_roster_event(&event) {
                app.refetch_active();
            }
        }
    }

    Ok(())
}
