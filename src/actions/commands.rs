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

//! Asynchronous application command processing.
//!
//! This module implements the command pattern used to offload potentially
//! blocking database queries from the main UI thread. It provides a dedicated
//! worker loop that translates [`AppCommand`] requests into database
//! operations and broadcasts the results back to the application via
//! [`AppEvent`]s.
//!
//! Commands are processed strictly in order, so a fetch issued after a
//! mutation always observes the mutated snapshot. Page responses carry the
//! generation of the request that produced them; the owning view drops any
//! that have been superseded.

use anyhow::Result;
use rusqlite::Connection;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{
    actions::events::AppEvent,
    config::AppConfig,
    listing::ListRequest,
    model::{
        Audience, Badge, CoinPurchase, Contest, EntityKind, Notice, Problem, PurchaseStatus,
        StoreItem, UserAccount,
    },
    source::{self, seed},
};

#[derive(Debug)]
pub(crate) enum AppCommand {
    FetchPage {
        kind: EntityKind,
        request: ListRequest,
        generation: u64,
    },
    SetPurchaseStatus {
        id: i64,
        status: PurchaseStatus,
    },
    ToggleUserBan {
        id: i64,
    },
    ToggleStoreItem {
        id: i64,
    },
    DispatchNotice {
        audience: Audience,
        message: String,
    },
}

/// Spawns a background thread to process application commands.
///
/// This worker thread initializes its own database connection (seeding a demo
/// snapshot if the database is empty) and enters a blocking loop, listening
/// for incoming [`AppCommand`]s.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `command_rx` - The receiving end of the command channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_command_worker(
    config: &AppConfig,
    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let mut conn =
            source::init_db(&config.database_file).expect("Failed to initialise database");
        seed::seed_if_empty(&mut conn).expect("Failed to seed database");

        while let Ok(request) = command_rx.recv() {
            if let Err(e) = handle_command(&conn, request, &event_tx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Orchestrates the execution of a single command.
///
/// This function implements the logic for each command and sends the result
/// back through the application event channel.
fn handle_command(
    conn: &Connection,
    command: AppCommand,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    match command {
        AppCommand::FetchPage {
            kind,
            request,
            generation,
        } => {
            let event = match kind {
                EntityKind::Users => {
                    AppEvent::UsersPage(source::fetch_page::<UserAccount>(conn, &request)?, generation)
                }
                EntityKind::Problems => {
                    AppEvent::ProblemsPage(source::fetch_page::<Problem>(conn, &request)?, generation)
                }
                EntityKind::Contests => {
                    AppEvent::ContestsPage(source::fetch_page::<Contest>(conn, &request)?, generation)
                }
                EntityKind::Purchases => AppEvent::PurchasesPage(
                    source::fetch_page::<CoinPurchase>(conn, &request)?,
                    generation,
                ),
                EntityKind::StoreItems => AppEvent::StoreItemsPage(
                    source::fetch_page::<StoreItem>(conn, &request)?,
                    generation,
                ),
                EntityKind::Badges => {
                    AppEvent::BadgesPage(source::fetch_page::<Badge>(conn, &request)?, generation)
                }
                EntityKind::Notices => {
                    AppEvent::NoticesPage(source::fetch_page::<Notice>(conn, &request)?, generation)
                }
            };
            event_tx.send(event)?;
        }

        AppCommand::SetPurchaseStatus { id, status } => {
            source::set_purchase_status(conn, id, status)?;
            event_tx.send(AppEvent::MutationApplied(format!(
                "Purchase {} {}",
                id,
                status.as_str()
            )))?;
        }

        AppCommand::ToggleUserBan { id } => {
            let banned = source::toggle_user_banned(conn, id)?;
            let verb = if banned { "banned" } else { "unbanned" };
            event_tx.send(AppEvent::MutationApplied(format!("User {} {}", id, verb)))?;
        }

        AppCommand::ToggleStoreItem { id } => {
            let active = source::toggle_store_item_active(conn, id)?;
            let verb = if active { "enabled" } else { "disabled" };
            event_tx.send(AppEvent::MutationApplied(format!("Item {} {}", id, verb)))?;
        }

        AppCommand::DispatchNotice { audience, message } => {
            let id = source::insert_notice(conn, audience, &message)?;
            // There is no push gateway behind the console; dispatch is
            // recorded as sent immediately.
            source::mark_notice_sent(conn, id)?;
            event_tx.send(AppEvent::MutationApplied(format!(
                "Notice sent to {}",
                audience.as_str()
            )))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SortOrder;
    use std::sync::mpsc;

    fn test_conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        crate::source::create_schema(&conn).unwrap();
        seed::seed_if_empty(&mut conn).unwrap();
        conn
    }

    fn fetch(kind: EntityKind) -> AppCommand {
        AppCommand::FetchPage {
            kind,
            request: ListRequest {
                page: 1,
                limit: 10,
                sort_by: "created".to_string(),
                sort_order: SortOrder::Desc,
                search: String::new(),
                filters: vec![],
            },
            generation: 7,
        }
    }

    #[test]
    fn test_fetch_command_answers_with_a_typed_page() {
        let conn = test_conn();
        let (tx, rx) = mpsc::channel();

        handle_command(&conn, fetch(EntityKind::Users), &tx).unwrap();
        match rx.try_recv() {
            Ok(AppEvent::UsersPage(page, generation)) => {
                assert_eq!(page.rows.len(), 10);
                assert_eq!(page.total_count, 120);
                assert_eq!(generation, 7);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        handle_command(&conn, fetch(EntityKind::Badges), &tx).unwrap();
        assert!(matches!(rx.try_recv(), Ok(AppEvent::BadgesPage(_, 7))));
    }

    #[test]
    fn test_dispatch_notice_records_and_confirms() {
        let conn = test_conn();
        let (tx, rx) = mpsc::channel();

        handle_command(
            &conn,
            AppCommand::DispatchNotice {
                audience: Audience::Setters,
                message: "Review queue is empty".to_string(),
            },
            &tx,
        )
        .unwrap();

        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::MutationApplied(message)) if message == "Notice sent to setters"
        ));
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM notices WHERE status = 'sent' AND audience = 'setters'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert!(count >= 1);
    }

    #[test]
    fn test_failed_mutation_propagates_an_error() {
        let conn = test_conn();
        let (tx, _rx) = mpsc::channel();

        let result = handle_command(
            &conn,
            AppCommand::SetPurchaseStatus {
                id: 999_999,
                status: PurchaseStatus::Approved,
            },
            &tx,
        );
        assert!(result.is_err());
    }
}
