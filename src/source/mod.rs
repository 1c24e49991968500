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

//! Data access layer.
//!
//! The console treats the platform database purely as "a source that returns
//! a page of items plus a total count". Every collection describes itself
//! with a [`TableSpec`] and a row mapper (the [`Record`] trait, implemented
//! in [`model`]), and one generic [`fetch_page`] builds the filtered,
//! sorted, windowed query plus its matching `COUNT(*)`.
//!
//! # Safety of dynamic SQL
//!
//! Filter and sort identifiers are interpolated into SQL text, so both go
//! through per-table whitelists: filters against `TableSpec::filter_columns`
//! and sort keys against `TableSpec::sortable`. Values are always bound as
//! parameters. Unknown sort keys fall back to the table's default order
//! rather than failing, consistent with the clamp-don't-reject posture of
//! the list state.

pub(crate) mod model;
pub(crate) mod seed;

use std::time::Instant;

use anyhow::{Context, Result};
use rusqlite::{Connection, ToSql, params, params_from_iter};

use crate::{
    listing::{FilterValue, ListRequest, Page, SortOrder},
    model::{Audience, PurchaseStatus},
};

/// Searches shorter than this never reach the database; they would match
/// almost everything.
const MIN_SEARCH_LEN: usize = 3;

/// Static description of one queryable collection.
pub(crate) struct TableSpec {
    pub(crate) table: &'static str,
    pub(crate) select: &'static str,
    pub(crate) search_columns: &'static [&'static str],
    pub(crate) filter_columns: &'static [&'static str],
    /// Sort key as exposed to the UI, paired with the column it orders by.
    pub(crate) sortable: &'static [(&'static str, &'static str)],
    pub(crate) default_order: &'static str,
}

/// A row type that can be paged out of the database.
pub(crate) trait Record: Sized + Send + 'static {
    const SPEC: TableSpec;

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self>;
}

/// Opens a connection to the SQLite database and configures performance
/// settings, then ensures the schema exists.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -64000; -- Use 64MB of RAM for cache
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(100);

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema: one table per administrative collection, with
/// indices on the columns the console filters and sorts by. Wrapped in a
/// single transaction so the schema is created atomically.
pub(crate) fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            handle TEXT NOT NULL COLLATE NOCASE UNIQUE,
            display_name TEXT NOT NULL,
            email TEXT NOT NULL,
            role TEXT NOT NULL,
            rating INTEGER NOT NULL DEFAULT 0,
            coins INTEGER NOT NULL DEFAULT 0,
            banned INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_role ON users (role);
        CREATE INDEX IF NOT EXISTS idx_users_rating ON users (rating);

        CREATE TABLE IF NOT EXISTS problems (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL COLLATE NOCASE UNIQUE,
            title TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            points INTEGER NOT NULL,
            author TEXT NOT NULL,
            visible INTEGER NOT NULL DEFAULT 1,
            submissions INTEGER NOT NULL DEFAULT 0,
            solved INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_problems_difficulty ON problems (difficulty);

        CREATE TABLE IF NOT EXISTS contests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            status TEXT NOT NULL,
            starts_at INTEGER NOT NULL,
            duration_minutes INTEGER NOT NULL,
            participants INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_contests_status ON contests (status);

        CREATE TABLE IF NOT EXISTS purchases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_handle TEXT NOT NULL,
            coins INTEGER NOT NULL,
            amount_cents INTEGER NOT NULL,
            provider TEXT NOT NULL,
            status TEXT NOT NULL,
            reference TEXT NOT NULL UNIQUE,
            created_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_purchases_status ON purchases (status);
        CREATE INDEX IF NOT EXISTS idx_purchases_provider ON purchases (provider);

        CREATE TABLE IF NOT EXISTS store_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL COLLATE NOCASE UNIQUE,
            kind TEXT NOT NULL,
            price_coins INTEGER NOT NULL,
            stock INTEGER,
            active INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS badges (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL COLLATE NOCASE UNIQUE,
            description TEXT NOT NULL,
            tier TEXT NOT NULL,
            awarded INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS notices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            audience TEXT NOT NULL,
            message TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Fetches one page of a collection: engaged filters and search text become
/// the `WHERE` clause, the whitelisted sort key the `ORDER BY`, pagination
/// the `LIMIT`/`OFFSET`, and a matching `COUNT(*)` supplies the
/// authoritative total for the same constraints.
pub(crate) fn fetch_page<R: Record>(conn: &Connection, request: &ListRequest) -> Result<Page<R>> {
    let spec = R::SPEC;
    let started = Instant::now();

    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    for (key, value) in &request.filters {
        if !spec.filter_columns.contains(&key.as_str()) {
            continue;
        }
        match value {
            FilterValue::Text(text) if !text.is_empty() => {
                clauses.push(format!("{key} = ?"));
                values.push(Box::new(text.clone()));
            }
            FilterValue::Number(Some(number)) => {
                clauses.push(format!("{key} = ?"));
                values.push(Box::new(*number));
            }
            FilterValue::Flag(Some(flag)) => {
                clauses.push(format!("{key} = ?"));
                values.push(Box::new(*flag));
            }
            _ => {}
        }
    }

    if request.search.len() >= MIN_SEARCH_LEN {
        let likes = spec
            .search_columns
            .iter()
            .map(|column| format!("{column} LIKE ?"))
            .collect::<Vec<_>>()
            .join(" OR ");
        clauses.push(format!("({likes})"));
        for _ in spec.search_columns {
            values.push(Box::new(format!("%{}%", request.search)));
        }
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM {}{}", spec.table, where_sql);
    let mut count_stmt = conn.prepare_cached(&count_sql)?;
    let total_count: u64 = count_stmt.query_row(
        params_from_iter(values.iter().map(|value| value.as_ref())),
        |row| row.get::<_, i64>(0),
    )? as u64;

    let order_column = spec
        .sortable
        .iter()
        .find(|(key, _)| *key == request.sort_by)
        .map(|(_, column)| *column)
        .unwrap_or(spec.default_order);
    let direction = match request.sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    // The id tiebreaker keeps page windows stable when the sort column has
    // duplicate values.
    let page_sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} {}, id {} LIMIT ? OFFSET ?",
        spec.select, spec.table, where_sql, order_column, direction, direction
    );
    values.push(Box::new(request.limit as i64));
    values.push(Box::new(request.offset() as i64));

    let mut stmt = conn.prepare_cached(&page_sql)?;
    let rows = stmt
        .query_map(
            params_from_iter(values.iter().map(|value| value.as_ref())),
            R::from_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "fetched {} {} of {} in {:?}",
        rows.len(),
        spec.table,
        total_count,
        started.elapsed()
    );

    Ok(Page { rows, total_count })
}

/// Moves a coin purchase through reconciliation.
pub(crate) fn set_purchase_status(
    conn: &Connection,
    id: i64,
    status: PurchaseStatus,
) -> Result<()> {
    let mut stmt = conn.prepare_cached("UPDATE purchases SET status = ?1 WHERE id = ?2")?;
    let changed = stmt.execute(params![status.as_str(), id])?;
    if changed == 0 {
        anyhow::bail!("No purchase with id {}", id);
    }
    Ok(())
}

/// Flips a user's ban flag and returns the new value.
pub(crate) fn toggle_user_banned(conn: &Connection, id: i64) -> Result<bool> {
    let mut stmt = conn.prepare_cached("UPDATE users SET banned = 1 - banned WHERE id = ?")?;
    let changed = stmt.execute(params![id])?;
    if changed == 0 {
        anyhow::bail!("No user with id {}", id);
    }

    let mut stmt = conn.prepare_cached("SELECT banned FROM users WHERE id = ?")?;
    let banned: bool = stmt.query_row(params![id], |row| row.get(0))?;
    Ok(banned)
}

/// Flips a store item's active flag and returns the new value.
pub(crate) fn toggle_store_item_active(conn: &Connection, id: i64) -> Result<bool> {
    let mut stmt = conn.prepare_cached("UPDATE store_items SET active = 1 - active WHERE id = ?")?;
    let changed = stmt.execute(params![id])?;
    if changed == 0 {
        anyhow::bail!("No store item with id {}", id);
    }

    let mut stmt = conn.prepare_cached("SELECT active FROM store_items WHERE id = ?")?;
    let active: bool = stmt.query_row(params![id], |row| row.get(0))?;
    Ok(active)
}

/// Records a push-notification dispatch and returns its id.
pub(crate) fn insert_notice(conn: &Connection, audience: Audience, message: &str) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO notices (audience, message, status, created_at)
         VALUES (?1, ?2, 'queued', ?3)",
    )?;
    stmt.execute(params![
        audience.as_str(),
        message,
        chrono::Utc::now().timestamp()
    ])?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn mark_notice_sent(conn: &Connection, id: i64) -> Result<()> {
    let mut stmt = conn.prepare_cached("UPDATE notices SET status = 'sent' WHERE id = ?")?;
    stmt.execute(params![id])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoinPurchase, UserAccount};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    fn insert_user(conn: &Connection, handle: &str, role: &str, rating: i64, banned: bool) {
        conn.execute(
            "INSERT INTO users (handle, display_name, email, role, rating, coins, banned, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, 1700000000)",
            params![handle, handle, format!("{handle}@example.org"), role, rating, banned],
        )
        .unwrap();
    }

    fn insert_purchase(conn: &Connection, reference: &str, status: &str) -> i64 {
        conn.execute(
            "INSERT INTO purchases (user_handle, coins, amount_cents, provider, status, reference, created_at)
             VALUES ('alice', 500, 499, 'stripe', ?1, ?2, 1700000000)",
            params![status, reference],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn request(page: u64, limit: u64) -> ListRequest {
        ListRequest {
            page,
            limit,
            sort_by: "handle".to_string(),
            sort_order: SortOrder::Asc,
            search: String::new(),
            filters: vec![],
        }
    }

    #[test]
    fn test_page_window_and_total_count() {
        let conn = test_conn();
        for i in 0..25 {
            insert_user(&conn, &format!("user{i:02}"), "contestant", 1500, false);
        }

        let page: Page<UserAccount> = fetch_page(&conn, &request(2, 10)).unwrap();
        assert_eq!(page.total_count, 25);
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.rows[0].handle, "user10");
        assert_eq!(page.rows[9].handle, "user19");

        let last: Page<UserAccount> = fetch_page(&conn, &request(3, 10)).unwrap();
        assert_eq!(last.rows.len(), 5);
        assert_eq!(last.rows[4].handle, "user24");
    }

    #[test]
    fn test_text_filter_constrains_rows_and_count() {
        let conn = test_conn();
        insert_user(&conn, "alice", "admin", 2100, false);
        insert_user(&conn, "bob", "setter", 1900, false);
        insert_user(&conn, "carol", "contestant", 1500, false);

        let mut req = request(1, 10);
        req.filters = vec![("role".to_string(), FilterValue::text("setter"))];

        let page: Page<UserAccount> = fetch_page(&conn, &req).unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rows[0].handle, "bob");
    }

    #[test]
    fn test_flag_filter() {
        let conn = test_conn();
        insert_user(&conn, "alice", "contestant", 1500, true);
        insert_user(&conn, "bob", "contestant", 1500, false);

        let mut req = request(1, 10);
        req.filters = vec![("banned".to_string(), FilterValue::Flag(Some(true)))];

        let page: Page<UserAccount> = fetch_page(&conn, &req).unwrap();
        assert_eq!(page.total_count, 1);
        assert!(page.rows[0].banned);
    }

    #[test]
    fn test_unknown_filter_columns_are_skipped() {
        let conn = test_conn();
        insert_user(&conn, "alice", "contestant", 1500, false);

        let mut req = request(1, 10);
        req.filters = vec![("handle; DROP TABLE users".to_string(), FilterValue::text("x"))];

        let page: Page<UserAccount> = fetch_page(&conn, &req).unwrap();
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn test_search_matches_any_search_column() {
        let conn = test_conn();
        insert_user(&conn, "alice", "contestant", 1500, false);
        insert_user(&conn, "bob", "contestant", 1500, false);

        let mut req = request(1, 10);
        req.search = "lic".to_string();
        let page: Page<UserAccount> = fetch_page(&conn, &req).unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rows[0].handle, "alice");

        // Below the minimum length the search is ignored entirely.
        req.search = "li".to_string();
        let page: Page<UserAccount> = fetch_page(&conn, &req).unwrap();
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn test_sort_key_is_whitelisted() {
        let conn = test_conn();
        insert_user(&conn, "alice", "contestant", 1200, false);
        insert_user(&conn, "bob", "contestant", 2400, false);

        let mut req = request(1, 10);
        req.sort_by = "rating".to_string();
        req.sort_order = SortOrder::Desc;
        let page: Page<UserAccount> = fetch_page(&conn, &req).unwrap();
        assert_eq!(page.rows[0].handle, "bob");

        // Unknown keys fall back to the default order instead of failing.
        req.sort_by = "1; DROP TABLE users".to_string();
        let page: Page<UserAccount> = fetch_page(&conn, &req).unwrap();
        assert_eq!(page.rows.len(), 2);
    }

    #[test]
    fn test_purchase_reconciliation() {
        let conn = test_conn();
        let id = insert_purchase(&conn, "ref-1", "pending");

        set_purchase_status(&conn, id, PurchaseStatus::Approved).unwrap();

        let page: Page<CoinPurchase> = fetch_page(
            &conn,
            &ListRequest {
                page: 1,
                limit: 10,
                sort_by: "created".to_string(),
                sort_order: SortOrder::Desc,
                search: String::new(),
                filters: vec![],
            },
        )
        .unwrap();
        assert_eq!(page.rows[0].status, PurchaseStatus::Approved);

        assert!(set_purchase_status(&conn, 9999, PurchaseStatus::Rejected).is_err());
    }

    #[test]
    fn test_toggle_user_banned_round_trip() {
        let conn = test_conn();
        insert_user(&conn, "alice", "contestant", 1500, false);

        assert!(toggle_user_banned(&conn, 1).unwrap());
        assert!(!toggle_user_banned(&conn, 1).unwrap());
        assert!(toggle_user_banned(&conn, 42).is_err());
    }

    #[test]
    fn test_notice_dispatch_log() {
        let conn = test_conn();
        let id = insert_notice(&conn, Audience::Contestants, "Round 12 starts soon").unwrap();
        mark_notice_sent(&conn, id).unwrap();

        let status: String = conn
            .query_row("SELECT status FROM notices WHERE id = ?", params![id], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(status, "sent");
    }
}
