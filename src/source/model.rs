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

//! Table specs and row mappers for each administrative collection.

use rusqlite::Row;
use rusqlite::types::Type;

use crate::model::{
    Audience, Badge, CoinPurchase, Contest, ContestStatus, Difficulty, ItemKind, Notice,
    NoticeStatus, Problem, Provider, PurchaseStatus, Role, StoreItem, Tier, UserAccount,
};
use crate::source::{Record, TableSpec};

/// Decodes a stored vocabulary token, surfacing bad tokens as conversion
/// failures instead of panicking on a corrupted snapshot.
fn parse_enum<T>(
    idx: usize,
    raw: String,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unrecognised token '{raw}'").into(),
        )
    })
}

impl Record for UserAccount {
    const SPEC: TableSpec = TableSpec {
        table: "users",
        select: "id, handle, display_name, email, role, rating, coins, banned, created_at",
        search_columns: &["handle", "display_name", "email"],
        filter_columns: &["role", "banned"],
        sortable: &[
            ("handle", "handle"),
            ("rating", "rating"),
            ("coins", "coins"),
            ("created", "created_at"),
        ],
        default_order: "created_at",
    };

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            handle: row.get(1)?,
            display_name: row.get(2)?,
            email: row.get(3)?,
            role: parse_enum(4, row.get(4)?, Role::parse)?,
            rating: row.get(5)?,
            coins: row.get(6)?,
            banned: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}

impl Record for Problem {
    const SPEC: TableSpec = TableSpec {
        table: "problems",
        select: "id, code, title, difficulty, points, author, visible, submissions, solved, created_at",
        search_columns: &["code", "title", "author"],
        filter_columns: &["difficulty", "visible"],
        sortable: &[
            ("code", "code"),
            ("title", "title"),
            ("points", "points"),
            ("submissions", "submissions"),
            ("solved", "solved"),
            ("created", "created_at"),
        ],
        default_order: "created_at",
    };

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            code: row.get(1)?,
            title: row.get(2)?,
            difficulty: parse_enum(3, row.get(3)?, Difficulty::parse)?,
            points: row.get(4)?,
            author: row.get(5)?,
            visible: row.get(6)?,
            submissions: row.get(7)?,
            solved: row.get(8)?,
            created_at: row.get(9)?,
        })
    }
}

impl Record for Contest {
    const SPEC: TableSpec = TableSpec {
        table: "contests",
        select: "id, title, status, starts_at, duration_minutes, participants, created_at",
        search_columns: &["title"],
        filter_columns: &["status"],
        sortable: &[
            ("title", "title"),
            ("starts", "starts_at"),
            ("participants", "participants"),
            ("created", "created_at"),
        ],
        default_order: "starts_at",
    };

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            status: parse_enum(2, row.get(2)?, ContestStatus::parse)?,
            starts_at: row.get(3)?,
            duration_minutes: row.get(4)?,
            participants: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl Record for CoinPurchase {
    const SPEC: TableSpec = TableSpec {
        table: "purchases",
        select: "id, user_handle, coins, amount_cents, provider, status, reference, created_at",
        search_columns: &["user_handle", "reference"],
        filter_columns: &["status", "provider"],
        sortable: &[
            ("user", "user_handle"),
            ("coins", "coins"),
            ("amount", "amount_cents"),
            ("created", "created_at"),
        ],
        default_order: "created_at",
    };

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_handle: row.get(1)?,
            coins: row.get(2)?,
            amount_cents: row.get(3)?,
            provider: parse_enum(4, row.get(4)?, Provider::parse)?,
            status: parse_enum(5, row.get(5)?, PurchaseStatus::parse)?,
            reference: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}

impl Record for StoreItem {
    const SPEC: TableSpec = TableSpec {
        table: "store_items",
        select: "id, name, kind, price_coins, stock, active, created_at",
        search_columns: &["name"],
        filter_columns: &["kind", "active"],
        sortable: &[
            ("name", "name"),
            ("price", "price_coins"),
            ("created", "created_at"),
        ],
        default_order: "name",
    };

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: parse_enum(2, row.get(2)?, ItemKind::parse)?,
            price_coins: row.get(3)?,
            stock: row.get(4)?,
            active: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl Record for Badge {
    const SPEC: TableSpec = TableSpec {
        table: "badges",
        select: "id, name, description, tier, awarded, created_at",
        search_columns: &["name", "description"],
        filter_columns: &["tier"],
        sortable: &[
            ("name", "name"),
            ("awarded", "awarded"),
            ("created", "created_at"),
        ],
        default_order: "name",
    };

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            tier: parse_enum(3, row.get(3)?, Tier::parse)?,
            awarded: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl Record for Notice {
    const SPEC: TableSpec = TableSpec {
        table: "notices",
        select: "id, audience, message, status, created_at",
        search_columns: &["message"],
        filter_columns: &["audience", "status"],
        sortable: &[("created", "created_at"), ("audience", "audience")],
        default_order: "created_at",
    };

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            audience: parse_enum(1, row.get(1)?, Audience::parse)?,
            message: row.get(2)?,
            status: parse_enum(3, row.get(3)?, NoticeStatus::parse)?,
            created_at: row.get(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{Connection, params};

    #[test]
    fn test_bad_vocabulary_token_is_a_conversion_failure() {
        let conn = Connection::open_in_memory().unwrap();
        crate::source::create_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO users (handle, display_name, email, role, rating, coins, banned, created_at)
             VALUES ('alice', 'Alice', 'alice@example.org', 'overlord', 0, 0, 0, 0)",
            params![],
        )
        .unwrap();

        let result = conn.query_row(
            &format!("SELECT {} FROM users", UserAccount::SPEC.select),
            [],
            UserAccount::from_row,
        );
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(4, _, _))
        ));
    }
}
