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

//! Demo snapshot generation.
//!
//! A fresh database is seeded with a plausible platform snapshot so the
//! console is usable straight away. Volumes are sized so that every view has
//! multiple pages at the default page size.

use anyhow::{Context, Result};
use chrono::Utc;
use rand::{Rng, RngExt};
use rand::seq::IndexedRandom;
use rusqlite::{Connection, params};

const HANDLES: &[&str] = &[
    "quark", "lambda", "vector", "syzygy", "octal", "monoid", "kernel", "tensor", "praxis",
    "nimbus", "zenith", "fathom", "cipher", "gambit", "helix", "jolt", "karma", "lyric",
    "matrix", "nexus", "orbit", "pixel", "quill", "raster", "sigma", "tango", "umbra",
    "vortex", "wisp", "xenon", "yonder", "zephyr",
];

const PROBLEM_WORDS: &[&str] = &[
    "Shortest", "Heavy", "Balanced", "Cyclic", "Minimal", "Greedy", "Lazy", "Parallel",
    "Sorted", "Hidden", "Broken", "Infinite",
];

const PROBLEM_NOUNS: &[&str] = &[
    "Paths", "Bridges", "Subsequences", "Partitions", "Queries", "Intervals", "Tournaments",
    "Matchings", "Rotations", "Segments",
];

const CONTEST_SERIES: &[&str] = &["Weekly Round", "Div 2 Sprint", "Monthly Open", "Night Cup"];

const ITEM_NAMES: &[(&str, &str)] = &[
    ("Crimson Avatar Ring", "icon"),
    ("Azure Avatar Ring", "icon"),
    ("Golden Laurel Frame", "icon"),
    ("Pixel Cat Badge", "icon"),
    ("Midnight Editor Theme", "theme"),
    ("Solarized Editor Theme", "theme"),
    ("High Contrast Theme", "theme"),
    ("Terminal Green Theme", "theme"),
    ("Streak Shield", "booster"),
    ("Double Coins Weekend", "booster"),
    ("Rating Insurance", "booster"),
    ("Hint Token Pack", "booster"),
    ("Retro CRT Theme", "theme"),
    ("Glacier Theme", "theme"),
    ("Obsidian Avatar Ring", "icon"),
    ("Confetti Burst", "booster"),
    ("Founders Crest", "icon"),
    ("Amber Editor Theme", "theme"),
    ("Weekend Warmup Pass", "booster"),
    ("Silver Laurel Frame", "icon"),
];

const BADGES: &[(&str, &str, &str)] = &[
    ("First Blood", "First accepted submission in a contest", "gold"),
    ("Centurion", "100 solved problems", "silver"),
    ("Marathoner", "Solved a problem in every division", "gold"),
    ("Early Bird", "Registered within the first week", "bronze"),
    ("Night Owl", "Ten submissions after midnight", "bronze"),
    ("Perfectionist", "Full score in a rated round", "gold"),
    ("Streaker", "30 day solving streak", "silver"),
    ("Mentor", "Authored a problem used in a rated round", "gold"),
    ("Sprinter", "Solved the first problem in under two minutes", "silver"),
    ("Collector", "Owns ten store items", "bronze"),
    ("Comeback", "Won a round after losing rating three times", "silver"),
    ("Scholar", "Solved fifty hard problems", "gold"),
    ("Regular", "Participated in ten consecutive rounds", "bronze"),
    ("Polyglot", "Accepted submissions in five languages", "silver"),
    ("Untouchable", "Unbeaten in three consecutive rounds", "gold"),
];

const NOTICE_MESSAGES: &[(&str, &str)] = &[
    ("all", "Scheduled maintenance on Saturday 02:00 UTC"),
    ("contestants", "Weekly Round 87 registration is open"),
    ("all", "New store items have arrived"),
    ("setters", "Problem proposal deadline extended to Friday"),
    ("contestants", "Rating recalculation has finished"),
    ("all", "Terms of service updated"),
    ("setters", "Please review the new test data guidelines"),
    ("contestants", "Div 2 Sprint starts in one hour"),
    ("all", "Happy new year from the arena team"),
    ("contestants", "Plagiarism checks completed for Round 86"),
];

/// Seeds a plausible snapshot into an empty database. A database that
/// already holds users is left untouched.
pub(crate) fn seed_if_empty(conn: &mut Connection) -> Result<()> {
    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    if users > 0 {
        return Ok(());
    }

    log::info!("empty database, seeding demo snapshot");

    let mut rng = rand::rng();
    let now = Utc::now().timestamp();
    let tx = conn.transaction()?;

    let mut handles = Vec::new();
    for (i, base) in HANDLES.iter().cycle().take(120).enumerate() {
        let handle = if i < HANDLES.len() {
            (*base).to_string()
        } else {
            format!("{base}{}", i / HANDLES.len())
        };
        let role = match i {
            0..3 => "admin",
            3..12 => "setter",
            _ => "contestant",
        };
        tx.execute(
            "INSERT INTO users (handle, display_name, email, role, rating, coins, banned, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                handle,
                title_case(&handle),
                format!("{handle}@arena.example"),
                role,
                rng.random_range(800..3200),
                rng.random_range(0..5000),
                rng.random_bool(0.05),
                now - rng.random_range(0..86400 * 720),
            ],
        )?;
        handles.push(handle);
    }

    for i in 0..80 {
        let word = PROBLEM_WORDS.choose(&mut rng).unwrap_or(&"Odd");
        let noun = PROBLEM_NOUNS.choose(&mut rng).unwrap_or(&"Sums");
        let difficulty = ["easy", "medium", "hard"][rng.random_range(0..3)];
        let submissions: i64 = rng.random_range(20..4000);
        tx.execute(
            "INSERT INTO problems (code, title, difficulty, points, author, visible, submissions, solved, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                format!("P{:04}", 1000 + i),
                format!("{word} {noun}"),
                difficulty,
                match difficulty {
                    "easy" => 100,
                    "medium" => 250,
                    _ => 500,
                },
                handles[rng.random_range(3..12)],
                rng.random_bool(0.9),
                submissions,
                rng.random_range(0..=submissions),
                now - rng.random_range(0..86400 * 540),
            ],
        )?;
    }

    for i in 0..12 {
        let series = CONTEST_SERIES.choose(&mut rng).unwrap_or(&"Round");
        let starts_at = now + rng.random_range(-86400 * 90..86400 * 30);
        let status = if starts_at > now {
            "scheduled"
        } else if starts_at > now - 7200 {
            "running"
        } else {
            "finished"
        };
        tx.execute(
            "INSERT INTO contests (title, status, starts_at, duration_minutes, participants, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                format!("{series} {}", 80 + i),
                status,
                starts_at,
                [90, 120, 150, 180][rng.random_range(0..4)],
                rng.random_range(40..2500),
                starts_at - 86400 * 14,
            ],
        )?;
    }

    for i in 0..60 {
        let coins: i64 = [250, 500, 1200, 2600][rng.random_range(0..4)];
        let provider = ["stripe", "paypal", "promo"][rng.random_range(0..3)];
        let status = ["pending", "approved", "rejected"][rng.random_range(0..3)];
        tx.execute(
            "INSERT INTO purchases (user_handle, coins, amount_cents, provider, status, reference, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                handles[rng.random_range(0..handles.len())],
                coins,
                if provider == "promo" { 0 } else { coins * 2 },
                provider,
                status,
                format!("TXN-{:06}", 350000 + i * 17),
                now - rng.random_range(0..86400 * 60),
            ],
        )?;
    }

    for (name, kind) in ITEM_NAMES {
        let stock: Option<i64> = if rng.random_bool(0.3) {
            Some(rng.random_range(1..200))
        } else {
            None
        };
        tx.execute(
            "INSERT INTO store_items (name, kind, price_coins, stock, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                name,
                kind,
                rng.random_range(2..60) * 50,
                stock,
                rng.random_bool(0.85),
                now - rng.random_range(0..86400 * 360),
            ],
        )?;
    }

    for (name, description, tier) in BADGES {
        tx.execute(
            "INSERT INTO badges (name, description, tier, awarded, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                description,
                tier,
                rng.random_range(1..800),
                now - rng.random_range(0..86400 * 360),
            ],
        )?;
    }

    for (audience, message) in NOTICE_MESSAGES {
        tx.execute(
            "INSERT INTO notices (audience, message, status, created_at)
             VALUES (?1, ?2, 'sent', ?3)",
            params![audience, message, now - rng.random_range(0..86400 * 30)],
        )?;
    }

    tx.commit().context("Failed to seed demo snapshot")
}

fn title_case(handle: &str) -> String {
    let mut chars = handle.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::create_schema;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_seed_populates_every_collection_once() {
        let mut conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();

        seed_if_empty(&mut conn).unwrap();

        assert_eq!(count(&conn, "users"), 120);
        assert_eq!(count(&conn, "problems"), 80);
        assert_eq!(count(&conn, "contests"), 12);
        assert_eq!(count(&conn, "purchases"), 60);
        assert_eq!(count(&conn, "store_items"), 20);
        assert_eq!(count(&conn, "badges"), 15);
        assert_eq!(count(&conn, "notices"), 10);

        // Re-seeding a populated database is a no-op.
        seed_if_empty(&mut conn).unwrap();
        assert_eq!(count(&conn, "users"), 120);
    }
}
