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

use chrono::DateTime;

/// Formats a unix timestamp as `YYYY-MM-DD HH:MM` (UTC) for table cells.
/// Out-of-range timestamps render as a placeholder rather than failing.
pub(crate) fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(moment) => moment.format("%Y-%m-%d %H:%M").to_string(),
        None => "--------- --:--".to_string(),
    }
}

/// Formats a coin amount with thousands separators, e.g. `12,500`.
pub(crate) fn format_coins(coins: i64) -> String {
    let negative = coins < 0;
    let digits = coins.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats an amount of money held in cents, e.g. `$12.99`.
pub(crate) fn format_money_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00");
        assert_eq!(format_timestamp(1_700_000_000), "2023-11-14 22:13");
        assert_eq!(format_timestamp(i64::MAX), "--------- --:--");
    }

    #[test]
    fn test_format_coins() {
        assert_eq!(format_coins(0), "0");
        assert_eq!(format_coins(999), "999");
        assert_eq!(format_coins(1000), "1,000");
        assert_eq!(format_coins(1234567), "1,234,567");
        assert_eq!(format_coins(-2500), "-2,500");
    }

    #[test]
    fn test_format_money_cents() {
        assert_eq!(format_money_cents(0), "$0.00");
        assert_eq!(format_money_cents(5), "$0.05");
        assert_eq!(format_money_cents(1299), "$12.99");
        assert_eq!(format_money_cents(-250), "-$2.50");
    }
}
