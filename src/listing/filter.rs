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

//! Named filter values for a list view.
//!
//! The set of filter names is fixed when the set is created (the "shape" of
//! filters for a given view); only values change afterwards. Each value type
//! carries its own cleared representation, so clearing a numeric or boolean
//! filter disengages it instead of forcing it through a string sentinel.

use std::collections::BTreeMap;

/// A single filter value.
///
/// The cleared representation is typed: empty string for text, `None` for
/// numbers, `None` for flags. A flag is tri-state because "no filter" and
/// "filter = false" are different queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterValue {
    Text(String),
    Number(Option<i64>),
    Flag(Option<bool>),
}

impl FilterValue {
    pub(crate) fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub(crate) fn cleared(&self) -> Self {
        match self {
            Self::Text(_) => Self::Text(String::new()),
            Self::Number(_) => Self::Number(None),
            Self::Flag(_) => Self::Flag(None),
        }
    }

    pub(crate) fn is_cleared(&self) -> bool {
        match self {
            Self::Text(value) => value.is_empty(),
            Self::Number(value) => value.is_none(),
            Self::Flag(value) => value.is_none(),
        }
    }

    /// Parses raw command-line text into a value of the same type as `self`.
    /// `-` (or the empty string) clears. Returns `None` on unparseable input.
    pub(crate) fn parsed(&self, raw: &str) -> Option<Self> {
        if raw.is_empty() || raw == "-" {
            return Some(self.cleared());
        }
        match self {
            Self::Text(_) => Some(Self::Text(raw.to_string())),
            Self::Number(_) => raw.parse::<i64>().ok().map(|n| Self::Number(Some(n))),
            Self::Flag(_) => match raw {
                "true" | "yes" | "1" => Some(Self::Flag(Some(true))),
                "false" | "no" | "0" => Some(Self::Flag(Some(false))),
                _ => None,
            },
        }
    }

    /// Short display form for the status summary line.
    pub(crate) fn summary(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(Some(value)) => value.to_string(),
            Self::Flag(Some(value)) => value.to_string(),
            Self::Number(None) | Self::Flag(None) => String::new(),
        }
    }
}

/// A fixed-shape mapping from filter name to value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilterSet {
    values: BTreeMap<&'static str, FilterValue>,
    defaults: BTreeMap<&'static str, FilterValue>,
}

impl FilterSet {
    pub(crate) fn new(defaults: impl IntoIterator<Item = (&'static str, FilterValue)>) -> Self {
        let defaults: BTreeMap<_, _> = defaults.into_iter().collect();
        Self {
            values: defaults.clone(),
            defaults,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new([])
    }

    pub(crate) fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    /// Merges a single value. Unknown keys are ignored (the shape is fixed);
    /// the return value reports whether the key existed.
    pub(crate) fn set(&mut self, key: &str, value: FilterValue) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Merges several values at once; keys not present in `entries` are
    /// untouched, unknown keys are ignored.
    pub(crate) fn set_many(
        &mut self,
        entries: impl IntoIterator<Item = (&'static str, FilterValue)>,
    ) {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Parses and merges raw command-line text into the named filter.
    /// Returns `false` for unknown keys or unparseable values.
    pub(crate) fn set_parsed(&mut self, key: &str, raw: &str) -> bool {
        let Some(current) = self.values.get(key) else {
            return false;
        };
        match current.parsed(raw) {
            Some(value) => self.set(key, value),
            None => false,
        }
    }

    /// Disengages every filter, replacing each value with its type's cleared
    /// representation.
    pub(crate) fn clear_all(&mut self) {
        for value in self.values.values_mut() {
            *value = value.cleared();
        }
    }

    /// Restores the exact defaults supplied at construction. Distinct from
    /// [`clear_all`](Self::clear_all): defaults may be engaged filters.
    pub(crate) fn reset(&mut self) {
        self.values = self.defaults.clone();
    }

    /// The filters that actually constrain the query.
    pub(crate) fn engaged(&self) -> impl Iterator<Item = (&'static str, &FilterValue)> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_cleared())
            .map(|(key, value)| (*key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FilterSet {
        FilterSet::new([
            ("status", FilterValue::text("pending")),
            ("min_rating", FilterValue::Number(None)),
            ("banned", FilterValue::Flag(None)),
        ])
    }

    #[test]
    fn test_set_changes_only_the_named_key() {
        let mut filters = sample();
        filters.set("banned", FilterValue::Flag(Some(true)));

        assert_eq!(filters.get("banned"), Some(&FilterValue::Flag(Some(true))));
        assert_eq!(filters.get("status"), Some(&FilterValue::text("pending")));
        assert_eq!(filters.get("min_rating"), Some(&FilterValue::Number(None)));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut filters = sample();
        assert!(!filters.set("no_such_filter", FilterValue::text("x")));
        assert!(!filters.set_parsed("no_such_filter", "x"));
        assert_eq!(filters.engaged().count(), 1);
    }

    #[test]
    fn test_set_many_is_a_shallow_merge() {
        let mut filters = sample();
        filters.set_many([
            ("status", FilterValue::text("approved")),
            ("min_rating", FilterValue::Number(Some(1800))),
        ]);

        assert_eq!(filters.get("status"), Some(&FilterValue::text("approved")));
        assert_eq!(
            filters.get("min_rating"),
            Some(&FilterValue::Number(Some(1800)))
        );
        // Untouched key keeps its prior value.
        assert_eq!(filters.get("banned"), Some(&FilterValue::Flag(None)));
    }

    #[test]
    fn test_clear_all_uses_the_typed_cleared_representation() {
        let mut filters = sample();
        filters.set("min_rating", FilterValue::Number(Some(1800)));
        filters.set("banned", FilterValue::Flag(Some(false)));

        filters.clear_all();
        assert_eq!(filters.get("status"), Some(&FilterValue::Text(String::new())));
        assert_eq!(filters.get("min_rating"), Some(&FilterValue::Number(None)));
        assert_eq!(filters.get("banned"), Some(&FilterValue::Flag(None)));
        assert_eq!(filters.engaged().count(), 0);
    }

    #[test]
    fn test_reset_restores_the_exact_defaults() {
        let mut filters = sample();
        filters.set("status", FilterValue::text("rejected"));
        filters.set("banned", FilterValue::Flag(Some(true)));
        filters.clear_all();

        filters.reset();
        assert_eq!(filters, sample());
    }

    #[test]
    fn test_engaged_skips_cleared_values() {
        let mut filters = sample();
        filters.set("banned", FilterValue::Flag(Some(false)));

        let engaged: Vec<_> = filters.engaged().collect();
        assert_eq!(
            engaged,
            vec![
                ("banned", &FilterValue::Flag(Some(false))),
                ("status", &FilterValue::text("pending")),
            ]
        );
    }

    #[test]
    fn test_parsed_respects_the_slot_type() {
        let mut filters = sample();

        assert!(filters.set_parsed("min_rating", "2000"));
        assert_eq!(
            filters.get("min_rating"),
            Some(&FilterValue::Number(Some(2000)))
        );
        assert!(!filters.set_parsed("min_rating", "lots"));

        assert!(filters.set_parsed("banned", "yes"));
        assert_eq!(filters.get("banned"), Some(&FilterValue::Flag(Some(true))));
        assert!(!filters.set_parsed("banned", "maybe"));

        // A dash disengages whatever the type.
        assert!(filters.set_parsed("banned", "-"));
        assert_eq!(filters.get("banned"), Some(&FilterValue::Flag(None)));
    }
}
