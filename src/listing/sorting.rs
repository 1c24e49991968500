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

//! Single-column sort state with toggle-on-reselect.
//!
//! The manager is generic over the key type and performs no validation of
//! keys; the caller's column definitions are the source of truth for what is
//! sortable.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// The active sort key and direction. Exactly one key is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sorting<K> {
    sort_by: K,
    sort_order: SortOrder,

    initial_sort_by: K,
    initial_sort_order: SortOrder,
}

impl<K: Clone + PartialEq> Sorting<K> {
    pub(crate) fn new(initial_sort_by: K, initial_sort_order: SortOrder) -> Self {
        Self {
            sort_by: initial_sort_by.clone(),
            sort_order: initial_sort_order,
            initial_sort_by,
            initial_sort_order,
        }
    }

    pub(crate) fn sort_by(&self) -> &K {
        &self.sort_by
    }

    pub(crate) fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Selects a sort column the way a table header click does: reselecting
    /// the active key flips the direction, selecting a new key makes it
    /// active and resets the direction to ascending.
    pub(crate) fn handle_sort(&mut self, key: K) {
        if key == self.sort_by {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_by = key;
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Direct setter, bypassing the toggle semantics.
    pub(crate) fn set_sort_by(&mut self, key: K) {
        self.sort_by = key;
    }

    /// Direct setter, bypassing the toggle semantics.
    pub(crate) fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub(crate) fn reset(&mut self) {
        self.sort_by = self.initial_sort_by.clone();
        self.sort_order = self.initial_sort_order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_a_new_column_sorts_ascending() {
        let mut sorting = Sorting::new("created", SortOrder::Desc);

        sorting.handle_sort("handle");
        assert_eq!(*sorting.sort_by(), "handle");
        assert_eq!(sorting.sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_reselecting_the_active_column_flips_direction() {
        let mut sorting = Sorting::new("created", SortOrder::Desc);
        sorting.handle_sort("handle");

        sorting.handle_sort("handle");
        assert_eq!(*sorting.sort_by(), "handle");
        assert_eq!(sorting.sort_order(), SortOrder::Desc);

        sorting.handle_sort("handle");
        assert_eq!(sorting.sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_switching_columns_resets_direction_to_ascending() {
        let mut sorting = Sorting::new("created", SortOrder::Asc);
        sorting.handle_sort("handle");
        sorting.handle_sort("handle");
        assert_eq!(sorting.sort_order(), SortOrder::Desc);

        sorting.handle_sort("rating");
        assert_eq!(*sorting.sort_by(), "rating");
        assert_eq!(sorting.sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_direct_setters_bypass_the_toggle() {
        let mut sorting = Sorting::new("created".to_string(), SortOrder::Asc);

        sorting.set_sort_by("rating".to_string());
        sorting.set_sort_order(SortOrder::Desc);
        assert_eq!(sorting.sort_by(), "rating");
        assert_eq!(sorting.sort_order(), SortOrder::Desc);

        // Setting the same key directly must not flip the direction.
        sorting.set_sort_by("rating".to_string());
        assert_eq!(sorting.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_reset_restores_construction_defaults() {
        let mut sorting = Sorting::new("created", SortOrder::Desc);
        sorting.handle_sort("handle");
        sorting.handle_sort("rating");

        sorting.reset();
        assert_eq!(*sorting.sort_by(), "created");
        assert_eq!(sorting.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_sort_order_round_trip() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("sideways"), None);
        assert_eq!(SortOrder::Asc.toggled().as_str(), "desc");
    }
}
