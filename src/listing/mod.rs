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

//! List-state management shared by every table view.
//!
//! Three independent primitives — [`Pagination`], [`Sorting`], and
//! [`FilterSet`] — composed behind the [`ListQuery`] facade, which owns the
//! rules that tie them together (filter, sort, and search changes return to
//! page 1), debounces free-text search, and stamps fetches with generations
//! so stale responses can be dropped.
//!
//! None of these types perform I/O; they are synchronous state containers.
//! The data source consumes the [`ListRequest`] snapshots they produce and
//! answers with a [`Page`] of rows plus the authoritative total count.

mod filter;
mod pagination;
mod query;
mod sorting;

pub(crate) use filter::{FilterSet, FilterValue};
pub(crate) use pagination::Pagination;
pub(crate) use query::{ListQuery, ListRequest, Page};
pub(crate) use sorting::{SortOrder, Sorting};
