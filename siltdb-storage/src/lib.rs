// SPDX-License-Identifier: AGPL-3.0-or-later
// SiltDB - Embedded Relational Database Engine
// Copyright (C) 2026 Sushanth Reddy Vanagala (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! SiltDB Storage
//!
//! In-memory storage primitives for the SiltDB engine:
//!
//! - [`Index`]: ordered value-to-rowid multimap with range iteration
//! - [`TableRead`] / [`TableWrite`]: the table contract, implemented by the
//!   in-memory [`RecordBuffer`]
//! - [`Database`]: named tables plus their indexes behind one RwLock
//!
//! The query layer consumes these through their traits; nothing here knows
//! about predicates or SQL.

pub mod database;
pub mod index;
pub mod table;

pub use database::{Database, ReadTxn, TableData, WriteTxn};
pub use index::{Index, MemoryIndex};
pub use table::{RecordBuffer, TableRead, TableWrite};
