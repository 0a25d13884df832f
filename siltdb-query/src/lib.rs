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

//! SiltDB Query
//!
//! The query layer of the SiltDB engine. Its centerpiece is the matcher
//! core: immutable predicate trees that evaluate two ways from one
//! structure.
//!
//! - [`Matcher::matches`] answers "does this record satisfy the predicate"
//! - [`Matcher::match_index`] collapses the predicate into ordered row-id
//!   set algebra over secondary indexes: range scans at the leaves,
//!   intersection for `And`, union for `Or`, and a structural `None` when a
//!   branch is not index-backed so callers can fall back to a scan
//!
//! On top of the matcher sit the fluent statement builders
//! ([`Select`](statement::Select), [`Insert`](statement::Insert),
//! [`Delete`](statement::Delete)) and a small SQL surface ([`sql`]).
//!
//! # Example
//!
//! ```
//! use siltdb_query::field::int_field;
//! use siltdb_query::matcher::{and, Matcher};
//! use siltdb_core::{Field, FieldBuffer};
//!
//! let adult = and(vec![
//!     Box::new(int_field("age").gte(18)),
//!     Box::new(int_field("age").lt(100)),
//! ]);
//!
//! let mut record = FieldBuffer::new();
//! record.add(Field::int64("age", 36));
//! assert!(adult.matches(&record).unwrap());
//! ```

pub mod field;
pub mod matcher;
pub mod rowid_set;
pub mod scan;
pub mod sql;
pub mod statement;

pub use field::{
    bytes_field, field, float32_field, float_field, int_field, string_field, uint_field,
    FieldSelector,
};
pub use matcher::{
    and, eq_bytes, eq_f32, eq_f64, eq_int, eq_str, eq_uint, gt_bytes, gt_f32, gt_f64, gt_int,
    gt_str, gt_uint, gte_bytes, gte_f32, gte_f64, gte_int, gte_str, gte_uint, lt_bytes, lt_f32,
    lt_f64, lt_int, lt_str, lt_uint, lte_bytes, lte_f32, lte_f64, lte_int, lte_str, lte_uint, or,
    And, CmpMatcher, CmpOp, IndexMap, Matcher, Or,
};
pub use rowid_set::RowIdSet;
pub use scan::scan;
pub use statement::{Delete, Insert, Projection, QueryResult, Select};
