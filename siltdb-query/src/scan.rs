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

//! Index range-scan adapter
//!
//! Translates `(operator, encoded key)` into an ordered walk over an
//! index's key space, collecting row ids. Keys are compared as raw bytes;
//! the order-preserving codec guarantees that byte order is value order, so
//! nothing here ever decodes. Each walk stops as soon as its inclusion rule
//! fails.

use siltdb_core::Result;
use siltdb_storage::Index;

use crate::matcher::CmpOp;
use crate::rowid_set::RowIdSet;

/// Collect the row ids of every index entry satisfying `key <op> pivot`
pub fn scan(index: &dyn Index, op: CmpOp, pivot: &[u8]) -> Result<RowIdSet> {
    let mut set = RowIdSet::new();
    match op {
        CmpOp::Eq => index.ascend_from(pivot, &mut |key, rowid| {
            if key != pivot {
                return false;
            }
            set.insert(rowid);
            true
        })?,
        CmpOp::Gt => index.ascend_from(pivot, &mut |key, rowid| {
            if key != pivot {
                set.insert(rowid);
            }
            true
        })?,
        CmpOp::Gte => index.ascend_from(pivot, &mut |_, rowid| {
            set.insert(rowid);
            true
        })?,
        CmpOp::Lt => index.ascend(&mut |key, rowid| {
            if key >= pivot {
                return false;
            }
            set.insert(rowid);
            true
        })?,
        CmpOp::Lte => index.ascend(&mut |key, rowid| {
            if key > pivot {
                return false;
            }
            set.insert(rowid);
            true
        })?,
    }
    Ok(set)
}
