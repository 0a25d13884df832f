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

//! Secondary indexes
//!
//! An index is an ordered multimap from an encoded field value to the row
//! ids of the records carrying that value. Iteration order is ascending or
//! descending byte-lexicographic on the encoded key, which matches the
//! source type's natural order under the core codec.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use siltdb_core::Result;

/// Ordered key to row-id multimap over encoded field values
///
/// Iteration callbacks receive `(key, rowid)` and return true to continue.
/// The iteration methods return `Result` so a disk-backed implementation can
/// surface I/O failures; the in-memory index never fails.
pub trait Index {
    /// Associate a row id with an encoded value. Non-unique: a key can hold
    /// many row ids, and duplicate pairs coalesce.
    fn set(&mut self, value: &[u8], rowid: &[u8]) -> Result<()>;

    /// Remove one `(value, rowid)` pair if present
    fn delete(&mut self, value: &[u8], rowid: &[u8]) -> Result<()>;

    /// Visit every entry in ascending key order
    fn ascend(&self, f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()>;

    /// Visit entries with key >= pivot in ascending key order
    fn ascend_from(&self, pivot: &[u8], f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()>;

    /// Visit entries with key <= pivot in descending key order
    fn descend_from(&self, pivot: &[u8], f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()>;
}

/// In-memory [`Index`] backed by an ordered map of row-id sets
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    entries: BTreeMap<Vec<u8>, BTreeSet<Vec<u8>>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index for MemoryIndex {
    fn set(&mut self, value: &[u8], rowid: &[u8]) -> Result<()> {
        self.entries
            .entry(value.to_vec())
            .or_default()
            .insert(rowid.to_vec());
        Ok(())
    }

    fn delete(&mut self, value: &[u8], rowid: &[u8]) -> Result<()> {
        if let Some(rowids) = self.entries.get_mut(value) {
            rowids.remove(rowid);
            if rowids.is_empty() {
                self.entries.remove(value);
            }
        }
        Ok(())
    }

    fn ascend(&self, f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()> {
        for (key, rowids) in &self.entries {
            for rowid in rowids {
                if !f(key, rowid) {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn ascend_from(&self, pivot: &[u8], f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()> {
        for (key, rowids) in self
            .entries
            .range::<[u8], _>((Bound::Included(pivot), Bound::Unbounded))
        {
            for rowid in rowids {
                if !f(key, rowid) {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn descend_from(&self, pivot: &[u8], f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()> {
        for (key, rowids) in self
            .entries
            .range::<[u8], _>((Bound::Unbounded, Bound::Included(pivot)))
            .rev()
        {
            for rowid in rowids {
                if !f(key, rowid) {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}
