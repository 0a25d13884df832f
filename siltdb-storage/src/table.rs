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

//! Tables
//!
//! A table is a group of records addressed by opaque row ids. Row ids are
//! assigned from a monotonic counter and encoded with the signed-integer
//! codec, so insertion order and row-id byte order agree.

use std::collections::BTreeMap;

use siltdb_core::value::encode_i64;
use siltdb_core::{Error, FieldBuffer, Result};

/// Read access to a table
pub trait TableRead {
    /// Visit every record in row-id order; the callback returns false to stop
    fn iterate(&self, f: &mut dyn FnMut(&[u8], &FieldBuffer) -> bool) -> Result<()>;

    /// Fetch one record by row id
    fn record(&self, rowid: &[u8]) -> Result<FieldBuffer>;
}

/// Write access to a table
pub trait TableWrite {
    /// Store a record, returning its assigned row id
    fn insert(&mut self, record: FieldBuffer) -> Result<Vec<u8>>;

    /// Remove a record by row id
    fn delete(&mut self, rowid: &[u8]) -> Result<()>;
}

/// In-memory table: an ordered map from row id to record
#[derive(Debug, Clone, Default)]
pub struct RecordBuffer {
    tree: BTreeMap<Vec<u8>, FieldBuffer>,
    counter: i64,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl TableRead for RecordBuffer {
    fn iterate(&self, f: &mut dyn FnMut(&[u8], &FieldBuffer) -> bool) -> Result<()> {
        for (rowid, record) in &self.tree {
            if !f(rowid, record) {
                return Ok(());
            }
        }
        Ok(())
    }

    fn record(&self, rowid: &[u8]) -> Result<FieldBuffer> {
        self.tree
            .get(rowid)
            .cloned()
            .ok_or(Error::RecordNotFound)
    }
}

impl TableWrite for RecordBuffer {
    fn insert(&mut self, record: FieldBuffer) -> Result<Vec<u8>> {
        self.counter += 1;
        let rowid = encode_i64(self.counter).to_vec();
        self.tree.insert(rowid.clone(), record);
        Ok(rowid)
    }

    fn delete(&mut self, rowid: &[u8]) -> Result<()> {
        self.tree
            .remove(rowid)
            .map(|_| ())
            .ok_or(Error::RecordNotFound)
    }
}
