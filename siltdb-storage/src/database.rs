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

//! Database container
//!
//! Named tables plus their secondary indexes behind a single reader-writer
//! lock. Readers share; writers exclude. Index maintenance happens inside
//! insert/delete so indexes and records can never drift apart. Callers must
//! hold a guard for the duration of any index evaluation, which upholds the
//! no-concurrent-mutation requirement of the query layer.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use siltdb_core::{Error, FieldBuffer, Record, Result};

use crate::index::{Index, MemoryIndex};
use crate::table::{RecordBuffer, TableRead, TableWrite};

/// One table and its per-field secondary indexes
#[derive(Debug, Clone, Default)]
pub struct TableData {
    records: RecordBuffer,
    indexes: HashMap<String, MemoryIndex>,
}

impl TableData {
    pub fn records(&self) -> &RecordBuffer {
        &self.records
    }

    /// Indexes keyed by the field they cover
    pub fn indexes(&self) -> &HashMap<String, MemoryIndex> {
        &self.indexes
    }

    /// Create an index over `field`, backfilled from existing records
    pub fn create_index(&mut self, field: &str) -> Result<()> {
        if self.indexes.contains_key(field) {
            return Err(Error::IndexAlreadyExists(field.to_string()));
        }

        let mut index = MemoryIndex::new();
        self.records.iterate(&mut |rowid, record| {
            if let Some(f) = record.field(field) {
                // MemoryIndex::set never fails
                let _ = index.set(&f.data, rowid);
            }
            true
        })?;

        self.indexes.insert(field.to_string(), index);
        Ok(())
    }

    /// Insert a record and register it with every covering index
    pub fn insert(&mut self, record: FieldBuffer) -> Result<Vec<u8>> {
        let rowid = self.records.insert(record)?;
        let record = self.records.record(&rowid)?;
        for (field, index) in &mut self.indexes {
            if let Some(f) = record.field(field) {
                index.set(&f.data, &rowid)?;
            }
        }
        Ok(rowid)
    }

    /// Delete a record and unregister it from every covering index
    pub fn delete(&mut self, rowid: &[u8]) -> Result<()> {
        let record = self.records.record(rowid)?;
        for (field, index) in &mut self.indexes {
            if let Some(f) = record.field(field) {
                index.delete(&f.data, rowid)?;
            }
        }
        self.records.delete(rowid)
    }
}

#[derive(Debug, Default)]
struct DbInner {
    tables: HashMap<String, TableData>,
}

/// Thread-safe collection of tables
///
/// Cloning is cheap and shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct Database {
    inner: Arc<RwLock<DbInner>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_table(&self, name: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.tables.contains_key(name) {
            return Err(Error::TableAlreadyExists(name.to_string()));
        }
        debug!(table = name, "create table");
        inner.tables.insert(name.to_string(), TableData::default());
        Ok(())
    }

    pub fn create_index(&self, table: &str, field: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let data = inner
            .tables
            .get_mut(table)
            .ok_or_else(|| Error::TableNotFound(table.to_string()))?;
        debug!(table, field, "create index");
        data.create_index(field)
    }

    /// Acquire shared read access
    pub fn read(&self) -> ReadTxn<'_> {
        ReadTxn {
            guard: self.inner.read(),
        }
    }

    /// Acquire exclusive write access
    pub fn write(&self) -> WriteTxn<'_> {
        WriteTxn {
            guard: self.inner.write(),
        }
    }
}

/// Shared view over the database's tables
pub struct ReadTxn<'a> {
    guard: RwLockReadGuard<'a, DbInner>,
}

impl ReadTxn<'_> {
    pub fn table(&self, name: &str) -> Result<&TableData> {
        self.guard
            .tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }
}

/// Exclusive view over the database's tables
pub struct WriteTxn<'a> {
    guard: RwLockWriteGuard<'a, DbInner>,
}

impl WriteTxn<'_> {
    pub fn table(&self, name: &str) -> Result<&TableData> {
        self.guard
            .tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut TableData> {
        self.guard
            .tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }
}
