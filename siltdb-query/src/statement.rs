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

//! Statement builders
//!
//! Fluent `Select` / `Insert` / `Delete` statements executed against a
//! database guard. Filtered statements share one execution bridge: try the
//! index path first (`match_index` over the table's index map), and fall
//! back to a full scan driving per-record evaluation when the predicate is
//! not index-backed.

use std::fmt::Write as _;

use tracing::debug;

use siltdb_core::{Error, Field, FieldBuffer, Record, Result, Value};
use siltdb_storage::{Index, ReadTxn, TableData, TableRead, WriteTxn};

use crate::matcher::{IndexMap, Matcher};

/// Field projection of a select statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// Every field of the record, in record order
    #[default]
    All,
    /// The named fields, in the given order; absent fields are skipped
    Fields(Vec<String>),
}

impl Projection {
    fn apply(&self, record: &FieldBuffer) -> FieldBuffer {
        match self {
            Projection::All => record.clone(),
            Projection::Fields(names) => names
                .iter()
                .filter_map(|name| record.field(name).cloned())
                .collect(),
        }
    }
}

/// Rows produced by a select statement
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    rows: Vec<FieldBuffer>,
}

impl QueryResult {
    pub fn rows(&self) -> &[FieldBuffer] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render rows as comma-separated decoded values, one line per row
    pub fn to_csv(&self) -> Result<String> {
        let mut out = String::new();
        for row in &self.rows {
            for (i, field) in row.fields().iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let value = field.decode()?;
                let _ = write!(out, "{}", value);
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// Borrow a table's indexes as a field-to-index map for `match_index`
pub fn index_map(table: &TableData) -> IndexMap<'_> {
    table
        .indexes()
        .iter()
        .map(|(field, index)| (field.clone(), index as &dyn Index))
        .collect()
}

/// Collect `(rowid, record)` pairs satisfying the filter, in row-id order
///
/// The index path is trusted without re-verification: every id in a `Some`
/// candidate set satisfies the predicate by construction.
fn collect_matching(
    table: &TableData,
    filter: Option<&dyn Matcher>,
) -> Result<Vec<(Vec<u8>, FieldBuffer)>> {
    let mut out = Vec::new();

    let filter = match filter {
        Some(f) => f,
        None => {
            table.records().iterate(&mut |rowid, record| {
                out.push((rowid.to_vec(), record.clone()));
                true
            })?;
            return Ok(out);
        }
    };

    let indexes = index_map(table);
    if let Some(set) = filter.match_index(&indexes)? {
        debug!(candidates = set.len(), "filter is index-backed");
        for rowid in set.iter() {
            let record = table.records().record(rowid)?;
            out.push((rowid.to_vec(), record));
        }
        return Ok(out);
    }

    debug!("filter is not index-backed, falling back to table scan");
    let mut first_err: Option<Error> = None;
    table.records().iterate(&mut |rowid, record| {
        match filter.matches(record) {
            Ok(true) => {
                out.push((rowid.to_vec(), record.clone()));
                true
            }
            Ok(false) => true,
            Err(e) => {
                first_err = Some(e);
                false
            }
        }
    })?;
    if let Some(e) = first_err {
        return Err(e);
    }
    Ok(out)
}

/// `SELECT fields FROM table WHERE filter LIMIT n OFFSET m`
#[derive(Default)]
pub struct Select {
    projection: Projection,
    table: Option<String>,
    filter: Option<Box<dyn Matcher>>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.projection = Projection::Fields(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn filter(mut self, matcher: impl Matcher + 'static) -> Self {
        self.filter = Some(Box::new(matcher));
        self
    }

    pub fn filter_boxed(mut self, matcher: Box<dyn Matcher>) -> Self {
        self.filter = Some(matcher);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn run(&self, txn: &ReadTxn<'_>) -> Result<QueryResult> {
        let table_name = self
            .table
            .as_deref()
            .ok_or_else(|| Error::InvalidArgument("select requires a table".into()))?;
        let table = txn.table(table_name)?;

        let matching = collect_matching(table, self.filter.as_deref())?;
        let rows = matching
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .map(|(_, record)| self.projection.apply(&record))
            .collect();

        Ok(QueryResult { rows })
    }
}

/// `INSERT INTO table (fields) VALUES (...), (...)`
#[derive(Debug, Clone, Default)]
pub struct Insert {
    table: Option<String>,
    fields: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Insert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn fields(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Append one row of values, one per declared field
    pub fn values(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.rows.push(values.into_iter().collect());
        self
    }

    /// Insert every row, returning the assigned row ids
    pub fn run(&self, txn: &mut WriteTxn<'_>) -> Result<Vec<Vec<u8>>> {
        let table_name = self
            .table
            .as_deref()
            .ok_or_else(|| Error::InvalidArgument("insert requires a table".into()))?;

        let mut rowids = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            if row.len() != self.fields.len() {
                return Err(Error::InvalidArgument(format!(
                    "{} fields but {} values",
                    self.fields.len(),
                    row.len()
                )));
            }
            let record: FieldBuffer = self
                .fields
                .iter()
                .zip(row)
                .map(|(name, value)| Field::new(name.clone(), value))
                .collect();
            let table = txn.table_mut(table_name)?;
            rowids.push(table.insert(record)?);
        }
        Ok(rowids)
    }
}

/// `DELETE FROM table WHERE filter`
#[derive(Default)]
pub struct Delete {
    table: Option<String>,
    filter: Option<Box<dyn Matcher>>,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn filter(mut self, matcher: impl Matcher + 'static) -> Self {
        self.filter = Some(Box::new(matcher));
        self
    }

    pub fn filter_boxed(mut self, matcher: Box<dyn Matcher>) -> Self {
        self.filter = Some(matcher);
        self
    }

    /// Delete matching records, returning how many were removed
    pub fn run(&self, txn: &mut WriteTxn<'_>) -> Result<usize> {
        let table_name = self
            .table
            .as_deref()
            .ok_or_else(|| Error::InvalidArgument("delete requires a table".into()))?;

        let rowids: Vec<Vec<u8>> = {
            let table = txn.table(table_name)?;
            collect_matching(table, self.filter.as_deref())?
                .into_iter()
                .map(|(rowid, _)| rowid)
                .collect()
        };

        let table = txn.table_mut(table_name)?;
        for rowid in &rowids {
            table.delete(rowid)?;
        }
        debug!(table = table_name, deleted = rowids.len(), "delete");
        Ok(rowids.len())
    }
}
