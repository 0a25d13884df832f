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

//! SQL surface
//!
//! Parses `;`-separated SQL text and runs each statement against a
//! [`Database`] through the statement builders.
//!
//! # Example
//!
//! ```
//! use siltdb_query::sql;
//! use siltdb_storage::Database;
//!
//! let db = Database::new();
//! sql::execute(&db, "CREATE TABLE players").unwrap();
//! sql::execute(&db, "INSERT INTO players (name, age) VALUES ('ada', 36)").unwrap();
//! let result = sql::query(&db, "SELECT name FROM players WHERE age >= 18").unwrap();
//! assert_eq!(result.len(), 1);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{SqlError, SqlResult};
pub use lexer::Lexer;
pub use parser::{Expr, Parser, Statement};
pub use token::{Span, Token, TokenKind};

use tracing::debug;

use siltdb_core::{Error, Result};
use siltdb_storage::Database;

use crate::statement::{Delete, Insert, QueryResult, Select};

/// Outcome of one executed statement
#[derive(Debug, Clone)]
pub enum ExecutionResult {
    /// A select produced rows
    Rows(QueryResult),
    /// A mutation affected this many rows
    RowsAffected(usize),
    /// A DDL statement completed
    Ok,
}

impl ExecutionResult {
    pub fn rows(&self) -> Option<&QueryResult> {
        match self {
            ExecutionResult::Rows(result) => Some(result),
            _ => None,
        }
    }

    pub fn rows_affected(&self) -> usize {
        match self {
            ExecutionResult::RowsAffected(n) => *n,
            ExecutionResult::Rows(result) => result.len(),
            ExecutionResult::Ok => 0,
        }
    }
}

/// Parse and run every statement in `input`, in order
pub fn execute(db: &Database, input: &str) -> Result<Vec<ExecutionResult>> {
    let statements = Parser::parse(input)?;
    let mut results = Vec::with_capacity(statements.len());
    for statement in statements {
        results.push(run(db, statement)?);
    }
    Ok(results)
}

/// Run a single select-style input and return its rows
///
/// Errors unless the input holds exactly one statement and that statement
/// produces rows.
pub fn query(db: &Database, input: &str) -> Result<QueryResult> {
    let mut results = execute(db, input)?;
    if results.len() != 1 {
        return Err(Error::InvalidArgument(format!(
            "expected one statement, got {}",
            results.len()
        )));
    }
    match results.pop() {
        Some(ExecutionResult::Rows(result)) => Ok(result),
        _ => Err(Error::InvalidArgument(
            "statement does not produce rows".into(),
        )),
    }
}

fn run(db: &Database, statement: Statement) -> Result<ExecutionResult> {
    match statement {
        Statement::CreateTable { name } => {
            db.create_table(&name)?;
            Ok(ExecutionResult::Ok)
        }
        Statement::CreateIndex { name, table, field } => {
            debug!(index = name.as_str(), table = table.as_str(), field = field.as_str(), "create index");
            db.create_index(&table, &field)?;
            Ok(ExecutionResult::Ok)
        }
        Statement::Insert {
            table,
            fields,
            rows,
        } => {
            let mut insert = Insert::new().into(table).fields(fields);
            for row in rows {
                insert = insert.values(row);
            }
            let mut txn = db.write();
            let rowids = insert.run(&mut txn)?;
            Ok(ExecutionResult::RowsAffected(rowids.len()))
        }
        Statement::Select {
            projection,
            table,
            filter,
            limit,
            offset,
        } => {
            let mut select = Select::new().from(table).projection(projection);
            if let Some(expr) = filter {
                select = select.filter_boxed(expr.into_matcher());
            }
            if let Some(n) = limit {
                select = select.limit(n as usize);
            }
            if let Some(n) = offset {
                select = select.offset(n as usize);
            }
            let txn = db.read();
            Ok(ExecutionResult::Rows(select.run(&txn)?))
        }
        Statement::Delete { table, filter } => {
            let mut delete = Delete::new().from(table);
            if let Some(expr) = filter {
                delete = delete.filter_boxed(expr.into_matcher());
            }
            let mut txn = db.write();
            Ok(ExecutionResult::RowsAffected(delete.run(&mut txn)?))
        }
    }
}
