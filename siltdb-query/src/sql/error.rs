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

//! SQL-specific error types

use thiserror::Error;

use super::token::Span;

/// Errors produced while lexing or parsing SQL text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqlError {
    #[error("lex error at line {line}, column {column}: {message}")]
    Lex {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },
}

impl SqlError {
    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        SqlError::Lex {
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }

    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        SqlError::Parse {
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }
}

impl From<SqlError> for siltdb_core::Error {
    fn from(e: SqlError) -> Self {
        siltdb_core::Error::Sql(e.to_string())
    }
}

pub type SqlResult<T> = std::result::Result<T, SqlError>;
