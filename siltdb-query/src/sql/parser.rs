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

//! SQL parser
//!
//! Recursive descent over the token stream. The WHERE grammar is the
//! predicate algebra of the matcher core: comparisons at the leaves, AND
//! binding tighter than OR, parentheses for grouping. `LIMIT` must come
//! before `OFFSET`; the reverse order is rejected here, at parse time.

use siltdb_core::Value;

use super::error::{SqlError, SqlResult};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::field::FieldSelector;
use crate::matcher::{and, or, CmpMatcher, CmpOp, Matcher};
use crate::statement::Projection;

/// A parsed statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable {
        name: String,
    },
    CreateIndex {
        name: String,
        table: String,
        field: String,
    },
    Insert {
        table: String,
        fields: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    Select {
        projection: Projection,
        table: String,
        filter: Option<Expr>,
        limit: Option<u64>,
        offset: Option<u64>,
    },
    Delete {
        table: String,
        filter: Option<Expr>,
    },
}

/// A parsed WHERE expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Cmp {
        field: String,
        op: CmpOp,
        value: Value,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    /// Lower the expression into a predicate tree
    pub fn into_matcher(self) -> Box<dyn Matcher> {
        match self {
            Expr::Cmp { field, op, value } => {
                Box::new(CmpMatcher::new(FieldSelector::new(field), op, value))
            }
            Expr::And(children) => Box::new(and(children
                .into_iter()
                .map(Expr::into_matcher)
                .collect())),
            Expr::Or(children) => Box::new(or(children
                .into_iter()
                .map(Expr::into_matcher)
                .collect())),
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Parse a `;`-separated sequence of statements
    pub fn parse(input: &str) -> SqlResult<Vec<Statement>> {
        let tokens = Lexer::new(input).tokenize()?;
        let mut parser = Parser { tokens, pos: 0 };
        let mut statements = Vec::new();

        loop {
            while parser.eat(&TokenKind::Semicolon) {}
            if parser.check(&TokenKind::Eof) {
                break;
            }
            statements.push(parser.statement()?);
            if !parser.check(&TokenKind::Semicolon) && !parser.check(&TokenKind::Eof) {
                return Err(parser.unexpected("';' or end of input"));
            }
        }

        Ok(statements)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    fn expect(&mut self, kind: TokenKind) -> SqlResult<Token> {
        if self.check(&kind) {
            return Ok(self.advance());
        }
        Err(self.unexpected(&format!("'{}'", kind)))
    }

    fn unexpected(&self, expected: &str) -> SqlError {
        let token = self.peek();
        SqlError::parse(
            format!("expected {}, found {}", expected, token.kind),
            token.span,
        )
    }

    fn ident(&mut self, what: &str) -> SqlResult<String> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn statement(&mut self) -> SqlResult<Statement> {
        match self.peek().kind {
            TokenKind::Select => self.select(),
            TokenKind::Insert => self.insert(),
            TokenKind::Delete => self.delete(),
            TokenKind::Create => self.create(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    fn select(&mut self) -> SqlResult<Statement> {
        self.advance();

        let projection = if self.eat(&TokenKind::Star) {
            Projection::All
        } else {
            let mut fields = vec![self.ident("a field name or '*'")?];
            while self.eat(&TokenKind::Comma) {
                fields.push(self.ident("a field name")?);
            }
            Projection::Fields(fields)
        };

        self.expect(TokenKind::From)?;
        let table = self.ident("a table name")?;

        let filter = if self.eat(&TokenKind::Where) {
            Some(self.expr()?)
        } else {
            None
        };

        let mut limit = None;
        let mut offset = None;
        if self.eat(&TokenKind::Limit) {
            limit = Some(self.unsigned()?);
            if self.eat(&TokenKind::Offset) {
                offset = Some(self.unsigned()?);
            }
        } else if self.eat(&TokenKind::Offset) {
            offset = Some(self.unsigned()?);
            if self.check(&TokenKind::Limit) {
                return Err(SqlError::parse(
                    "LIMIT must come before OFFSET",
                    self.peek().span,
                ));
            }
        }

        Ok(Statement::Select {
            projection,
            table,
            filter,
            limit,
            offset,
        })
    }

    fn insert(&mut self) -> SqlResult<Statement> {
        self.advance();
        self.expect(TokenKind::Into)?;
        let table = self.ident("a table name")?;

        self.expect(TokenKind::LParen)?;
        let mut fields = vec![self.ident("a field name")?];
        while self.eat(&TokenKind::Comma) {
            fields.push(self.ident("a field name")?);
        }
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::Values)?;
        let mut rows = vec![self.value_row()?];
        while self.eat(&TokenKind::Comma) {
            rows.push(self.value_row()?);
        }

        Ok(Statement::Insert {
            table,
            fields,
            rows,
        })
    }

    fn value_row(&mut self) -> SqlResult<Vec<Value>> {
        self.expect(TokenKind::LParen)?;
        let mut row = vec![self.literal()?];
        while self.eat(&TokenKind::Comma) {
            row.push(self.literal()?);
        }
        self.expect(TokenKind::RParen)?;
        Ok(row)
    }

    fn delete(&mut self) -> SqlResult<Statement> {
        self.advance();
        self.expect(TokenKind::From)?;
        let table = self.ident("a table name")?;
        let filter = if self.eat(&TokenKind::Where) {
            Some(self.expr()?)
        } else {
            None
        };
        Ok(Statement::Delete { table, filter })
    }

    fn create(&mut self) -> SqlResult<Statement> {
        self.advance();
        if self.eat(&TokenKind::Table) {
            let name = self.ident("a table name")?;
            return Ok(Statement::CreateTable { name });
        }
        self.expect(TokenKind::Index)?;
        let name = self.ident("an index name")?;
        self.expect(TokenKind::On)?;
        let table = self.ident("a table name")?;
        self.expect(TokenKind::LParen)?;
        let field = self.ident("a field name")?;
        self.expect(TokenKind::RParen)?;
        Ok(Statement::CreateIndex { name, table, field })
    }

    fn expr(&mut self) -> SqlResult<Expr> {
        let mut children = vec![self.and_expr()?];
        while self.eat(&TokenKind::Or) {
            children.push(self.and_expr()?);
        }
        if children.len() == 1 {
            Ok(children.remove(0))
        } else {
            Ok(Expr::Or(children))
        }
    }

    fn and_expr(&mut self) -> SqlResult<Expr> {
        let mut children = vec![self.primary()?];
        while self.eat(&TokenKind::And) {
            children.push(self.primary()?);
        }
        if children.len() == 1 {
            Ok(children.remove(0))
        } else {
            Ok(Expr::And(children))
        }
    }

    fn primary(&mut self) -> SqlResult<Expr> {
        if self.eat(&TokenKind::LParen) {
            let expr = self.expr()?;
            self.expect(TokenKind::RParen)?;
            return Ok(expr);
        }

        let field = self.ident("a field name or '('")?;
        let op = match self.peek().kind {
            TokenKind::Eq => CmpOp::Eq,
            TokenKind::Gt => CmpOp::Gt,
            TokenKind::Gte => CmpOp::Gte,
            TokenKind::Lt => CmpOp::Lt,
            TokenKind::Lte => CmpOp::Lte,
            _ => return Err(self.unexpected("a comparison operator")),
        };
        self.advance();
        let value = self.literal()?;
        Ok(Expr::Cmp { field, op, value })
    }

    fn literal(&mut self) -> SqlResult<Value> {
        let value = match &self.peek().kind {
            TokenKind::Integer(v) => Value::Int64(*v),
            TokenKind::Float(v) => Value::Float64(*v),
            TokenKind::Str(s) => Value::Bytes(s.as_bytes().to_vec()),
            _ => return Err(self.unexpected("a literal")),
        };
        self.advance();
        Ok(value)
    }

    fn unsigned(&mut self) -> SqlResult<u64> {
        match self.peek().kind {
            TokenKind::Integer(v) if v >= 0 => {
                self.advance();
                Ok(v as u64)
            }
            _ => Err(self.unexpected("a non-negative integer")),
        }
    }
}
