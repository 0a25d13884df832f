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

//! SQL lexer
//!
//! Converts SQL text into a stream of tokens: string literals in single
//! quotes (doubled quote escapes), integer and float numbers, identifiers,
//! keywords and operators.

use std::iter::Peekable;
use std::str::Chars;

use super::error::{SqlError, SqlResult};
use super::token::{Span, Token, TokenKind};

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire input, appending a trailing Eof token
    pub fn tokenize(mut self) -> SqlResult<Vec<Token>> {
        while let Some(&c) = self.chars.peek() {
            let span = self.span();
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                ',' => self.punct(TokenKind::Comma),
                '(' => self.punct(TokenKind::LParen),
                ')' => self.punct(TokenKind::RParen),
                ';' => self.punct(TokenKind::Semicolon),
                '*' => self.punct(TokenKind::Star),
                '=' => self.punct(TokenKind::Eq),
                '>' => {
                    self.advance();
                    if self.chars.peek() == Some(&'=') {
                        self.advance();
                        self.tokens.push(Token::new(TokenKind::Gte, span));
                    } else {
                        self.tokens.push(Token::new(TokenKind::Gt, span));
                    }
                }
                '<' => {
                    self.advance();
                    if self.chars.peek() == Some(&'=') {
                        self.advance();
                        self.tokens.push(Token::new(TokenKind::Lte, span));
                    } else {
                        self.tokens.push(Token::new(TokenKind::Lt, span));
                    }
                }
                '\'' => self.string(span)?,
                '-' => {
                    self.advance();
                    match self.chars.peek() {
                        Some(d) if d.is_ascii_digit() => self.number(span, true)?,
                        _ => return Err(SqlError::lex("unexpected character '-'", span)),
                    }
                }
                c if c.is_ascii_digit() => self.number(span, false)?,
                c if c.is_alphabetic() || c == '_' => self.ident(span),
                c => return Err(SqlError::lex(format!("unexpected character '{}'", c), span)),
            }
        }

        self.tokens.push(Token::new(TokenKind::Eof, self.span()));
        Ok(self.tokens)
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn punct(&mut self, kind: TokenKind) {
        let span = self.span();
        self.advance();
        self.tokens.push(Token::new(kind, span));
    }

    fn string(&mut self, span: Span) -> SqlResult<()> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('\'') => {
                    // doubled quote is an escaped quote
                    if self.chars.peek() == Some(&'\'') {
                        self.advance();
                        value.push('\'');
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return Err(SqlError::lex("unterminated string literal", span)),
            }
        }
        self.tokens.push(Token::new(TokenKind::Str(value), span));
        Ok(())
    }

    fn number(&mut self, span: Span, negative: bool) -> SqlResult<()> {
        let mut text = String::new();
        if negative {
            text.push('-');
        }
        let mut is_float = false;
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else if c == '.' && !is_float {
                is_float = true;
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_float {
            TokenKind::Float(
                text.parse()
                    .map_err(|_| SqlError::lex(format!("invalid number '{}'", text), span))?,
            )
        } else {
            TokenKind::Integer(
                text.parse()
                    .map_err(|_| SqlError::lex(format!("invalid number '{}'", text), span))?,
            )
        };
        self.tokens.push(Token::new(kind, span));
        Ok(())
    }

    fn ident(&mut self, span: Span) {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Ident(text));
        self.tokens.push(Token::new(kind, span));
    }
}
