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

//! Records and fields
//!
//! A record is a collection of named fields. Fields store their value in the
//! canonical encoded form so the same bytes flow into secondary indexes
//! without re-encoding. Field absence is distinguishable from any encoded
//! value and is never an error.

use serde::{Deserialize, Serialize};

use crate::value::{Value, ValueType};
use crate::Result;

/// A named, typed, encoded scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: ValueType,
    /// Canonical order-preserving encoding of the value
    pub data: Vec<u8>,
}

impl Field {
    /// Create a field from a decoded value
    pub fn new(name: impl Into<String>, value: &Value) -> Self {
        Self {
            name: name.into(),
            ty: value.value_type(),
            data: value.encode(),
        }
    }

    pub fn int64(name: impl Into<String>, v: i64) -> Self {
        Self::new(name, &Value::Int64(v))
    }

    pub fn uint64(name: impl Into<String>, v: u64) -> Self {
        Self::new(name, &Value::Uint64(v))
    }

    pub fn float32(name: impl Into<String>, v: f32) -> Self {
        Self::new(name, &Value::Float32(v))
    }

    pub fn float64(name: impl Into<String>, v: f64) -> Self {
        Self::new(name, &Value::Float64(v))
    }

    pub fn bytes(name: impl Into<String>, v: impl Into<Vec<u8>>) -> Self {
        Self::new(name, &Value::Bytes(v.into()))
    }

    /// Text sugar over [`Field::bytes`]
    pub fn text(name: impl Into<String>, v: &str) -> Self {
        Self::bytes(name, v.as_bytes().to_vec())
    }

    /// Decode the stored bytes back into a value
    pub fn decode(&self) -> Result<Value> {
        Value::decode(self.ty, &self.data)
    }
}

/// Read access to a record's fields
pub trait Record {
    /// Look up a field by name; `None` means the field is absent
    fn field(&self, name: &str) -> Option<&Field>;

    /// Visit every field in record order; the callback returns false to stop
    fn iterate(&self, f: &mut dyn FnMut(&Field) -> bool);
}

/// Growable list of fields, the standard in-memory record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldBuffer {
    fields: Vec<Field>,
}

impl FieldBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing any existing field of the same name
    pub fn add(&mut self, field: Field) -> &mut Self {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl Record for FieldBuffer {
    fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn iterate(&self, f: &mut dyn FnMut(&Field) -> bool) {
        for field in &self.fields {
            if !f(field) {
                return;
            }
        }
    }
}

impl FromIterator<Field> for FieldBuffer {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        let mut buf = FieldBuffer::new();
        for field in iter {
            buf.add(field);
        }
        buf
    }
}
