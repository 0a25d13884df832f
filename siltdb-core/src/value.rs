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

//! Scalar values and their order-preserving binary codec
//!
//! Every scalar type SiltDB can index has a canonical encoding whose
//! byte-lexicographic order matches the natural order of the source type.
//! Index range scans compare encoded keys directly and never decode.
//!
//! | Type | Encoding |
//! |------|----------|
//! | `u64` | big-endian |
//! | `i64` | big-endian, sign bit flipped |
//! | `f32`/`f64` | IEEE bits; negative values fully inverted, positive values get the sign bit set |
//! | bytes | identity |

use std::cmp::Ordering;
use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};

/// Type tag for an encoded scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Int64,
    Uint64,
    Float32,
    Float64,
    /// Raw bytes, also used for text
    Bytes,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Int64 => write!(f, "int64"),
            ValueType::Uint64 => write!(f, "uint64"),
            ValueType::Float32 => write!(f, "float32"),
            ValueType::Float64 => write!(f, "float64"),
            ValueType::Bytes => write!(f, "bytes"),
        }
    }
}

/// A decoded scalar value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int64(i64),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int64(_) => ValueType::Int64,
            Value::Uint64(_) => ValueType::Uint64,
            Value::Float32(_) => ValueType::Float32,
            Value::Float64(_) => ValueType::Float64,
            Value::Bytes(_) => ValueType::Bytes,
        }
    }

    /// Encode to the canonical order-preserving representation
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Value::Int64(v) => encode_i64(*v).to_vec(),
            Value::Uint64(v) => encode_u64(*v).to_vec(),
            Value::Float32(v) => encode_f32(*v).to_vec(),
            Value::Float64(v) => encode_f64(*v).to_vec(),
            Value::Bytes(b) => b.clone(),
        }
    }

    /// Decode from the canonical representation
    pub fn decode(ty: ValueType, data: &[u8]) -> crate::Result<Value> {
        match ty {
            ValueType::Int64 => decode_i64(data).map(Value::Int64),
            ValueType::Uint64 => decode_u64(data).map(Value::Uint64),
            ValueType::Float32 => decode_f32(data).map(Value::Float32),
            ValueType::Float64 => decode_f64(data).map(Value::Float64),
            ValueType::Bytes => Ok(Value::Bytes(data.to_vec())),
        }
    }

    /// Order two values of the same type
    ///
    /// Numeric types compare numerically, bytes lexicographically. Returns
    /// `None` when the types differ or a float comparison is undefined (NaN).
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
            (Value::Uint64(a), Value::Uint64(b)) => Some(a.cmp(b)),
            (Value::Float32(a), Value::Float32(b)) => a.partial_cmp(b),
            (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int64(v) => write!(f, "{}", v),
            Value::Uint64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

/// Encode an unsigned integer as big-endian bytes
pub fn encode_u64(v: u64) -> [u8; 8] {
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, v);
    buf
}

/// Encode a signed integer with the sign bit flipped so negative values
/// sort before positive ones
pub fn encode_i64(v: i64) -> [u8; 8] {
    encode_u64((v as u64) ^ (1 << 63))
}

/// Encode a 32-bit float: negative values are bitwise inverted, positive
/// values get the sign bit set
pub fn encode_f32(v: f32) -> [u8; 4] {
    let bits = v.to_bits();
    let mapped = if bits & (1 << 31) != 0 {
        !bits
    } else {
        bits | (1 << 31)
    };
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, mapped);
    buf
}

/// Encode a 64-bit float, same mapping as [`encode_f32`]
pub fn encode_f64(v: f64) -> [u8; 8] {
    let bits = v.to_bits();
    let mapped = if bits & (1 << 63) != 0 {
        !bits
    } else {
        bits | (1 << 63)
    };
    encode_u64(mapped)
}

pub fn decode_u64(data: &[u8]) -> crate::Result<u64> {
    if data.len() != 8 {
        return Err(crate::Error::InvalidEncoding(
            ValueType::Uint64,
            format!("expected 8 bytes, got {}", data.len()),
        ));
    }
    Ok(BigEndian::read_u64(data))
}

pub fn decode_i64(data: &[u8]) -> crate::Result<i64> {
    if data.len() != 8 {
        return Err(crate::Error::InvalidEncoding(
            ValueType::Int64,
            format!("expected 8 bytes, got {}", data.len()),
        ));
    }
    Ok((BigEndian::read_u64(data) ^ (1 << 63)) as i64)
}

pub fn decode_f32(data: &[u8]) -> crate::Result<f32> {
    if data.len() != 4 {
        return Err(crate::Error::InvalidEncoding(
            ValueType::Float32,
            format!("expected 4 bytes, got {}", data.len()),
        ));
    }
    let mapped = BigEndian::read_u32(data);
    let bits = if mapped & (1 << 31) != 0 {
        mapped & !(1 << 31)
    } else {
        !mapped
    };
    Ok(f32::from_bits(bits))
}

pub fn decode_f64(data: &[u8]) -> crate::Result<f64> {
    if data.len() != 8 {
        return Err(crate::Error::InvalidEncoding(
            ValueType::Float64,
            format!("expected 8 bytes, got {}", data.len()),
        ));
    }
    let mapped = BigEndian::read_u64(data);
    let bits = if mapped & (1 << 63) != 0 {
        mapped & !(1 << 63)
    } else {
        !mapped
    };
    Ok(f64::from_bits(bits))
}
