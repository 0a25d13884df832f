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

//! SiltDB Core
//!
//! Fundamental types for the SiltDB embedded relational engine:
//!
//! - **Values**: the closed set of indexable scalars and their
//!   order-preserving binary codec
//! - **Records**: named-field collections with encoded payloads
//! - **Errors**: the engine-wide error enum
//!
//! Byte-lexicographic order on encoded values matches the natural order of
//! the source type, which is what lets the query layer drive index range
//! scans without ever decoding a key.

pub mod error;
pub mod record;
pub mod value;

pub use error::{Error, Result};
pub use record::{Field, FieldBuffer, Record};
pub use value::{Value, ValueType};

/// Engine version
pub const SILTDB_VERSION: &str = env!("CARGO_PKG_VERSION");
