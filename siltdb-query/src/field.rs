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

//! Field selectors and fluent predicate builders
//!
//! A selector is just a field name; the typed wrappers pair it with an
//! expected scalar type so predicates read naturally at call sites:
//!
//! ```
//! use siltdb_query::field::int_field;
//!
//! let adult = int_field("age").gte(18);
//! ```

use serde::{Deserialize, Serialize};

use crate::matcher::{CmpMatcher, CmpOp};

/// Named reference to a record field; holds no other state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSelector {
    name: String,
}

impl FieldSelector {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Shorthand selector constructor
pub fn field(name: impl Into<String>) -> FieldSelector {
    FieldSelector::new(name)
}

macro_rules! typed_field {
    ($(#[$doc:meta])* $builder:ident, $ctor:ident, $ty:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $builder(FieldSelector);

        pub fn $ctor(name: impl Into<String>) -> $builder {
            $builder(FieldSelector::new(name))
        }

        impl $builder {
            pub fn eq(self, v: $ty) -> CmpMatcher {
                CmpMatcher::new(self.0, CmpOp::Eq, v)
            }

            pub fn gt(self, v: $ty) -> CmpMatcher {
                CmpMatcher::new(self.0, CmpOp::Gt, v)
            }

            pub fn gte(self, v: $ty) -> CmpMatcher {
                CmpMatcher::new(self.0, CmpOp::Gte, v)
            }

            pub fn lt(self, v: $ty) -> CmpMatcher {
                CmpMatcher::new(self.0, CmpOp::Lt, v)
            }

            pub fn lte(self, v: $ty) -> CmpMatcher {
                CmpMatcher::new(self.0, CmpOp::Lte, v)
            }
        }
    };
}

typed_field! {
    /// Builder for predicates over a signed integer field
    IntField, int_field, i64
}

typed_field! {
    /// Builder for predicates over an unsigned integer field
    UintField, uint_field, u64
}

typed_field! {
    /// Builder for predicates over a 32-bit float field
    Float32Field, float32_field, f32
}

typed_field! {
    /// Builder for predicates over a 64-bit float field
    FloatField, float_field, f64
}

typed_field! {
    /// Builder for predicates over a text field
    StringField, string_field, &str
}

typed_field! {
    /// Builder for predicates over a raw byte field
    BytesField, bytes_field, Vec<u8>
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use siltdb_core::{Field, FieldBuffer};

    #[test]
    fn test_fluent_builder_matches() {
        let mut record = FieldBuffer::new();
        record.add(Field::int64("age", 21));

        assert!(int_field("age").gte(18).matches(&record).unwrap());
        assert!(!int_field("age").lt(21).matches(&record).unwrap());
    }

    #[test]
    fn test_selector_holds_only_the_name() {
        let f = field("team");
        assert_eq!(f.name(), "team");
    }

    #[test]
    fn test_string_builder() {
        let mut record = FieldBuffer::new();
        record.add(Field::text("team", "OM"));

        assert!(string_field("team").eq("OM").matches(&record).unwrap());
        assert!(string_field("team").lte("PSG").matches(&record).unwrap());
        assert!(!string_field("team").gt("PSG").matches(&record).unwrap());
    }
}
