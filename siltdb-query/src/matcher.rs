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

//! The query matcher core
//!
//! One immutable predicate tree, two evaluation modes:
//!
//! - [`Matcher::matches`] evaluates the predicate against a single record
//! - [`Matcher::match_index`] realizes the predicate as an ordered row-id
//!   set by walking secondary indexes: intersection for `And`, union for
//!   `Or`, range scans at the leaves
//!
//! `match_index` returning `None` means the predicate is not index-backed
//! and the caller must fall back to a scan. `Some(empty)` means the indexes
//! certified no candidates. The two are never collapsed: every id in a
//! `Some` set satisfies the predicate, so the executor can trust the index
//! path without re-verification.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use siltdb_core::{Error, Record, Result, Value};
use siltdb_storage::Index;

use crate::field::FieldSelector;
use crate::rowid_set::RowIdSet;
use crate::scan::scan;

/// Indexes available to `match_index`, keyed by the field they cover
pub type IndexMap<'a> = HashMap<String, &'a dyn Index>;

/// A node in a predicate tree
///
/// Implementations are immutable once built, reentrant, and safe to share
/// across threads for concurrent read-only evaluation. The default
/// `match_index` declares the node not index-backed, which is the right
/// answer for any matcher that only knows how to inspect records.
pub trait Matcher: Send + Sync {
    /// Evaluate the predicate against one record
    ///
    /// A missing field is not an error: the predicate simply does not match.
    fn matches(&self, record: &dyn Record) -> Result<bool>;

    /// Attempt to realize the predicate as an ordered row-id set
    ///
    /// `None` signals "not index-backed"; `Some` carries the candidate set,
    /// possibly empty.
    fn match_index(&self, indexes: &IndexMap<'_>) -> Result<Option<RowIdSet>> {
        let _ = indexes;
        Ok(None)
    }
}

/// Comparison operator of a predicate leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CmpOp {
    /// Apply the operator to an ordering of `field value` vs `literal`
    pub fn eval(self, ord: Ordering) -> bool {
        match self {
            CmpOp::Eq => ord == Ordering::Equal,
            CmpOp::Gt => ord == Ordering::Greater,
            CmpOp::Gte => ord != Ordering::Less,
            CmpOp::Lt => ord == Ordering::Less,
            CmpOp::Lte => ord != Ordering::Greater,
        }
    }
}

/// Predicate leaf: `field <op> literal`
///
/// Binds one field, one operator and one literal of the expected type.
#[derive(Debug, Clone)]
pub struct CmpMatcher {
    field: FieldSelector,
    op: CmpOp,
    literal: Value,
}

impl CmpMatcher {
    pub fn new(field: FieldSelector, op: CmpOp, literal: impl Into<Value>) -> Self {
        Self {
            field,
            op,
            literal: literal.into(),
        }
    }

    pub fn field(&self) -> &FieldSelector {
        &self.field
    }

    pub fn op(&self) -> CmpOp {
        self.op
    }

    pub fn literal(&self) -> &Value {
        &self.literal
    }
}

impl Matcher for CmpMatcher {
    fn matches(&self, record: &dyn Record) -> Result<bool> {
        let field = match record.field(self.field.name()) {
            Some(f) => f,
            None => return Ok(false),
        };
        if field.ty != self.literal.value_type() {
            return Err(Error::TypeMismatch {
                field: self.field.name().to_string(),
                expected: self.literal.value_type(),
                actual: field.ty,
            });
        }
        let value = field.decode()?;
        // NaN comparisons are undefined and never match
        Ok(value
            .compare(&self.literal)
            .map(|ord| self.op.eval(ord))
            .unwrap_or(false))
    }

    fn match_index(&self, indexes: &IndexMap<'_>) -> Result<Option<RowIdSet>> {
        let index = match indexes.get(self.field.name()) {
            Some(index) => *index,
            None => return Ok(None),
        };
        let set = scan(index, self.op, &self.literal.encode())?;
        Ok(Some(set))
    }
}

/// Conjunction of child matchers
pub struct And {
    matchers: Vec<Box<dyn Matcher>>,
}

/// Build a conjunction
pub fn and(matchers: Vec<Box<dyn Matcher>>) -> And {
    And { matchers }
}

impl Matcher for And {
    fn matches(&self, record: &dyn Record) -> Result<bool> {
        for m in &self.matchers {
            if !m.matches(record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Intersection of the children's candidate sets
    ///
    /// Only safe to push down when every child is index-backed. A mix of
    /// backed and unbacked children yields the conservative empty set; no
    /// backed child at all yields `None` so the caller scans.
    fn match_index(&self, indexes: &IndexMap<'_>) -> Result<Option<RowIdSet>> {
        let mut sets = Vec::with_capacity(self.matchers.len());
        let mut unbacked = false;
        for m in &self.matchers {
            match m.match_index(indexes)? {
                Some(set) => sets.push(set),
                None => unbacked = true,
            }
        }

        if unbacked {
            if sets.is_empty() {
                return Ok(None);
            }
            return Ok(Some(RowIdSet::new()));
        }

        let mut sets = sets.into_iter();
        let mut result = match sets.next() {
            Some(first) => first,
            None => return Ok(Some(RowIdSet::new())),
        };
        for set in sets {
            result = result.intersect(&set);
            if result.is_empty() {
                break;
            }
        }
        Ok(Some(result))
    }
}

/// Disjunction of child matchers
pub struct Or {
    matchers: Vec<Box<dyn Matcher>>,
}

/// Build a disjunction
pub fn or(matchers: Vec<Box<dyn Matcher>>) -> Or {
    Or { matchers }
}

impl Matcher for Or {
    fn matches(&self, record: &dyn Record) -> Result<bool> {
        for m in &self.matchers {
            if m.matches(record)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Union of the children's candidate sets
    ///
    /// An unbacked child alongside backed ones makes the union unknowable
    /// from the indexes, so the result degrades to the conservative empty
    /// set. No backed child at all yields `None` so the caller scans.
    fn match_index(&self, indexes: &IndexMap<'_>) -> Result<Option<RowIdSet>> {
        let mut sets = Vec::with_capacity(self.matchers.len());
        let mut unbacked = false;
        for m in &self.matchers {
            match m.match_index(indexes)? {
                Some(set) => sets.push(set),
                None => unbacked = true,
            }
        }

        if unbacked {
            if sets.is_empty() {
                return Ok(None);
            }
            return Ok(Some(RowIdSet::new()));
        }

        let mut result = RowIdSet::new();
        for set in &sets {
            result = result.union(set);
        }
        Ok(Some(result))
    }
}

macro_rules! leaf_constructors {
    ($($(#[$doc:meta])* $name:ident, $op:ident, $ty:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(field: FieldSelector, literal: $ty) -> CmpMatcher {
                CmpMatcher::new(field, CmpOp::$op, literal)
            }
        )*
    };
}

leaf_constructors! {
    /// `field == literal` over signed integers
    eq_int, Eq, i64;
    gt_int, Gt, i64;
    gte_int, Gte, i64;
    lt_int, Lt, i64;
    lte_int, Lte, i64;

    /// `field == literal` over unsigned integers
    eq_uint, Eq, u64;
    gt_uint, Gt, u64;
    gte_uint, Gte, u64;
    lt_uint, Lt, u64;
    lte_uint, Lte, u64;

    /// `field == literal` over 32-bit floats
    eq_f32, Eq, f32;
    gt_f32, Gt, f32;
    gte_f32, Gte, f32;
    lt_f32, Lt, f32;
    lte_f32, Lte, f32;

    /// `field == literal` over 64-bit floats
    eq_f64, Eq, f64;
    gt_f64, Gt, f64;
    gte_f64, Gte, f64;
    lt_f64, Lt, f64;
    lte_f64, Lte, f64;

    /// `field == literal` over text, compared bytewise
    eq_str, Eq, &str;
    gt_str, Gt, &str;
    gte_str, Gte, &str;
    lt_str, Lt, &str;
    lte_str, Lte, &str;

    /// `field == literal` over raw bytes
    eq_bytes, Eq, Vec<u8>;
    gt_bytes, Gt, Vec<u8>;
    gte_bytes, Gte, Vec<u8>;
    lt_bytes, Lt, Vec<u8>;
    lte_bytes, Lte, Vec<u8>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::field;
    use siltdb_core::{Field, FieldBuffer};

    fn record(age: i64) -> FieldBuffer {
        let mut buf = FieldBuffer::new();
        buf.add(Field::int64("age", age));
        buf
    }

    #[test]
    fn test_missing_field_matches_false_without_error() {
        let m = eq_int(field("salary"), 10);
        assert!(!m.matches(&record(10)).unwrap());
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let m = eq_str(field("age"), "ten");
        assert!(matches!(
            m.matches(&record(10)),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_cmp_op_eval() {
        assert!(CmpOp::Gte.eval(Ordering::Equal));
        assert!(CmpOp::Gte.eval(Ordering::Greater));
        assert!(!CmpOp::Gte.eval(Ordering::Less));
        assert!(CmpOp::Lte.eval(Ordering::Less));
        assert!(!CmpOp::Lt.eval(Ordering::Equal));
        assert!(CmpOp::Eq.eval(Ordering::Equal));
    }

    #[test]
    fn test_and_short_circuits_record_eval() {
        let m = and(vec![
            Box::new(gt_int(field("age"), 2)),
            Box::new(lt_int(field("age"), 10)),
        ]);
        assert!(m.matches(&record(5)).unwrap());
        assert!(!m.matches(&record(10)).unwrap());
        assert!(!m.matches(&record(1)).unwrap());
    }

    #[test]
    fn test_or_record_eval() {
        let m = or(vec![
            Box::new(gt_int(field("age"), 8)),
            Box::new(lt_int(field("age"), 2)),
        ]);
        assert!(m.matches(&record(1)).unwrap());
        assert!(m.matches(&record(9)).unwrap());
        assert!(!m.matches(&record(5)).unwrap());
    }

    #[test]
    fn test_empty_combinators() {
        let indexes = IndexMap::new();
        assert!(and(vec![]).matches(&record(1)).unwrap());
        assert!(!or(vec![]).matches(&record(1)).unwrap());
        // empty child lists collapse to the empty set, not to "unbacked"
        assert_eq!(
            and(vec![]).match_index(&indexes).unwrap(),
            Some(RowIdSet::new())
        );
        assert_eq!(
            or(vec![]).match_index(&indexes).unwrap(),
            Some(RowIdSet::new())
        );
    }

    #[test]
    fn test_leaf_without_index_is_unbacked() {
        let indexes = IndexMap::new();
        let m = eq_int(field("age"), 2);
        assert!(m.match_index(&indexes).unwrap().is_none());
    }

    #[test]
    fn test_nan_never_matches() {
        let mut buf = FieldBuffer::new();
        buf.add(Field::float64("score", f64::NAN));
        assert!(!eq_f64(field("score"), f64::NAN).matches(&buf).unwrap());
        assert!(!lt_f64(field("score"), 1.0).matches(&buf).unwrap());
        assert!(!gte_f64(field("score"), 1.0).matches(&buf).unwrap());
    }
}
