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

//! Matcher scenario tests
//!
//! Both evaluation modes over one fixed dataset: an integer index
//! (`age`) and a text index (`team`), with non-unique keys so
//! deduplication and in-key ordering are exercised.

use siltdb_core::value::encode_i64;
use siltdb_core::{Field, FieldBuffer, Record, Result};
use siltdb_query::matcher::{
    and, eq_int, eq_str, gt_int, gt_str, gte_int, gte_str, lt_int, lt_str, lte_int, lte_str, or,
    IndexMap, Matcher,
};
use siltdb_query::field::field;
use siltdb_storage::{Index, MemoryIndex};

fn record(age: i64) -> FieldBuffer {
    let mut buf = FieldBuffer::new();
    buf.add(Field::int64("age", age));
    buf
}

/// `age` and `team` indexes over six rows, some keys non-unique
struct IndexFixture {
    age: MemoryIndex,
    team: MemoryIndex,
}

impl IndexFixture {
    fn new() -> Self {
        let mut age = MemoryIndex::new();
        for (v, rowid) in [(1, "z"), (2, "y"), (2, "x"), (3, "a"), (5, "b"), (10, "c")] {
            age.set(&encode_i64(v), rowid.as_bytes()).unwrap();
        }

        let mut team = MemoryIndex::new();
        for (v, rowid) in [
            ("ACA", "x"),
            ("LOSC", "a"),
            ("OL", "z"),
            ("OM", "b"),
            ("OM", "y"),
            ("PSG", "c"),
        ] {
            team.set(v.as_bytes(), rowid.as_bytes()).unwrap();
        }

        Self { age, team }
    }

    fn index_map(&self) -> IndexMap<'_> {
        let mut map = IndexMap::new();
        map.insert("age".to_string(), &self.age as &dyn Index);
        map.insert("team".to_string(), &self.team as &dyn Index);
        map
    }
}

/// A matcher that knows nothing about indexes
struct AlwaysMatcher;

impl Matcher for AlwaysMatcher {
    fn matches(&self, _record: &dyn Record) -> Result<bool> {
        Ok(true)
    }
}

fn index_ids(matcher: &dyn Matcher, indexes: &IndexMap<'_>) -> Vec<String> {
    matcher
        .match_index(indexes)
        .unwrap()
        .expect("matcher should be index-backed")
        .iter()
        .map(|id| String::from_utf8_lossy(id).into_owned())
        .collect()
}

#[test]
fn test_record_matchers() {
    let r = record(10);
    let cases: Vec<(&str, Box<dyn Matcher>, bool)> = vec![
        ("eq", Box::new(eq_int(field("age"), 10)), true),
        ("gt/10>10", Box::new(gt_int(field("age"), 10)), false),
        ("gt/10>11", Box::new(gt_int(field("age"), 11)), false),
        ("gt/10>9", Box::new(gt_int(field("age"), 9)), true),
        ("gte/10>=10", Box::new(gte_int(field("age"), 10)), true),
        ("gte/10>=11", Box::new(gte_int(field("age"), 11)), false),
        ("gte/10>=9", Box::new(gte_int(field("age"), 9)), true),
        ("lt/10<10", Box::new(lt_int(field("age"), 10)), false),
        ("lt/10<11", Box::new(lt_int(field("age"), 11)), true),
        ("lt/10<9", Box::new(lt_int(field("age"), 9)), false),
        ("lte/10<=10", Box::new(lte_int(field("age"), 10)), true),
        ("lte/10<=11", Box::new(lte_int(field("age"), 11)), true),
        ("lte/10<=9", Box::new(lte_int(field("age"), 9)), false),
    ];

    for (name, matcher, expected) in cases {
        assert_eq!(matcher.matches(&r).unwrap(), expected, "{}", name);
    }
}

#[test]
fn test_index_matchers() {
    let fixture = IndexFixture::new();
    let im = fixture.index_map();

    let cases: Vec<(&str, Box<dyn Matcher>, Vec<&str>)> = vec![
        ("eq/int/one", Box::new(eq_int(field("age"), 10)), vec!["c"]),
        (
            "eq/int/multiple",
            Box::new(eq_int(field("age"), 2)),
            vec!["x", "y"],
        ),
        ("eq/int/none", Box::new(eq_int(field("age"), 15)), vec![]),
        (
            "eq/str/one",
            Box::new(eq_str(field("team"), "PSG")),
            vec!["c"],
        ),
        (
            "eq/str/multiple",
            Box::new(eq_str(field("team"), "OM")),
            vec!["b", "y"],
        ),
        ("eq/str/none", Box::new(eq_str(field("team"), "SCB")), vec![]),
        ("gt/int/>10", Box::new(gt_int(field("age"), 10)), vec![]),
        ("gt/int/>7", Box::new(gt_int(field("age"), 7)), vec!["c"]),
        (
            "gt/int/>1",
            Box::new(gt_int(field("age"), 1)),
            vec!["a", "b", "c", "x", "y"],
        ),
        (
            "gt/int/>-1",
            Box::new(gt_int(field("age"), -1)),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        ("gt/str/>PSG", Box::new(gt_str(field("team"), "PSG")), vec![]),
        (
            "gt/str/>OM",
            Box::new(gt_str(field("team"), "OM")),
            vec!["c"],
        ),
        (
            "gt/str/>NICE",
            Box::new(gt_str(field("team"), "NICE")),
            vec!["b", "c", "y", "z"],
        ),
        (
            "gt/str/>ACA",
            Box::new(gt_str(field("team"), "ACA")),
            vec!["a", "b", "c", "y", "z"],
        ),
        (
            "gt/str/>A",
            Box::new(gt_str(field("team"), "A")),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        ("gte/int/>=11", Box::new(gte_int(field("age"), 11)), vec![]),
        ("gte/int/>=7", Box::new(gte_int(field("age"), 7)), vec!["c"]),
        (
            "gte/int/>=2",
            Box::new(gte_int(field("age"), 2)),
            vec!["a", "b", "c", "x", "y"],
        ),
        (
            "gte/int/>=1",
            Box::new(gte_int(field("age"), 1)),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        (
            "gte/str/>=PSG",
            Box::new(gte_str(field("team"), "PSG")),
            vec!["c"],
        ),
        (
            "gte/str/>=OM",
            Box::new(gte_str(field("team"), "OM")),
            vec!["b", "c", "y"],
        ),
        (
            "gte/str/>=NICE",
            Box::new(gte_str(field("team"), "NICE")),
            vec!["b", "c", "y", "z"],
        ),
        (
            "gte/str/>=ACA",
            Box::new(gte_str(field("team"), "ACA")),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        ("lt/int/<1", Box::new(lt_int(field("age"), 1)), vec![]),
        (
            "lt/int/<4",
            Box::new(lt_int(field("age"), 4)),
            vec!["a", "x", "y", "z"],
        ),
        (
            "lt/int/<10",
            Box::new(lt_int(field("age"), 10)),
            vec!["a", "b", "x", "y", "z"],
        ),
        (
            "lt/int/<11",
            Box::new(lt_int(field("age"), 11)),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        ("lt/str/<A", Box::new(lt_str(field("team"), "A")), vec![]),
        ("lt/str/<ACA", Box::new(lt_str(field("team"), "ACA")), vec![]),
        (
            "lt/str/<NICE",
            Box::new(lt_str(field("team"), "NICE")),
            vec!["a", "x"],
        ),
        (
            "lt/str/<OM",
            Box::new(lt_str(field("team"), "OM")),
            vec!["a", "x", "z"],
        ),
        (
            "lt/str/<STRASBOURG",
            Box::new(lt_str(field("team"), "STRASBOURG")),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        ("lte/int/<=0", Box::new(lte_int(field("age"), 0)), vec![]),
        (
            "lte/int/<=2",
            Box::new(lte_int(field("age"), 2)),
            vec!["x", "y", "z"],
        ),
        (
            "lte/int/<=4",
            Box::new(lte_int(field("age"), 4)),
            vec!["a", "x", "y", "z"],
        ),
        (
            "lte/int/<=10",
            Box::new(lte_int(field("age"), 10)),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        (
            "lte/int/<=11",
            Box::new(lte_int(field("age"), 11)),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        ("lte/str/<=A", Box::new(lte_str(field("team"), "A")), vec![]),
        (
            "lte/str/<=ACA",
            Box::new(lte_str(field("team"), "ACA")),
            vec!["x"],
        ),
        (
            "lte/str/<=NICE",
            Box::new(lte_str(field("team"), "NICE")),
            vec!["a", "x"],
        ),
        (
            "lte/str/<=OM",
            Box::new(lte_str(field("team"), "OM")),
            vec!["a", "b", "x", "y", "z"],
        ),
        (
            "lte/str/<=STRASBOURG",
            Box::new(lte_str(field("team"), "STRASBOURG")),
            vec!["a", "b", "c", "x", "y", "z"],
        ),
    ];

    for (name, matcher, expected) in cases {
        assert_eq!(index_ids(matcher.as_ref(), &im), expected, "{}", name);
    }
}

#[test]
fn test_and_matcher_record_eval() {
    let m = and(vec![
        Box::new(gt_int(field("age"), 2)),
        Box::new(lt_int(field("age"), 10)),
    ]);

    assert!(m.matches(&record(5)).unwrap());
    assert!(!m.matches(&record(10)).unwrap());
}

#[test]
fn test_and_matcher_index_eval() {
    let fixture = IndexFixture::new();
    let im = fixture.index_map();

    let cases: Vec<(&str, Vec<Box<dyn Matcher>>, Vec<&str>)> = vec![
        (
            ">2",
            vec![Box::new(gt_int(field("age"), 2))],
            vec!["a", "b", "c"],
        ),
        (
            ">2 && <10",
            vec![
                Box::new(gt_int(field("age"), 2)),
                Box::new(lt_int(field("age"), 10)),
            ],
            vec!["a", "b"],
        ),
        (
            ">10 && <20",
            vec![
                Box::new(gt_int(field("age"), 10)),
                Box::new(lt_int(field("age"), 20)),
            ],
            vec![],
        ),
        (
            ">8 && <3",
            vec![
                Box::new(gt_int(field("age"), 8)),
                Box::new(lt_int(field("age"), 3)),
            ],
            vec![],
        ),
        (
            ">8 && non index matcher",
            vec![Box::new(gt_int(field("age"), 8)), Box::new(AlwaysMatcher)],
            vec![],
        ),
    ];

    for (name, matchers, expected) in cases {
        let m = and(matchers);
        assert_eq!(index_ids(&m, &im), expected, "{}", name);
    }
}

#[test]
fn test_or_matcher_record_eval() {
    let m = or(vec![
        Box::new(gt_int(field("age"), 8)),
        Box::new(lt_int(field("age"), 2)),
    ]);

    assert!(m.matches(&record(1)).unwrap());
    assert!(m.matches(&record(9)).unwrap());
    assert!(!m.matches(&record(5)).unwrap());
}

#[test]
fn test_or_matcher_index_eval() {
    let fixture = IndexFixture::new();
    let im = fixture.index_map();

    let cases: Vec<(&str, Vec<Box<dyn Matcher>>, Vec<&str>)> = vec![
        (
            ">2",
            vec![Box::new(gt_int(field("age"), 2))],
            vec!["a", "b", "c"],
        ),
        (
            ">8 || <2",
            vec![
                Box::new(gt_int(field("age"), 8)),
                Box::new(lt_int(field("age"), 2)),
            ],
            vec!["c", "z"],
        ),
        (
            ">0 || <11",
            vec![
                Box::new(gt_int(field("age"), 0)),
                Box::new(lt_int(field("age"), 11)),
            ],
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        (
            ">10 || <20",
            vec![
                Box::new(gt_int(field("age"), 10)),
                Box::new(lt_int(field("age"), 20)),
            ],
            vec!["a", "b", "c", "x", "y", "z"],
        ),
        (
            ">10 || >20",
            vec![
                Box::new(gt_int(field("age"), 10)),
                Box::new(gt_int(field("age"), 20)),
            ],
            vec![],
        ),
        (
            ">8 || non index matcher",
            vec![Box::new(gt_int(field("age"), 8)), Box::new(AlwaysMatcher)],
            vec![],
        ),
    ];

    for (name, matchers, expected) in cases {
        let m = or(matchers);
        assert_eq!(index_ids(&m, &im), expected, "{}", name);
    }
}

#[test]
fn test_combinators_with_no_backed_child_are_unbacked() {
    let fixture = IndexFixture::new();
    let im = fixture.index_map();

    let m = and(vec![Box::new(AlwaysMatcher), Box::new(AlwaysMatcher)]);
    assert!(m.match_index(&im).unwrap().is_none());

    let m = or(vec![
        Box::new(eq_int(field("salary"), 1)),
        Box::new(eq_int(field("height"), 2)),
    ]);
    assert!(m.match_index(&im).unwrap().is_none());
}

/// Whenever `match_index` certifies a set for a fully index-backed
/// predicate, per-record evaluation over the same data agrees exactly.
#[test]
fn test_index_and_record_modes_agree() {
    // records mirroring the index fixture: rowid -> age
    let data = [("z", 1), ("y", 2), ("x", 2), ("a", 3), ("b", 5), ("c", 10)];
    let fixture = IndexFixture::new();
    let im = fixture.index_map();

    let predicates: Vec<Box<dyn Matcher>> = vec![
        Box::new(eq_int(field("age"), 2)),
        Box::new(gt_int(field("age"), 1)),
        Box::new(lte_int(field("age"), 4)),
        Box::new(and(vec![
            Box::new(gt_int(field("age"), 2)),
            Box::new(lt_int(field("age"), 10)),
        ])),
        Box::new(or(vec![
            Box::new(gt_int(field("age"), 8)),
            Box::new(lt_int(field("age"), 2)),
        ])),
    ];

    for predicate in predicates {
        let set = predicate
            .match_index(&im)
            .unwrap()
            .expect("fully index-backed");

        let mut expected: Vec<String> = data
            .iter()
            .filter(|(_, age)| predicate.matches(&record(*age)).unwrap())
            .map(|(rowid, _)| rowid.to_string())
            .collect();
        expected.sort();

        let got: Vec<String> = set
            .iter()
            .map(|id| String::from_utf8_lossy(id).into_owned())
            .collect();
        assert_eq!(got, expected);
    }
}
