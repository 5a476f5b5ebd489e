// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    eq = { "eq", Operator::Eq },
    gte = { "gte", Operator::Gte },
    not_in = { "not_in", Operator::NotIn },
    not_in_camel = { "notIn", Operator::NotIn },
    not_like_camel = { "notLike", Operator::NotLike },
    is_null_camel = { "isNull", Operator::IsNull },
    is_not_null = { "is_not_null", Operator::IsNotNull },
)]
fn from_name_valid(input: &str, expected: Operator) {
    assert_eq!(Operator::from_name(input), Some(expected));
}

#[parameterized(
    between = { "between" },
    upper = { "EQ" },
    empty = { "" },
    symbol = { ">=" },
)]
fn from_name_invalid(input: &str) {
    assert_eq!(Operator::from_name(input), None);
}

#[test]
fn every_canonical_name_round_trips() {
    for op in Operator::ALL {
        assert_eq!(Operator::from_name(op.as_str()), Some(op));
        assert!(Operator::valid_names().contains(op.as_str()));
    }
}

#[parameterized(
    gt = { Operator::Gt, Some(Operator::Lt) },
    gte = { Operator::Gte, Some(Operator::Lte) },
    lt = { Operator::Lt, Some(Operator::Gt) },
    lte = { Operator::Lte, Some(Operator::Gte) },
    eq = { Operator::Eq, None },
    like = { Operator::Like, None },
)]
fn time_mirror(op: Operator, expected: Option<Operator>) {
    assert_eq!(op.time_mirror(), expected);
}

#[test]
fn null_checks_take_no_value() {
    assert!(!Operator::IsNull.takes_value());
    assert!(!Operator::IsNotNull.takes_value());
    assert!(Operator::Eq.takes_value());
    assert!(Operator::In.takes_list());
    assert!(!Operator::Like.takes_list());
}

#[test]
fn deserialize_accepts_aliases() {
    let op: Operator = serde_json::from_str("\"notLike\"").unwrap();
    assert_eq!(op, Operator::NotLike);
    let op: Operator = serde_json::from_str("\"lte\"").unwrap();
    assert_eq!(op, Operator::Lte);
}
