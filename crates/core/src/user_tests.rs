// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    oro = { "oro_1", UserKind::Oro, 1 },
    diamante = { "diamante_42", UserKind::Diamante, 42 },
)]
fn parse_valid_identifiers(input: &str, kind: UserKind, id: i64) {
    let user: User = input.parse().unwrap();
    assert_eq!(user, User::new(kind, id));
    assert_eq!(user.to_string(), input);
}

#[parameterized(
    empty = { "" },
    no_separator = { "oro1" },
    unknown_kind = { "admin_1" },
    not_numeric = { "oro_abc" },
    zero = { "oro_0" },
    negative = { "oro_-3" },
    trailing = { "oro_1_2" },
)]
fn parse_invalid_identifiers(input: &str) {
    let err = input.parse::<User>().unwrap_err();
    assert!(matches!(err, Error::InvalidUser(ref s) if s == input));
}

#[test]
fn oro_capability() {
    assert!(User::oro(3).is_oro_user());
    assert!(!User::diamante(3).is_oro_user());
}

#[test]
fn serde_uses_identifier_form() {
    let json = serde_json::to_string(&User::diamante(7)).unwrap();
    assert_eq!(json, "\"diamante_7\"");
    let back: User = serde_json::from_str(&json).unwrap();
    assert_eq!(back, User::diamante(7));
    assert!(serde_json::from_str::<User>("\"nobody\"").is_err());
}
