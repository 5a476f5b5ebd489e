// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::config::AutomationConfig;
use yare::parameterized;

#[parameterized(
    text_like = { FieldType::Text, Operator::Like, true },
    text_gt = { FieldType::Text, Operator::Gt, false },
    integer_gt = { FieldType::Integer, Operator::Gt, true },
    integer_like = { FieldType::Integer, Operator::Like, false },
    boolean_eq = { FieldType::Boolean, Operator::Eq, true },
    boolean_in = { FieldType::Boolean, Operator::In, false },
    enum_in = { FieldType::Enum, Operator::In, true },
    enum_gte = { FieldType::Enum, Operator::Gte, false },
    weighted_gte = { FieldType::WeightedEnum, Operator::Gte, true },
    weighted_eq = { FieldType::WeightedEnum, Operator::Eq, true },
    datetime_gt = { FieldType::Datetime, Operator::Gt, true },
    datetime_eq = { FieldType::Datetime, Operator::Eq, false },
    association_like = { FieldType::Association, Operator::Like, true },
    association_gt = { FieldType::Association, Operator::Gt, false },
    user_eq = { FieldType::User, Operator::Eq, true },
    user_like = { FieldType::User, Operator::Like, false },
)]
fn field_type_allows(field_type: FieldType, op: Operator, expected: bool) {
    assert_eq!(field_type.allows(op), expected);
}

#[test]
fn field_type_names() {
    assert_eq!(FieldType::WeightedEnum.to_string(), "weighted_enum");
    let parsed: FieldType = serde_json::from_str("\"datetime\"").unwrap();
    assert_eq!(parsed, FieldType::Datetime);
}

#[test]
fn target_context_resolves_fields() {
    let config = AutomationConfig::helpdesk();
    let entity = config.entity_configuration("ticket").unwrap();
    let ctx = TargetContext {
        name: "ticket",
        entity,
        metadata: &config,
    };

    let created = ctx.field("created").unwrap();
    assert_eq!(created.field, "created_at");
    assert_eq!(created.field_type, FieldType::Datetime);

    let err = ctx.field("mood").unwrap_err();
    assert!(matches!(err, Error::UnknownField { ref property, .. } if property == "mood"));
}
