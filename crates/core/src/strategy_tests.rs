// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::query::Query;
use yare::parameterized;

fn compile(strategy: &FieldStrategy, field: &str, op: Operator, value: Value) -> Result<Query> {
    let mut qb = QueryBuilder::select_from("tickets");
    let predicate = strategy.compile(&mut qb, field, op, value, &PriorityWeights::default())?;
    Ok(qb.into_query(predicate))
}

#[test]
fn registry_prefers_exact_field() {
    let registry = StrategyRegistry::new()
        .field("priority", FieldStrategy::IdentityLookup { account: None })
        .field_operator("priority", Operator::Gt, FieldStrategy::WeightedRange);
    assert_eq!(
        registry.resolve("priority", Operator::Gt).map(FieldStrategy::name),
        Some("identity_lookup")
    );
}

#[test]
fn registry_falls_back_to_field_operator_then_default() {
    let registry = StrategyRegistry::helpdesk();
    assert_eq!(
        registry.resolve("priority", Operator::Gte).map(FieldStrategy::name),
        Some("weighted_range")
    );
    assert_eq!(registry.resolve("priority", Operator::Eq), None);
    assert_eq!(
        registry.resolve("branch", Operator::Like).map(FieldStrategy::name),
        Some("association_contains")
    );
    assert_eq!(registry.resolve("branch", Operator::Eq), None);
    assert_eq!(
        registry.resolve("assignee", Operator::Neq).map(FieldStrategy::name),
        Some("identity_lookup")
    );
    assert_eq!(registry.resolve("subject", Operator::Like), None);
}

#[parameterized(
    gt_low = { Operator::Gt, "low", vec!["medium", "high"] },
    gte_high = { Operator::Gte, "high", vec!["high"] },
    gte_medium = { Operator::Gte, "medium", vec!["medium", "high"] },
    lt_high = { Operator::Lt, "high", vec!["low", "medium"] },
    lte_low = { Operator::Lte, "low", vec!["low"] },
)]
fn weighted_range_expands_to_membership(op: Operator, threshold: &str, expected: Vec<&str>) {
    let query =
        compile(&FieldStrategy::WeightedRange, "priority", op, Value::from(threshold)).unwrap();
    assert_eq!(
        query.predicate,
        Predicate::Compare {
            column: Column::new("t", "priority"),
            op: Operator::In,
            param: "priority_1".into(),
        }
    );
    assert_eq!(query.param("priority_1"), Some(&Value::from(expected)));
}

#[parameterized(
    gt_high = { Operator::Gt, "high" },
    lt_low = { Operator::Lt, "low" },
)]
fn weighted_range_with_no_match_is_always_false(op: Operator, threshold: &str) {
    let query =
        compile(&FieldStrategy::WeightedRange, "priority", op, Value::from(threshold)).unwrap();
    assert_eq!(query.predicate, Predicate::always_false());
    assert!(query.params.is_empty());
}

#[test]
fn weighted_range_rejects_unknown_threshold() {
    let err = compile(
        &FieldStrategy::WeightedRange,
        "priority",
        Operator::Gt,
        Value::from("urgent"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ConditionResolution(ref msg) if msg.contains("urgent")));
}

#[test]
fn weighted_range_passes_equality_through() {
    let query = compile(
        &FieldStrategy::WeightedRange,
        "priority",
        Operator::Eq,
        Value::from("low"),
    )
    .unwrap();
    assert_eq!(query.to_string(), "SELECT t.* FROM tickets AS t WHERE t.priority = :priority_1");
}

#[test]
fn association_contains_wraps_value_and_joins() {
    let strategy = StrategyRegistry::helpdesk().resolve("branch", Operator::Like).cloned().unwrap();
    let query = compile(&strategy, "branch", Operator::Like, Value::from("North")).unwrap();
    assert_eq!(
        query.to_string(),
        "SELECT t.* FROM tickets AS t LEFT JOIN branches AS j1 ON j1.id = t.branch WHERE j1.name LIKE :branch_1"
    );
    assert_eq!(query.param("branch_1"), Some(&Value::from("%North%")));
}

#[test]
fn association_null_check_skips_join() {
    let strategy = StrategyRegistry::helpdesk().resolve("branch", Operator::Like).cloned().unwrap();
    let query = compile(&strategy, "branch", Operator::IsNull, Value::Null).unwrap();
    assert!(query.joins.is_empty());
    assert_eq!(query.to_string(), "SELECT t.* FROM tickets AS t WHERE t.branch IS NULL");
}

#[test]
fn identity_lookup_binds_numeric_id() {
    let strategy = FieldStrategy::IdentityLookup { account: None };
    let query = compile(&strategy, "assignee", Operator::Eq, Value::from("diamante_12")).unwrap();
    assert_eq!(query.param("assignee_1"), Some(&Value::Int(12)));

    let query = compile(
        &strategy,
        "assignee",
        Operator::In,
        Value::from(vec!["oro_1", "oro_2"]),
    )
    .unwrap();
    assert_eq!(
        query.param("assignee_1"),
        Some(&Value::List(vec![Value::Int(1), Value::Int(2)]))
    );
}

#[parameterized(
    malformed = { "bob" },
    wrong_account = { "diamante_3" },
)]
fn identity_lookup_rejects(identifier: &str) {
    let strategy = FieldStrategy::IdentityLookup {
        account: Some(UserKind::Oro),
    };
    let err = compile(&strategy, "assignee", Operator::Eq, Value::from(identifier)).unwrap_err();
    assert!(matches!(err, Error::ConditionResolution(_)));
}

#[test]
fn entries_deserialize_from_toml() {
    #[derive(Deserialize)]
    struct Doc {
        strategies: Vec<StrategyEntry>,
    }
    let doc: Doc = toml::from_str(
        r#"
        [[strategies]]
        field = "branch"
        operator = "like"
        kind = "association_contains"
        join = { table = "branches" }

        [[strategies]]
        field = "assignee"
        kind = "identity_lookup"
        "#,
    )
    .unwrap();
    let registry = StrategyRegistry::from_entries(&doc.strategies);
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.resolve("branch", Operator::Like),
        Some(&FieldStrategy::AssociationContains {
            join: Association {
                table: "branches".into(),
                key: "id".into(),
                display: "name".into(),
            }
        })
    );
    assert_eq!(
        registry.resolve("assignee", Operator::Eq),
        Some(&FieldStrategy::IdentityLookup { account: None })
    );
}
