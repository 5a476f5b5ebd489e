// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::clock::FixedClock;
use crate::condition::{ConditionDefinition, ConditionParameters};
use crate::config::{AutomationConfig, TICKET_CLASS};
use crate::db::Database;
use crate::error::Error;
use crate::ticket::{Status, Ticket};
use crate::user::User;
use crate::value::Value;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn cond(condition_type: &str, operator: &str, value: impl Into<Value>) -> ConditionDefinition {
    ConditionDefinition::new(condition_type, ConditionParameters::new(operator, value))
}

fn provider() -> TargetEntityProvider<Database> {
    let db = Database::open_in_memory().unwrap();
    let north = db.create_branch("North Office").unwrap();
    let south = db.create_branch("South Office").unwrap();

    let mut old = Ticket::new(
        "SUP-1",
        "Printer jammed",
        User::diamante(1),
        now() - Duration::hours(30),
    );
    old.priority = "high".into();
    old.branch = Some(north);
    old.assignee = Some(7);
    db.create_ticket(&old).unwrap();

    let mut fresh = Ticket::new("SUP-2", "VPN down", User::oro(2), now() - Duration::hours(2));
    fresh.priority = "low".into();
    fresh.status = Status::Open;
    fresh.branch = Some(south);
    db.create_ticket(&fresh).unwrap();

    let mut medium = Ticket::new(
        "SUP-3",
        "Password reset",
        User::diamante(1),
        now() - Duration::hours(50),
    );
    medium.status = Status::Closed;
    db.create_ticket(&medium).unwrap();

    let compiler =
        QueryCompiler::new(Arc::new(AutomationConfig::helpdesk())).with_clock(FixedClock(now()));
    TargetEntityProvider::new(compiler, db)
}

fn keys(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.get("key").and_then(Value::as_str).unwrap().to_string())
        .collect()
}

fn rule(grouping: Group) -> Rule {
    Rule::new("test", "ticket", grouping)
}

#[test]
fn empty_inclusive_group_matches_everything() {
    let records = provider().get_targets(&rule(Group::inclusive()), TICKET_CLASS).unwrap();
    assert_eq!(keys(&records), vec!["SUP-1", "SUP-2", "SUP-3"]);
}

#[test]
fn empty_exclusive_group_matches_nothing() {
    let records = provider().get_targets(&rule(Group::exclusive()), TICKET_CLASS).unwrap();
    assert!(records.is_empty());
}

#[test]
fn older_than_filters_by_age() {
    let group = Group::inclusive().with_condition(cond("created", "gt", 24_i64));
    let records = provider().get_targets(&rule(group), TICKET_CLASS).unwrap();
    assert_eq!(keys(&records), vec!["SUP-1", "SUP-3"]);
}

#[test]
fn newer_than_filters_by_age() {
    let group = Group::inclusive().with_condition(cond("created", "lte", 24_i64));
    let records = provider().get_targets(&rule(group), TICKET_CLASS).unwrap();
    assert_eq!(keys(&records), vec!["SUP-2"]);
}

#[test]
fn priority_at_least_medium() {
    let group = Group::inclusive().with_condition(cond("priority", "gte", "medium"));
    let records = provider().get_targets(&rule(group), TICKET_CLASS).unwrap();
    assert_eq!(keys(&records), vec!["SUP-1", "SUP-3"]);
}

#[test]
fn branch_contains_search() {
    let group = Group::inclusive().with_condition(cond("branch", "like", "north"));
    let records = provider().get_targets(&rule(group), TICKET_CLASS).unwrap();
    assert_eq!(keys(&records), vec!["SUP-1"]);
}

#[test]
fn branch_search_keeps_unbranched_matches_of_sibling_terms() {
    let closed = Group::exclusive().with_condition(cond("status", "eq", "closed"));
    let alone = provider().get_targets(&rule(closed.clone()), TICKET_CLASS).unwrap();
    assert_eq!(keys(&alone), vec!["SUP-3"]);

    let either = closed.with_condition(cond("branch", "like", "North"));
    let records = provider().get_targets(&rule(either), TICKET_CLASS).unwrap();
    assert_eq!(keys(&records), vec!["SUP-1", "SUP-3"]);
}

#[test]
fn branch_exclusion_skips_unbranched_tickets() {
    let group = Group::inclusive().with_condition(cond("branch", "not_like", "north"));
    let records = provider().get_targets(&rule(group), TICKET_CLASS).unwrap();
    assert_eq!(keys(&records), vec!["SUP-2"]);
}

#[test]
fn nested_groups() {
    let group = Group::exclusive()
        .with_child(
            Group::inclusive()
                .with_condition(cond("assignee", "eq", "oro_7"))
                .with_condition(cond("status", "eq", "new")),
        )
        .with_child(
            Group::inclusive().with_condition(cond("status", "in", vec!["closed", "on_hold"])),
        );
    let records = provider().get_targets(&rule(group), TICKET_CLASS).unwrap();
    assert_eq!(keys(&records), vec!["SUP-1", "SUP-3"]);
}

#[test]
fn unassigned_tickets() {
    let group = Group::inclusive().with_condition(ConditionDefinition::new(
        "assignee",
        ConditionParameters::unary("is_null"),
    ));
    let records = provider().get_rule_targets(&rule(group)).unwrap();
    assert_eq!(keys(&records), vec!["SUP-2", "SUP-3"]);
}

#[test]
fn failure_collapses_to_none_but_try_surfaces_it() {
    let provider = provider();
    let group = Group::inclusive().with_condition(cond("unknown_type", "eq", "x"));
    let rule = rule(group);
    assert!(provider.get_targets(&rule, TICKET_CLASS).is_none());
    assert!(matches!(
        provider.try_get_targets(&rule, TICKET_CLASS),
        Err(Error::ConditionResolution(_))
    ));
}

#[test]
fn storage_failure_collapses_to_none() {
    let provider = provider();
    provider.storage().conn.execute_batch("DROP TABLE tickets").unwrap();
    let rule = rule(Group::inclusive());
    assert!(provider.get_targets(&rule, TICKET_CLASS).is_none());
    assert!(matches!(provider.try_get_targets(&rule, TICKET_CLASS), Err(Error::Storage(_))));
}

#[test]
fn build_query_exposes_compiled_sql() {
    let group = Group::inclusive().with_condition(cond("status", "eq", "open"));
    let query = provider().build_query(&group, TICKET_CLASS).unwrap();
    assert_eq!(query.to_string(), "SELECT t.* FROM tickets AS t WHERE t.status = :status_1");
}
