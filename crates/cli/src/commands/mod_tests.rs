// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use clap::Parser;
use desk_core::{ConditionDefinition, ConditionParameters, Error as CoreError, Group, Value};

use crate::error::Error;

fn stale_rule() -> Rule {
    Rule::new(
        "stale",
        "ticket",
        Group::inclusive().with_condition(ConditionDefinition::new(
            "updated",
            ConditionParameters::new("gt", 24_i64),
        )),
    )
}

#[test]
fn target_class_defaults_to_rule_target() {
    let ctx = test_context();
    assert_eq!(ctx.target_class(&stale_rule(), None).unwrap(), "Ticket");
}

#[test]
fn explicit_class_wins() {
    let ctx = test_context();
    assert_eq!(ctx.target_class(&stale_rule(), Some("Other")).unwrap(), "Other");
}

#[test]
fn unknown_rule_target_is_a_configuration_error() {
    let ctx = test_context();
    let rule = Rule::new("r", "invoice", Group::inclusive());
    let err = ctx.target_class(&rule, None).unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::Configuration(_))));
}

#[test]
fn compiler_uses_pinned_now() {
    let ctx = test_context();
    let query = ctx.compiler().build_rule_query(&stale_rule()).unwrap();
    let statement = query.to_sql().unwrap();
    let cutoff = Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap();
    assert_eq!(statement.params, vec![Value::Timestamp(cutoff)]);
}

#[test]
fn from_cli_reads_flags() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("automation.toml");
    std::fs::write(
        &config,
        r#"
[targets.ticket]
class = "Ticket"
table = "tickets"

[targets.ticket.fields.key]
field = "key"
type = "text"
"#,
    )
    .unwrap();
    let db = dir.path().join("help.db");
    let cli = Cli::try_parse_from([
        "desk-rules",
        "--config",
        config.to_str().unwrap(),
        "--db",
        db.to_str().unwrap(),
        "explain",
        "rule.toml",
    ])
    .unwrap();

    let ctx = Context::from_cli(&cli).unwrap();
    assert_eq!(ctx.db_path, db);
    assert_eq!(ctx.now, None);
    let entity = ctx.config.entity_configuration("ticket").unwrap();
    assert_eq!(entity.fields.len(), 1);
}

#[test]
fn from_cli_rejects_unknown_config_format() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("automation.yaml");
    std::fs::write(&config, "targets: {}").unwrap();
    let cli = Cli::try_parse_from([
        "desk-rules",
        "--config",
        config.to_str().unwrap(),
        "explain",
        "rule.toml",
    ])
    .unwrap();
    assert!(Context::from_cli(&cli).is_err());
}
