// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use clap::CommandFactory;
use yare::parameterized;

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn targets_with_globals() {
    let cli = Cli::try_parse_from([
        "desk-rules",
        "targets",
        "rule.toml",
        "--db",
        "desk.db",
        "--now",
        "2026-03-10T12:00:00Z",
        "-o",
        "json",
    ])
    .unwrap();
    assert_eq!(cli.db, Some(PathBuf::from("desk.db")));
    assert_eq!(cli.now, Some(Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()));
    match cli.command {
        Command::Targets { rule, class, output } => {
            assert_eq!(rule, PathBuf::from("rule.toml"));
            assert_eq!(class, None);
            assert_eq!(output, OutputFormat::Json);
        }
        other => unreachable!("parsed {other:?}"),
    }
}

#[test]
fn notify_requires_recipient() {
    assert!(Cli::try_parse_from(["desk-rules", "notify", "SUP-1"]).is_err());
    let cli = Cli::try_parse_from(["desk-rules", "notify", "SUP-1", "-r", "a@b.c"]).unwrap();
    assert!(matches!(cli.command, Command::Notify { ref recipient, .. } if recipient == "a@b.c"));
}

#[parameterized(
    bad_now = { &["desk-rules", "--now", "yesterday", "explain", "r.toml"] },
    empty_class = { &["desk-rules", "explain", "r.toml", "--class", " "] },
    bad_output = { &["desk-rules", "explain", "r.toml", "-o", "yaml"] },
)]
fn rejects(args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn schema_and_completions_parse() {
    let cli = Cli::try_parse_from(["desk-rules", "schema", "config"]).unwrap();
    assert!(matches!(cli.command, Command::Schema { kind: SchemaKind::Config }));
    let cli = Cli::try_parse_from(["desk-rules", "completions", "zsh"]).unwrap();
    assert!(matches!(cli.command, Command::Completions { shell: Shell::Zsh }));
    assert!(Cli::try_parse_from(["desk-rules", "schema", "ticket"]).is_err());
}
