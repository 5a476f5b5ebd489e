// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::{DateTime, Duration, TimeZone, Utc};
use desk_core::{
    AuditAction, AuditEntry, Database, FieldDiff, Status, Ticket, User, UserDetails,
};

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub const NOW: &str = "2026-03-10T12:00:00Z";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

/// The binary, isolated from the caller's environment.
pub fn desk() -> Command {
    let mut cmd = cargo_bin_cmd!("desk-rules");
    cmd.env_remove("DESK_CONFIG")
        .env_remove("DESK_DB")
        .env_remove("DESK_LOG");
    cmd
}

/// A temp directory holding `desk.db` with three tickets:
/// SUP-1 (old, high, north branch), SUP-2 (fresh, low, open),
/// SUP-3 (old, closed). SUP-1 has one logged status change.
pub fn seeded() -> TempDir {
    let temp = TempDir::new().unwrap();
    let db = Database::open(&db_path(&temp)).unwrap();
    for (user, email, name) in [
        (User::diamante(4), "ann@example.com", "Ann Customer"),
        (User::oro(7), "sam@helpdesk.test", "Sam Agent"),
    ] {
        db.create_user(&UserDetails {
            user,
            email: email.into(),
            full_name: name.into(),
        })
        .unwrap();
    }
    let north = db.create_branch("North Office").unwrap();

    let mut old = Ticket::new(
        "SUP-1",
        "Printer jammed",
        User::diamante(4),
        now() - Duration::hours(30),
    );
    old.priority = "high".into();
    old.branch = Some(north);
    old.assignee = Some(7);
    let id = db.create_ticket(&old).unwrap();

    let mut fresh = Ticket::new("SUP-2", "VPN down", User::diamante(4), now() - Duration::hours(2));
    fresh.priority = "low".into();
    fresh.status = Status::Open;
    db.create_ticket(&fresh).unwrap();

    let mut closed = Ticket::new(
        "SUP-3",
        "Password reset",
        User::diamante(4),
        now() - Duration::hours(50),
    );
    closed.status = Status::Closed;
    db.create_ticket(&closed).unwrap();

    db.log_change(
        &AuditEntry::new("Ticket", id, AuditAction::Update, now() - Duration::hours(1))
            .with_diff(FieldDiff::new("status", "new", "open")),
    )
    .unwrap();
    temp
}

pub fn db_path(temp: &TempDir) -> PathBuf {
    temp.path().join("desk.db")
}

/// Write a file into the temp directory and return its path.
pub fn write_file(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub fn write_rule(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    write_file(temp, name, content)
}

pub const STALE_RULE: &str = r#"
name = "stale"
target = "ticket"

[grouping]
connector = "and"

[[grouping.conditions]]
type = "created"
parameters = { operator = "gt", value = 24 }

[[grouping.conditions]]
type = "status"
parameters = { operator = "neq", value = "closed" }
"#;
