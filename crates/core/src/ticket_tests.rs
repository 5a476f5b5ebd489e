// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    new = { "new", Status::New },
    open = { "open", Status::Open },
    pending = { "pending", Status::Pending },
    in_progress = { "in_progress", Status::InProgress },
    closed = { "closed", Status::Closed },
    on_hold = { "on_hold", Status::OnHold },
)]
fn status_round_trips(name: &str, status: Status) {
    assert_eq!(name.parse::<Status>().unwrap(), status);
    assert_eq!(status.to_string(), name);
}

#[test]
fn status_parse_is_case_insensitive() {
    assert_eq!("OPEN".parse::<Status>().unwrap(), Status::Open);
    assert!(matches!("resolved".parse::<Status>(), Err(Error::InvalidStatus(_))));
}

#[parameterized(
    phone = { "phone", Source::Phone },
    email = { "Email", Source::Email },
    web = { "web", Source::Web },
)]
fn source_parses(name: &str, source: Source) {
    assert_eq!(name.parse::<Source>().unwrap(), source);
}

#[test]
fn source_rejects_unknown() {
    assert!(matches!("fax".parse::<Source>(), Err(Error::InvalidSource(_))));
}

#[test]
fn new_ticket_defaults() {
    let now = Utc::now();
    let ticket = Ticket::new("SUP-1", "Printer jammed", User::diamante(4), now);
    assert_eq!(ticket.status, Status::New);
    assert_eq!(ticket.priority, "medium");
    assert_eq!(ticket.source, Source::Web);
    assert_eq!(ticket.created_at, ticket.updated_at);
    assert!(ticket.assignee.is_none());
    assert!(!ticket.status.is_closed());
}
