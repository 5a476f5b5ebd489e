// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Helpdesk tickets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::user::User;

/// Workflow status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Initial state for new tickets.
    New,
    Open,
    /// Waiting on the customer.
    Pending,
    InProgress,
    Closed,
    OnHold,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Open => "open",
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Closed => "closed",
            Status::OnHold => "on_hold",
        }
    }

    pub fn is_closed(&self) -> bool {
        *self == Status::Closed
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Status::New),
            "open" => Ok(Status::Open),
            "pending" => Ok(Status::Pending),
            "in_progress" => Ok(Status::InProgress),
            "closed" => Ok(Status::Closed),
            "on_hold" => Ok(Status::OnHold),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Channel a ticket came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Phone,
    Email,
    Web,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Phone => "phone",
            Source::Email => "email",
            Source::Web => "web",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "phone" => Ok(Source::Phone),
            "email" => Ok(Source::Email),
            "web" => Ok(Source::Web),
            _ => Err(Error::InvalidSource(s.to_string())),
        }
    }
}

/// A file attached to a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub ticket_id: i64,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// A helpdesk ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Storage id. Zero until the ticket is stored.
    pub id: i64,
    /// Human-facing key, e.g. `SUP-12`.
    pub key: String,
    pub subject: String,
    pub description: Option<String>,
    pub status: Status,
    /// Priority value, one of the configured weighted values.
    pub priority: String,
    pub source: Source,
    /// Branch id.
    pub branch: Option<i64>,
    pub reporter: User,
    /// Id of the assigned staff user.
    pub assignee: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Ticket {
    /// A new, unassigned ticket with default priority and source.
    pub fn new(key: &str, subject: &str, reporter: User, now: DateTime<Utc>) -> Self {
        Ticket {
            id: 0,
            key: key.to_string(),
            subject: subject.to_string(),
            description: None,
            status: Status::New,
            priority: "medium".to_string(),
            source: Source::Web,
            branch: None,
            reporter,
            assignee: None,
            created_at: now,
            updated_at: now,
            attachments: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
