// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Audit log entries.
//!
//! Every change to a tracked entity is logged as one [`AuditEntry`] holding
//! the old and new value of each changed field. Notifications are built from
//! these entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::Value;

/// Audit object class of tickets.
pub const TICKET_OBJECT: &str = "Ticket";
/// Audit object class of ticket attachments.
pub const ATTACHMENT_OBJECT: &str = "Attachment";

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Remove,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Remove => "remove",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(AuditAction::Create),
            "update" => Ok(AuditAction::Update),
            "remove" => Ok(AuditAction::Remove),
            _ => Err(Error::InvalidAuditAction(s.to_string())),
        }
    }
}

/// Old and new value of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    #[serde(default)]
    pub old: Value,
    #[serde(default)]
    pub new: Value,
}

impl FieldDiff {
    pub fn new(field: &str, old: impl Into<Value>, new: impl Into<Value>) -> Self {
        FieldDiff {
            field: field.to_string(),
            old: old.into(),
            new: new.into(),
        }
    }
}

/// One logged change of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub object_class: String,
    pub object_id: i64,
    pub action: AuditAction,
    /// Per-object version, increasing with every change.
    pub version: i64,
    pub logged_at: DateTime<Utc>,
    /// Changed fields in the order they were logged.
    pub data: Vec<FieldDiff>,
}

impl AuditEntry {
    pub fn new(
        object_class: &str,
        object_id: i64,
        action: AuditAction,
        logged_at: DateTime<Utc>,
    ) -> Self {
        AuditEntry {
            object_class: object_class.to_string(),
            object_id,
            action,
            version: 1,
            logged_at,
            data: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    pub fn with_diff(mut self, diff: FieldDiff) -> Self {
        self.data.push(diff);
        self
    }
}

/// Read access to the audit log.
pub trait AuditRepository {
    /// Entries of one object, newest first.
    fn log_entries(&self, object_class: &str, object_id: i64) -> Result<Vec<AuditEntry>>;
}

impl<R: AuditRepository> AuditRepository for &R {
    fn log_entries(&self, object_class: &str, object_id: i64) -> Result<Vec<AuditEntry>> {
        (*self).log_entries(object_class, object_id)
    }
}
