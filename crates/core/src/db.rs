// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed helpdesk storage.
//!
//! The [`Database`] struct holds tickets, branches, users, attachments and
//! the audit log, and executes compiled rule queries against them.

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

use crate::audit::{AuditAction, AuditEntry, AuditRepository, FieldDiff};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::storage::{Record, Storage};
use crate::ticket::{Attachment, Ticket};
use crate::user::{User, UserDetails, UserService};
use crate::value::{format_timestamp, Value};

/// SQL schema for the helpdesk database.
pub const SCHEMA: &str = r#"
-- Staff (oro) and customer (diamante) accounts
CREATE TABLE IF NOT EXISTS users (
    kind TEXT NOT NULL,
    id INTEGER NOT NULL,
    email TEXT NOT NULL UNIQUE,
    full_name TEXT NOT NULL,
    PRIMARY KEY (kind, id)
);

CREATE TABLE IF NOT EXISTS branches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Timestamps are RFC 3339 with second precision so text order is time order
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key TEXT NOT NULL UNIQUE,
    subject TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'new',
    priority TEXT NOT NULL DEFAULT 'medium',
    source TEXT NOT NULL DEFAULT 'web',
    branch INTEGER,
    reporter TEXT NOT NULL,        -- <kind>_<id>
    assignee INTEGER,              -- oro user id
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (branch) REFERENCES branches(id)
);

CREATE TABLE IF NOT EXISTS attachments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_id INTEGER NOT NULL,
    filename TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (ticket_id) REFERENCES tickets(id)
);

-- Field-level change log; data is a JSON array of {field, old, new}
CREATE TABLE IF NOT EXISTS audit_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    object_class TEXT NOT NULL,
    object_id INTEGER NOT NULL,
    action TEXT NOT NULL,
    version INTEGER NOT NULL,
    logged_at TEXT NOT NULL,
    data TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
CREATE INDEX IF NOT EXISTS idx_tickets_branch ON tickets(branch);
CREATE INDEX IF NOT EXISTS idx_attachments_ticket ON attachments(ticket_id);
CREATE INDEX IF NOT EXISTS idx_audit_object ON audit_log(object_class, object_id);
"#;

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Run schema creation and all migrations on a database connection.
///
/// Migrations are idempotent and upgrade databases created by older
/// releases that predate a column.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_source(conn)?;
    Ok(())
}

/// Migration: Add the ticket source channel.
fn migrate_add_source(conn: &Connection) -> Result<()> {
    let has_source: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('tickets') WHERE name = 'source'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);

    if !has_source {
        conn.execute(
            "ALTER TABLE tickets ADD COLUMN source TEXT NOT NULL DEFAULT 'web'",
            [],
        )?;
    }
    Ok(())
}

const TICKET_COLUMNS: &str = "id, key, subject, description, status, priority, source, branch,
     reporter, assignee, created_at, updated_at";

fn ticket_from_row(row: &Row<'_>) -> std::result::Result<Ticket, rusqlite::Error> {
    let status: String = row.get(4)?;
    let source: String = row.get(6)?;
    let reporter: String = row.get(8)?;
    let created: String = row.get(10)?;
    let updated: String = row.get(11)?;
    Ok(Ticket {
        id: row.get(0)?,
        key: row.get(1)?,
        subject: row.get(2)?,
        description: row.get(3)?,
        status: parse_db(&status, "status")?,
        priority: row.get(5)?,
        source: parse_db(&source, "source")?,
        branch: row.get(7)?,
        reporter: parse_db(&reporter, "reporter")?,
        assignee: row.get(9)?,
        created_at: parse_timestamp(&created, "created_at")?,
        updated_at: parse_timestamp(&updated, "updated_at")?,
        attachments: Vec::new(),
    })
}

/// SQLite database connection with helpdesk operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    pub fn create_user(&self, details: &UserDetails) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (kind, id, email, full_name) VALUES (?1, ?2, ?3, ?4)",
            params![
                details.user.kind.as_str(),
                details.user.id,
                details.email,
                details.full_name,
            ],
        )?;
        Ok(())
    }

    /// Create a branch and return its id.
    pub fn create_branch(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO branches (name) VALUES (?1)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Store a new ticket and return its id. The ticket's own `id` and
    /// attachments are ignored.
    pub fn create_ticket(&self, ticket: &Ticket) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tickets (key, subject, description, status, priority, source, branch,
             reporter, assignee, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                ticket.key,
                ticket.subject,
                ticket.description,
                ticket.status.as_str(),
                ticket.priority,
                ticket.source.as_str(),
                ticket.branch,
                ticket.reporter.to_string(),
                ticket.assignee,
                format_timestamp(&ticket.created_at),
                format_timestamp(&ticket.updated_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a ticket by key, including its attachments.
    pub fn get_ticket(&self, key: &str) -> Result<Ticket> {
        let ticket = self
            .conn
            .query_row(
                &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE key = ?1"),
                params![key],
                ticket_from_row,
            )
            .optional()?;

        let mut ticket = ticket.ok_or_else(|| Error::TicketNotFound(key.to_string()))?;
        ticket.attachments = self.get_attachments(ticket.id)?;
        Ok(ticket)
    }

    /// Attach a file to a ticket and return the attachment id.
    pub fn add_attachment(
        &self,
        ticket_id: i64,
        filename: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO attachments (ticket_id, filename, created_at) VALUES (?1, ?2, ?3)",
            params![ticket_id, filename, format_timestamp(&created_at)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_attachments(&self, ticket_id: i64) -> Result<Vec<Attachment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, ticket_id, filename, created_at FROM attachments
             WHERE ticket_id = ?1 ORDER BY id",
        )?;
        let attachments = stmt
            .query_map(params![ticket_id], |row| {
                let created: String = row.get(3)?;
                Ok(Attachment {
                    id: row.get(0)?,
                    ticket_id: row.get(1)?,
                    filename: row.get(2)?,
                    created_at: parse_timestamp(&created, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(attachments)
    }

    /// Append an audit entry and return its row id.
    pub fn log_change(&self, entry: &AuditEntry) -> Result<i64> {
        let data = serde_json::to_string(&entry.data)?;
        self.conn.execute(
            "INSERT INTO audit_log (object_class, object_id, action, version, logged_at, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.object_class,
                entry.object_id,
                entry.action.as_str(),
                entry.version,
                format_timestamp(&entry.logged_at),
                data,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

impl AuditRepository for Database {
    fn log_entries(&self, object_class: &str, object_id: i64) -> Result<Vec<AuditEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT object_class, object_id, action, version, logged_at, data FROM audit_log
             WHERE object_class = ?1 AND object_id = ?2
             ORDER BY version DESC, id DESC",
        )?;
        let rows = stmt
            .query_map(params![object_class, object_id], |row| {
                let action: String = row.get(2)?;
                let logged: String = row.get(4)?;
                let data: String = row.get(5)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    parse_db::<AuditAction>(&action, "action")?,
                    row.get::<_, i64>(3)?,
                    parse_timestamp(&logged, "logged_at")?,
                    data,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(object_class, object_id, action, version, logged_at, data)| {
                let data: Vec<FieldDiff> = serde_json::from_str(&data).map_err(|e| {
                    Error::CorruptedData(format!(
                        "invalid audit data for {object_class} {object_id}: {e}"
                    ))
                })?;
                Ok(AuditEntry {
                    object_class,
                    object_id,
                    action,
                    version,
                    logged_at,
                    data,
                })
            })
            .collect()
    }
}

impl UserService for Database {
    fn fetch_user_details(&self, user: &User) -> Result<UserDetails> {
        let found = self
            .conn
            .query_row(
                "SELECT email, full_name FROM users WHERE kind = ?1 AND id = ?2",
                params![user.kind.as_str(), user.id],
                |row| {
                    Ok(UserDetails {
                        user: *user,
                        email: row.get(0)?,
                        full_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        found.ok_or_else(|| Error::UserNotFound(user.to_string()))
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let found = self
            .conn
            .query_row(
                "SELECT kind, id FROM users WHERE email = ?1",
                params![email],
                |row| {
                    let kind: String = row.get(0)?;
                    Ok(User::new(parse_db(&kind, "kind")?, row.get(1)?))
                },
            )
            .optional()?;
        Ok(found)
    }
}

impl Storage for Database {
    fn execute(&self, query: &Query) -> Result<Vec<Record>> {
        let statement = query.to_sql()?;
        debug!(sql = %statement.sql, params = statement.params.len(), "executing query");

        let mut stmt = self.conn.prepare(&statement.sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let records = stmt
            .query_map(params_from_iter(statement.params.iter()), |row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, name)| Ok((name.clone(), Value::from(row.get_ref(i)?))))
                    .collect::<std::result::Result<Record, rusqlite::Error>>()
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
