// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Change notifications.
//!
//! An audit entry is diffed into a list of [`Change`]s, and an
//! [`EntityProcessor`] turns the changes of one entity into the options an
//! e-mail template is rendered with. Rendering itself happens elsewhere.

use serde::Serialize;
use tracing::debug;

use crate::audit::{AuditAction, AuditEntry, AuditRepository, ATTACHMENT_OBJECT};
use crate::error::Result;
use crate::ticket::Ticket;
use crate::user::{User, UserService};
use crate::value::Value;

/// Separates the quoted history from the reply area in e-mails.
pub const EMAIL_TEMPLATE_DELIMITER: &str = "<!-- Please reply above this line -->";

/// One changed field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    field_name: String,
    old_value: Value,
    new_value: Value,
}

impl Change {
    pub fn new(field_name: &str, old_value: Value, new_value: Value) -> Self {
        Change {
            field_name: field_name.to_string(),
            old_value,
            new_value,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn old_value(&self) -> &Value {
        &self.old_value
    }

    pub fn new_value(&self) -> &Value {
        &self.new_value
    }

    pub fn set_new_value(&mut self, value: impl Into<Value>) {
        self.new_value = value.into();
    }
}

/// One change per logged field, in logged order.
pub fn extract_changes(entry: &AuditEntry) -> Vec<Change> {
    entry
        .data
        .iter()
        .map(|diff| Change::new(&diff.field, diff.old.clone(), diff.new.clone()))
        .collect()
}

/// Changes of an entity and of the entities it owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityChanges {
    pub fields: Vec<Change>,
    /// Latest change of each attachment.
    pub attachments: Vec<Change>,
}

/// Template paths of an entity's notification e-mails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailTemplates {
    pub html: &'static str,
    pub txt: &'static str,
}

/// Who a notification goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A registered account.
    User(User),
    /// An address with no account behind it.
    Email(String),
}

impl Recipient {
    /// Resolve an address to an account when one is registered.
    pub fn resolve(users: &dyn UserService, email: &str) -> Result<Self> {
        Ok(match users.user_by_email(email)? {
            Some(user) => Recipient::User(user),
            None => Recipient::Email(email.to_string()),
        })
    }

    /// Staff recipients get links into the back office.
    pub fn is_oro_user(&self) -> bool {
        match self {
            Recipient::User(user) => user.is_oro_user(),
            Recipient::Email(_) => false,
        }
    }
}

/// What happened, to which entity, with which changes.
#[derive(Debug, Clone)]
pub struct NotificationContext<E> {
    pub action: AuditAction,
    pub target: E,
    pub changeset: Vec<Change>,
}

/// Options an e-mail template is rendered with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateOptions {
    pub delimiter: String,
    pub header: String,
    /// Full name of the reporter.
    pub user: String,
    pub changes: Vec<Change>,
    pub ticket_key: String,
    pub is_oro_user: bool,
    pub attachments: bool,
}

/// Per-entity notification content.
pub trait EntityProcessor {
    type Entity;

    fn email_templates(&self) -> EmailTemplates;

    fn entity_changes(
        &self,
        entity: &Self::Entity,
        entry: &AuditEntry,
        audit: &dyn AuditRepository,
    ) -> Result<EntityChanges>;

    fn create_text(&self) -> &'static str;

    fn update_text(&self) -> &'static str;

    fn delete_text(&self) -> &'static str;

    fn format_subject(&self, entity: &Self::Entity) -> String;

    fn email_template_options(
        &self,
        context: &NotificationContext<Self::Entity>,
        users: &dyn UserService,
        recipient_email: &str,
    ) -> Result<EmailTemplateOptions>;

    /// Header line for an action.
    fn header(&self, action: AuditAction) -> &'static str {
        match action {
            AuditAction::Create => self.create_text(),
            AuditAction::Update => self.update_text(),
            AuditAction::Remove => self.delete_text(),
        }
    }
}

/// Notification content of tickets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketProcessor;

impl TicketProcessor {
    pub fn moved_text(&self) -> &'static str {
        "Ticket was moved"
    }
}

impl EntityProcessor for TicketProcessor {
    type Entity = Ticket;

    fn email_templates(&self) -> EmailTemplates {
        EmailTemplates {
            html: "ticket/notification.html",
            txt: "ticket/notification.txt",
        }
    }

    fn entity_changes(
        &self,
        ticket: &Ticket,
        entry: &AuditEntry,
        audit: &dyn AuditRepository,
    ) -> Result<EntityChanges> {
        let mut changes = EntityChanges {
            fields: extract_changes(entry),
            attachments: Vec::new(),
        };
        for attachment in &ticket.attachments {
            let entries = audit.log_entries(ATTACHMENT_OBJECT, attachment.id)?;
            if let Some(latest) = entries.first() {
                changes.attachments.extend(extract_changes(latest));
            }
        }
        debug!(
            ticket = %ticket.key,
            fields = changes.fields.len(),
            attachments = changes.attachments.len(),
            "collected ticket changes"
        );
        Ok(changes)
    }

    fn create_text(&self) -> &'static str {
        "Ticket was created"
    }

    fn update_text(&self) -> &'static str {
        "Ticket was updated"
    }

    fn delete_text(&self) -> &'static str {
        "Ticket was deleted"
    }

    fn format_subject(&self, ticket: &Ticket) -> String {
        format!("[{}] {}", ticket.key, ticket.subject)
    }

    fn email_template_options(
        &self,
        context: &NotificationContext<Ticket>,
        users: &dyn UserService,
        recipient_email: &str,
    ) -> Result<EmailTemplateOptions> {
        let ticket = &context.target;
        let reporter = users.fetch_user_details(&ticket.reporter)?;
        let recipient = Recipient::resolve(users, recipient_email)?;

        let mut changes = context.changeset.clone();
        let mut branch_changed = false;
        for change in &mut changes {
            match change.field_name() {
                "branch" => branch_changed = true,
                "reporter" => change.set_new_value(reporter.full_name.clone()),
                _ => {}
            }
        }

        let header = if branch_changed && changes.len() == 1 {
            self.moved_text()
        } else {
            self.header(context.action)
        };

        Ok(EmailTemplateOptions {
            delimiter: EMAIL_TEMPLATE_DELIMITER.to_string(),
            header: header.to_string(),
            user: reporter.full_name,
            changes,
            ticket_key: ticket.key.clone(),
            is_oro_user: recipient.is_oro_user(),
            attachments: false,
        })
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
