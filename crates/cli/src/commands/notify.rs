// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use desk_core::audit::TICKET_OBJECT;
use desk_core::notification::{EmailTemplates, EntityChanges};
use desk_core::{
    AuditRepository, Change, Database, EmailTemplateOptions, EntityProcessor,
    NotificationContext, TicketProcessor,
};

use super::Context;
use crate::cli::OutputFormat;
use crate::error::{Error, Result};

/// Everything needed to render one notification e-mail.
#[derive(Serialize)]
pub(crate) struct NotificationPreview {
    subject: String,
    templates: Templates,
    options: EmailTemplateOptions,
    attachment_changes: Vec<Change>,
}

#[derive(Serialize)]
struct Templates {
    html: &'static str,
    txt: &'static str,
}

impl From<EmailTemplates> for Templates {
    fn from(t: EmailTemplates) -> Self {
        Templates {
            html: t.html,
            txt: t.txt,
        }
    }
}

pub fn run(ctx: &Context, ticket: &str, recipient: &str, output: OutputFormat) -> Result<()> {
    let db = ctx.open_db()?;
    println!("{}", run_impl(&db, ticket, recipient, output)?);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(
    db: &Database,
    ticket_key: &str,
    recipient: &str,
    output: OutputFormat,
) -> Result<String> {
    let preview = build_preview(db, ticket_key, recipient)?;
    match output {
        OutputFormat::Text => Ok(render_text(&preview)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&preview)?),
    }
}

pub(crate) fn build_preview(
    db: &Database,
    ticket_key: &str,
    recipient: &str,
) -> Result<NotificationPreview> {
    let processor = TicketProcessor;
    let ticket = db.get_ticket(ticket_key)?;
    let entry = db
        .log_entries(TICKET_OBJECT, ticket.id)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoChanges(ticket.key.clone()))?;

    let EntityChanges {
        fields,
        attachments,
    } = processor.entity_changes(&ticket, &entry, db)?;
    let subject = processor.format_subject(&ticket);
    let context = NotificationContext {
        action: entry.action,
        target: ticket,
        changeset: fields,
    };
    let options = processor.email_template_options(&context, db, recipient)?;

    Ok(NotificationPreview {
        subject,
        templates: processor.email_templates().into(),
        options,
        attachment_changes: attachments,
    })
}

fn render_change(out: &mut String, change: &Change) {
    out.push_str(&format!(
        "\n  {}: {} -> {}",
        change.field_name(),
        change.old_value(),
        change.new_value()
    ));
}

pub(crate) fn render_text(preview: &NotificationPreview) -> String {
    let options = &preview.options;
    let mut out = String::new();
    out.push_str(&format!("Subject:  {}\n", preview.subject));
    out.push_str(&format!("Template: {}\n", preview.templates.html));
    out.push_str(&format!("{}\n", options.delimiter));
    out.push_str(&format!("{}\n", options.header));
    out.push_str(&format!("Reporter: {}", options.user));
    if !options.changes.is_empty() {
        out.push_str("\n\nChanges:");
        for change in &options.changes {
            render_change(&mut out, change);
        }
    }
    if !preview.attachment_changes.is_empty() {
        out.push_str("\n\nAttachments:");
        for change in &preview.attachment_changes {
            render_change(&mut out, change);
        }
    }
    if options.is_oro_user {
        out.push_str(&format!("\n\nStaff link: {}", options.ticket_key));
    }
    out
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
