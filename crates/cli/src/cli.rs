// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::help;

/// Parse an RFC 3339 timestamp for `--now`.
fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("{e} (expected RFC 3339, e.g. 2026-03-10T12:00:00Z)"))
}

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Authored file kinds with a JSON Schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    /// Rule files
    Rule,
    /// Automation configuration files
    Config,
}

#[derive(Parser, Debug)]
#[command(name = "desk-rules")]
#[command(styles = help::styles())]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate helpdesk automation rules against a ticket database")]
#[command(
    long_about = "Evaluate helpdesk automation rules against a ticket database.\n\n\
    Rules are nested AND/OR groups of conditions, written as TOML or JSON. They are \
    compiled to SQL for a configured target type and run against the SQLite store."
)]
pub struct Cli {
    /// Automation configuration (.toml or .json); defaults to the built-in helpdesk schema
    #[arg(short, long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Helpdesk database
    #[arg(long, global = true, value_name = "path")]
    pub db: Option<PathBuf>,

    /// Reference time for relative-time conditions (RFC 3339)
    #[arg(long, global = true, value_name = "time", value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the entities a rule matches
    Targets {
        /// Rule file (.toml or .json)
        rule: PathBuf,

        /// Entity class to evaluate against instead of the rule's own target
        #[arg(long, value_parser = non_empty_string)]
        class: Option<String>,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Show the SQL a rule compiles to
    Explain {
        /// Rule file (.toml or .json)
        rule: PathBuf,

        /// Entity class to compile against instead of the rule's own target
        #[arg(long, value_parser = non_empty_string)]
        class: Option<String>,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Preview the notification for a ticket's latest change
    Notify {
        /// Ticket key, e.g. SUP-12
        #[arg(value_parser = non_empty_string)]
        ticket: String,

        /// Recipient e-mail address
        #[arg(short, long, value_parser = non_empty_string)]
        recipient: String,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Output the JSON Schema of rule or configuration files
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },

    /// Generate a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
