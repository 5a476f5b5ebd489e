// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! desk_cli - command-line runner for helpdesk automation rules.
//!
//! The `desk-rules` binary loads an automation configuration and rule files,
//! compiles rules with [`desk_core::QueryCompiler`], and evaluates them
//! against a helpdesk SQLite database.
//!
//! ```rust,ignore
//! use clap::Parser;
//! use desk_cli::{run, Cli};
//!
//! let cli = Cli::parse_from(["desk-rules", "explain", "rules/stale.toml"]);
//! run(cli)?;
//! ```

mod cli;
mod commands;
pub mod env;
pub mod error;
pub mod help;
pub mod logging;

pub use cli::{Cli, Command, OutputFormat, SchemaKind};
pub use commands::Context;
pub use error::{Error, Result};

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Targets {
            rule,
            class,
            output,
        } => commands::targets::run(&Context::from_cli(&cli)?, rule, class.as_deref(), *output),
        Command::Explain {
            rule,
            class,
            output,
        } => commands::explain::run(&Context::from_cli(&cli)?, rule, class.as_deref(), *output),
        Command::Notify {
            ticket,
            recipient,
            output,
        } => commands::notify::run(&Context::from_cli(&cli)?, ticket, recipient, *output),
        // Neither reads configuration nor the database.
        Command::Schema { kind } => commands::schema::run(*kind),
        Command::Completions { shell } => commands::completions::run(*shell),
    }
}
