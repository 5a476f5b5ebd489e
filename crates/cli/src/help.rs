// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help output styling.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use clap::builder::styling::Styles;

/// ANSI 256-color codes for help output.
pub mod codes {
    /// Section headers
    pub const HEADER: u8 = 74;
    /// Commands and flags
    pub const LITERAL: u8 = 250;
    /// Placeholders and possible values
    pub const CONTEXT: u8 = 245;
}

/// Decide on colors from `NO_COLOR`, `COLOR` and whether stdout is a TTY.
pub(crate) fn colorize(no_color: Option<&str>, force: Option<&str>, is_tty: bool) -> bool {
    if no_color == Some("1") {
        return false;
    }
    if force == Some("1") {
        return true;
    }
    is_tty
}

/// Check if colors should be enabled for this process.
pub fn should_colorize() -> bool {
    colorize(
        std::env::var("NO_COLOR").ok().as_deref(),
        std::env::var("COLOR").ok().as_deref(),
        std::io::stdout().is_terminal(),
    )
}

/// Clap styles for help output.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let header = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER))));
    let literal = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL))));
    let context = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT))));

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(literal)
        .placeholder(context)
        .valid(context)
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
