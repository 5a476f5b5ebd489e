// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Log filter directives from `DESK_LOG`, e.g. `desk_core=debug`.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::DESK_LOG).ok().filter(|v| !v.is_empty())
}

/// Returns the value of `DESK_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::DESK_CONFIG).ok().map(PathBuf::from)
}

/// Returns the value of `DESK_DB` if set.
pub fn db_path() -> Option<PathBuf> {
    std::env::var(vars::DESK_DB).ok().map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
