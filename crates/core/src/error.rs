// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for desk-core operations.

use thiserror::Error;

/// All possible errors that can occur while compiling or evaluating rules.
///
/// Every variant except [`Error::Storage`] aborts compilation of the whole
/// rule. Storage failures abort execution; [`crate::TargetEntityProvider::get_targets`]
/// collapses all of them into "no targets".
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration for rule: {0}")]
    Configuration(String),

    #[error("cannot resolve condition: {0}")]
    ConditionResolution(String),

    #[error("unknown field '{property}' for target '{target}'")]
    UnknownField { target: String, property: String },

    #[error("operator '{operator}' does not exist for '{property}'\n  hint: supported operators are: {}", crate::operator::Operator::valid_names())]
    UnsupportedOperator { property: String, operator: String },

    #[error("invalid user identifier: '{0}'\n  hint: expected <kind>_<id> with kind oro or diamante")]
    InvalidUser(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: new, open, pending, in_progress, closed, on_hold")]
    InvalidStatus(String),

    #[error("invalid source: '{0}'\n  hint: valid sources are: phone, email, web")]
    InvalidSource(String),

    #[error("invalid audit action: '{0}'")]
    InvalidAuditAction(String),

    #[error("ticket not found: {0}")]
    TicketNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for desk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
