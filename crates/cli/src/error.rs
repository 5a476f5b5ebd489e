// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the desk-rules CLI.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] desk_core::Error),

    #[error("no changes logged for ticket {0}\n  hint: notifications are built from the ticket's audit log")]
    NoChanges(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;
