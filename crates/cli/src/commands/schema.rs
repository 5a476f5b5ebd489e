// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON Schema output for the files users author.

use schemars::schema::RootSchema;
use schemars::schema_for;

use desk_core::{AutomationConfig, Rule};

use crate::cli::SchemaKind;
use crate::error::Result;

pub fn run(kind: SchemaKind) -> Result<()> {
    let json = serde_json::to_string_pretty(&schema(kind))?;
    println!("{json}");
    Ok(())
}

pub(crate) fn schema(kind: SchemaKind) -> RootSchema {
    match kind {
        SchemaKind::Rule => schema_for!(Rule),
        SchemaKind::Config => schema_for!(AutomationConfig),
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
