// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use serde::Serialize;

use desk_core::{Rule, SqlStatement, Value};

use super::{load_rule, Context};
use crate::cli::OutputFormat;
use crate::error::Result;

#[derive(Serialize)]
struct ExplainOutput<'a> {
    rule: &'a str,
    target: &'a str,
    table: &'a str,
    sql: &'a str,
    params: &'a [Value],
}

pub fn run(ctx: &Context, rule: &Path, class: Option<&str>, output: OutputFormat) -> Result<()> {
    let rule = load_rule(rule)?;
    println!("{}", run_impl(ctx, &rule, class, output)?);
    Ok(())
}

/// Compile without touching the database.
pub(crate) fn run_impl(
    ctx: &Context,
    rule: &Rule,
    class: Option<&str>,
    output: OutputFormat,
) -> Result<String> {
    let class = ctx.target_class(rule, class)?;
    let query = ctx.compiler().build_query(&rule.grouping, &class)?;
    let statement = query.to_sql()?;

    match output {
        OutputFormat::Text => Ok(render_text(rule, &class, &query.table, &statement)),
        OutputFormat::Json => {
            let output = ExplainOutput {
                rule: &rule.name,
                target: &class,
                table: &query.table,
                sql: &statement.sql,
                params: &statement.params,
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

pub(crate) fn render_text(
    rule: &Rule,
    class: &str,
    table: &str,
    statement: &SqlStatement,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Rule:   {}\n", rule.name));
    out.push_str(&format!("Target: {class} ({table})\n"));
    out.push_str(&format!("SQL:    {}", statement.sql));
    if !statement.params.is_empty() {
        out.push_str("\n\nParameters:");
        for (i, value) in statement.params.iter().enumerate() {
            out.push_str(&format!("\n  ?{} = {}", i + 1, value));
        }
    }
    out
}

#[cfg(test)]
#[path = "explain_tests.rs"]
mod tests;
