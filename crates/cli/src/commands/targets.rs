// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use serde::Serialize;
use tracing::info;

use desk_core::{Record, Rule, Storage, TargetEntityProvider, Value};

use super::{load_rule, Context};
use crate::cli::OutputFormat;
use crate::error::Result;

#[derive(Serialize)]
struct TargetsOutput<'a> {
    rule: &'a str,
    target: &'a str,
    count: usize,
    targets: &'a [Record],
}

pub fn run(ctx: &Context, rule: &Path, class: Option<&str>, output: OutputFormat) -> Result<()> {
    let rule = load_rule(rule)?;
    let db = ctx.open_db()?;
    let rendered = run_impl(ctx, &db, &rule, class, output)?;
    println!("{rendered}");
    Ok(())
}

/// Internal implementation that accepts storage for testing.
pub(crate) fn run_impl<S: Storage>(
    ctx: &Context,
    storage: S,
    rule: &Rule,
    class: Option<&str>,
    output: OutputFormat,
) -> Result<String> {
    let class = ctx.target_class(rule, class)?;
    let provider = TargetEntityProvider::new(ctx.compiler(), storage);
    let targets = provider.try_get_targets(rule, &class)?;
    info!(rule = %rule.name, class = %class, count = targets.len(), "evaluated rule");

    match output {
        OutputFormat::Text => Ok(render_text(&targets)),
        OutputFormat::Json => render_json(rule, &class, &targets),
    }
}

fn plain(value: &Value) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

/// Label of a record in text output: its key and subject when it has them.
fn record_label(record: &Record) -> String {
    match (record.get("key"), record.get("subject")) {
        (Some(key), Some(subject)) => format!("{}  {}", plain(key), plain(subject)),
        (Some(key), None) => plain(key),
        _ => serde_json::to_string(record).unwrap_or_default(),
    }
}

pub(crate) fn render_text(targets: &[Record]) -> String {
    if targets.is_empty() {
        return "No matching targets".to_string();
    }
    targets
        .iter()
        .map(record_label)
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn render_json(rule: &Rule, class: &str, targets: &[Record]) -> Result<String> {
    let output = TargetsOutput {
        rule: &rule.name,
        target: class,
        count: targets.len(),
        targets,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
#[path = "targets_tests.rs"]
mod tests;
