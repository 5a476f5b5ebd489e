// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Target entity retrieval: compile a rule and run it against storage.

use tracing::{debug, warn};

use crate::compiler::QueryCompiler;
use crate::error::Result;
use crate::group::{Group, Rule};
use crate::query::Query;
use crate::storage::{Record, Storage};

/// Finds the entities a rule applies to.
pub struct TargetEntityProvider<S> {
    compiler: QueryCompiler,
    storage: S,
}

impl<S: Storage> TargetEntityProvider<S> {
    pub fn new(compiler: QueryCompiler, storage: S) -> Self {
        TargetEntityProvider { compiler, storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn compiler(&self) -> &QueryCompiler {
        &self.compiler
    }

    /// Compile `group` against the target bound to `target_class`.
    pub fn build_query(&self, group: &Group, target_class: &str) -> Result<Query> {
        self.compiler.build_query(group, target_class)
    }

    /// Matching targets of `rule`, or the error that prevented evaluation.
    pub fn try_get_targets(&self, rule: &Rule, target_class: &str) -> Result<Vec<Record>> {
        let query = self.compiler.build_query(&rule.grouping, target_class)?;
        let records = self.storage.execute(&query)?;
        debug!(rule = %rule.name, matches = records.len(), "evaluated rule");
        Ok(records)
    }

    /// Matching targets of `rule`, or `None` when the rule could not be
    /// evaluated. The failure is logged, not returned; use
    /// [`TargetEntityProvider::try_get_targets`] to tell failure from an
    /// empty match.
    pub fn get_targets(&self, rule: &Rule, target_class: &str) -> Option<Vec<Record>> {
        match self.try_get_targets(rule, target_class) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(rule = %rule.name, target_class, error = %e, "rule evaluation failed");
                None
            }
        }
    }

    /// Matching targets of `rule` against its own target type.
    pub fn get_rule_targets(&self, rule: &Rule) -> Result<Vec<Record>> {
        let query = self.compiler.build_rule_query(rule)?;
        let records = self.storage.execute(&query)?;
        debug!(rule = %rule.name, matches = records.len(), "evaluated rule");
        Ok(records)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
