// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule-to-query compilation.
//!
//! [`QueryCompiler`] walks a group tree depth-first. A group with children
//! combines its compiled children; a leaf group resolves each condition
//! through the [`ConditionFactory`], rewrites relative-time values, and
//! dispatches to the field strategy registered for the resolved field.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::condition::{Condition, ConditionFactory};
use crate::config::AutomationConfig;
use crate::error::{Error, Result};
use crate::group::{Group, Rule};
use crate::priority::PriorityWeights;
use crate::query::{Predicate, Query, QueryBuilder};
use crate::strategy::{compile_default, StrategyRegistry};
use crate::target::{ConfigurationProvider, MetadataResolver, TargetContext};
use crate::value::Value;

/// State of one compilation: the target, the reference time, and the
/// builder collecting parameters and joins.
pub struct Evaluation<'a> {
    pub target: TargetContext<'a>,
    /// "Now" for relative-time conditions, fixed for the whole rule.
    pub now: DateTime<Utc>,
    pub builder: QueryBuilder,
}

/// Compiles rules into queries. Immutable once built and shareable across
/// threads; every compilation gets its own [`Evaluation`].
pub struct QueryCompiler {
    config: Arc<dyn ConfigurationProvider>,
    metadata: Arc<dyn MetadataResolver>,
    priorities: Arc<PriorityWeights>,
    clock: Arc<dyn Clock>,
    factory: ConditionFactory,
    strategies: StrategyRegistry,
}

impl QueryCompiler {
    /// A compiler over one configuration, using its priority table and
    /// strategy registry, the default condition types, and the system clock.
    pub fn new(config: Arc<AutomationConfig>) -> Self {
        QueryCompiler {
            priorities: Arc::new(config.priority.clone()),
            strategies: config.strategy_registry(),
            factory: ConditionFactory::default(),
            clock: Arc::new(SystemClock),
            metadata: config.clone(),
            config,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_priorities(mut self, priorities: Arc<PriorityWeights>) -> Self {
        self.priorities = priorities;
        self
    }

    pub fn with_condition_factory(mut self, factory: ConditionFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn with_strategies(mut self, strategies: StrategyRegistry) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_metadata(mut self, metadata: Arc<dyn MetadataResolver>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn configuration(&self) -> &dyn ConfigurationProvider {
        &*self.config
    }

    /// Compile `group` against the target type bound to `target_class`.
    pub fn build_query(&self, group: &Group, target_class: &str) -> Result<Query> {
        let target = self.config.target_by_class(target_class)?;
        self.build_target_query(group, target)
    }

    /// Compile a rule against its own target type.
    pub fn build_rule_query(&self, rule: &Rule) -> Result<Query> {
        debug!(rule = %rule.name, target_type = %rule.target, "compiling rule");
        self.build_target_query(&rule.grouping, &rule.target)
    }

    fn build_target_query(&self, group: &Group, target: &str) -> Result<Query> {
        let entity = self.config.entity_configuration(target)?;
        let mut eval = Evaluation {
            target: TargetContext {
                name: target,
                entity,
                metadata: &*self.metadata,
            },
            now: self.clock.now(),
            builder: QueryBuilder::select_from(entity.table.clone()),
        };
        let predicate = self.compile_group(group, &mut eval)?;
        let query = eval.builder.into_query(predicate);
        debug!(target_type = target, query = %query, params = query.params.len(), "compiled query");
        Ok(query)
    }

    /// Compile one group. Children take precedence over the group's own
    /// conditions, which are then never resolved.
    pub fn compile_group(&self, group: &Group, eval: &mut Evaluation<'_>) -> Result<Predicate> {
        let connector = group.connector()?;
        let mut terms = Vec::new();
        if group.has_children() {
            for child in &group.children {
                terms.push(self.compile_group(child, eval)?);
            }
        } else {
            for definition in &group.conditions {
                let condition = self.factory.get_condition(
                    &definition.condition_type,
                    &definition.parameters,
                    &eval.target,
                )?;
                terms.push(self.compile_condition(&condition, eval)?);
            }
        }
        Ok(connector.combine(terms))
    }

    /// Compile one resolved condition into a predicate.
    pub fn compile_condition(
        &self,
        condition: &Condition,
        eval: &mut Evaluation<'_>,
    ) -> Result<Predicate> {
        let (property, mut op, value) = condition.export();
        let mut value = value.clone();

        if self.config.is_datetime_property(eval.target.name, property) {
            op = op.time_mirror().ok_or_else(|| Error::UnsupportedOperator {
                property: property.to_string(),
                operator: op.to_string(),
            })?;
            value = hours_ago(eval.now, property, &value)?;
        }

        let field = eval.target.field(property)?.field.as_str();
        match self.strategies.resolve(field, op) {
            Some(strategy) => {
                debug!(property, field, strategy = strategy.name(), %op, "field strategy");
                strategy.compile(&mut eval.builder, field, op, value, &self.priorities)
            }
            None => Ok(compile_default(&mut eval.builder, field, op, value)),
        }
    }
}

/// `now - hours`, as a timestamp value.
#[allow(clippy::cast_possible_truncation)]
fn hours_ago(now: DateTime<Utc>, property: &str, value: &Value) -> Result<Value> {
    let out_of_range = || {
        Error::ConditionResolution(format!(
            "'{property}' expects a non-negative number of hours, got {value}"
        ))
    };
    let hours = value.as_hours().ok_or_else(out_of_range)?;
    let delta = Duration::try_milliseconds((hours * 3_600_000.0).round() as i64)
        .ok_or_else(out_of_range)?;
    now.checked_sub_signed(delta).map(Value::Timestamp).ok_or_else(out_of_range)
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
