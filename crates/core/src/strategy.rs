// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-field compilation strategies.
//!
//! Most conditions compile to a plain `alias.field <op> :param` comparison.
//! Some fields need a semantic rewrite instead; those are registered in a
//! [`StrategyRegistry`] under either the field name alone or a
//! `(field, operator)` pair. Lookup order is exact field, then
//! field+operator, then the default comparison.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::operator::Operator;
use crate::priority::PriorityWeights;
use crate::query::{Column, Predicate, QueryBuilder};
use crate::user::{User, UserKind};
use crate::value::Value;

/// A many-to-one association from a target field to another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Association {
    /// Associated table.
    pub table: String,
    /// Column of `table` the target field references.
    #[serde(default = "default_key")]
    pub key: String,
    /// Human-readable column searched by "contains" conditions.
    #[serde(default = "default_display")]
    pub display: String,
}

fn default_key() -> String {
    "id".to_string()
}

fn default_display() -> String {
    "name".to_string()
}

/// A special-cased way of compiling conditions on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldStrategy {
    /// Join the association and substring-match its display column.
    AssociationContains { join: Association },
    /// Resolve a `<kind>_<id>` user identifier to the numeric id.
    IdentityLookup {
        /// Restrict identifiers to one account store.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        account: Option<UserKind>,
    },
    /// Expand a weighted-enum threshold into the set of values past it.
    WeightedRange,
}

impl FieldStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            FieldStrategy::AssociationContains { .. } => "association_contains",
            FieldStrategy::IdentityLookup { .. } => "identity_lookup",
            FieldStrategy::WeightedRange => "weighted_range",
        }
    }

    /// Compile one comparison on `field` into a predicate.
    pub fn compile(
        &self,
        qb: &mut QueryBuilder,
        field: &str,
        op: Operator,
        value: Value,
        priorities: &PriorityWeights,
    ) -> Result<Predicate> {
        if !op.takes_value() {
            return Ok(compile_default(qb, field, op, value));
        }
        match self {
            FieldStrategy::AssociationContains { join } => {
                let alias = qb.left_join(field, join);
                let value = match op {
                    Operator::Like | Operator::NotLike => {
                        Value::Text(format!("%{}%", contains_text(field, &value)?))
                    }
                    _ => value,
                };
                let param = qb.bind(field, value);
                Ok(Predicate::Compare {
                    column: Column::new(alias, join.display.clone()),
                    op,
                    param,
                })
            }
            FieldStrategy::IdentityLookup { account } => {
                let value = match value {
                    Value::List(items) => Value::List(
                        items
                            .iter()
                            .map(|item| lookup_user(field, item, *account))
                            .collect::<Result<_>>()?,
                    ),
                    scalar => lookup_user(field, &scalar, *account)?,
                };
                Ok(compile_default(qb, field, op, value))
            }
            FieldStrategy::WeightedRange => {
                let keep: fn(i64, i64) -> bool = match op {
                    Operator::Gt => |w, t| w > t,
                    Operator::Gte => |w, t| w >= t,
                    Operator::Lt => |w, t| w < t,
                    Operator::Lte => |w, t| w <= t,
                    _ => return Ok(compile_default(qb, field, op, value)),
                };
                let threshold = value.as_str().ok_or_else(|| {
                    Error::ConditionResolution(format!(
                        "'{field}' threshold must be a value name, got {value}"
                    ))
                })?;
                let matching = priorities.select(threshold, keep).ok_or_else(|| {
                    Error::ConditionResolution(format!("unknown {field} value '{threshold}'"))
                })?;
                if matching.is_empty() {
                    return Ok(Predicate::always_false());
                }
                let param = qb.bind(field, Value::from(matching));
                Ok(Predicate::Compare {
                    column: qb.column(field),
                    op: Operator::In,
                    param,
                })
            }
        }
    }
}

/// `alias.field <op> :param`, or a null check for value-less operators.
pub fn compile_default(
    qb: &mut QueryBuilder,
    field: &str,
    op: Operator,
    value: Value,
) -> Predicate {
    let column = qb.column(field);
    match op {
        Operator::IsNull => Predicate::IsNull { column, negated: false },
        Operator::IsNotNull => Predicate::IsNull { column, negated: true },
        _ => {
            let param = qb.bind(field, value);
            Predicate::Compare { column, op, param }
        }
    }
}

fn contains_text(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        other => Err(Error::ConditionResolution(format!(
            "'{field}' search term must be text, got {other}"
        ))),
    }
}

fn lookup_user(field: &str, value: &Value, account: Option<UserKind>) -> Result<Value> {
    let identifier = value.as_str().ok_or_else(|| {
        Error::ConditionResolution(format!("'{field}' expects a user identifier, got {value}"))
    })?;
    let user: User = identifier
        .parse()
        .map_err(|e: Error| Error::ConditionResolution(format!("'{field}': {e}")))?;
    if let Some(kind) = account {
        if user.kind != kind {
            return Err(Error::ConditionResolution(format!(
                "'{field}' only accepts {kind} users, got '{identifier}'"
            )));
        }
    }
    Ok(Value::Int(user.id))
}

/// One registry entry as declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct StrategyEntry {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(flatten)]
    pub strategy: FieldStrategy,
}

/// Strategy lookup table keyed by physical field name.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    by_field: HashMap<String, FieldStrategy>,
    by_field_operator: HashMap<(String, Operator), FieldStrategy>,
}

impl StrategyRegistry {
    /// An empty registry; every field uses the default comparison.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strategies of the helpdesk ticket schema.
    pub fn helpdesk() -> Self {
        let branches = FieldStrategy::AssociationContains {
            join: Association {
                table: "branches".into(),
                key: default_key(),
                display: default_display(),
            },
        };
        let mut registry = StrategyRegistry::new()
            .field(
                "assignee",
                FieldStrategy::IdentityLookup {
                    account: Some(UserKind::Oro),
                },
            )
            .field_operator("branch", Operator::Like, branches.clone())
            .field_operator("branch", Operator::NotLike, branches);
        for op in [Operator::Gt, Operator::Gte, Operator::Lt, Operator::Lte] {
            registry = registry.field_operator("priority", op, FieldStrategy::WeightedRange);
        }
        registry
    }

    pub fn from_entries(entries: &[StrategyEntry]) -> Self {
        entries.iter().fold(StrategyRegistry::new(), |registry, entry| {
            match entry.operator {
                Some(op) => registry.field_operator(&entry.field, op, entry.strategy.clone()),
                None => registry.field(&entry.field, entry.strategy.clone()),
            }
        })
    }

    /// Register a strategy for every operator on `field`.
    pub fn field(mut self, field: &str, strategy: FieldStrategy) -> Self {
        self.by_field.insert(field.to_string(), strategy);
        self
    }

    /// Register a strategy for one operator on `field`.
    pub fn field_operator(mut self, field: &str, op: Operator, strategy: FieldStrategy) -> Self {
        self.by_field_operator.insert((field.to_string(), op), strategy);
        self
    }

    /// Strategy for `(field, op)`, or `None` for the default comparison.
    pub fn resolve(&self, field: &str, op: Operator) -> Option<&FieldStrategy> {
        self.by_field
            .get(field)
            .or_else(|| self.by_field_operator.get(&(field.to_string(), op)))
    }

    pub fn len(&self) -> usize {
        self.by_field.len() + self.by_field_operator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
