// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Leaf conditions and the factory that resolves them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::operator::Operator;
use crate::target::{FieldType, TargetContext};
use crate::value::Value;

/// Raw condition parameters as persisted in a rule.
///
/// The operator stays a string until resolution so that an unknown operator
/// is reported as unsupported rather than as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ConditionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ConditionParameters {
    pub fn new(operator: &str, value: impl Into<Value>) -> Self {
        ConditionParameters {
            property: None,
            operator: Some(operator.to_string()),
            value: Some(value.into()),
        }
    }

    /// Parameters of a value-less operator such as `is_null`.
    pub fn unary(operator: &str) -> Self {
        ConditionParameters {
            property: None,
            operator: Some(operator.to_string()),
            value: None,
        }
    }

    pub fn with_property(mut self, property: &str) -> Self {
        self.property = Some(property.to_string());
        self
    }
}

/// A condition as stored in a group: its declared type plus parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ConditionDefinition {
    #[serde(rename = "type")]
    pub condition_type: String,
    #[serde(default)]
    pub parameters: ConditionParameters,
}

impl ConditionDefinition {
    pub fn new(condition_type: &str, parameters: ConditionParameters) -> Self {
        ConditionDefinition {
            condition_type: condition_type.to_string(),
            parameters,
        }
    }
}

/// An immutable, validated `(property, operator, value)` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    property: String,
    operator: Operator,
    value: Value,
}

impl Condition {
    /// The normalized triple.
    pub fn export(&self) -> (&str, Operator, &Value) {
        (&self.property, self.operator, &self.value)
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (String, Operator, Value) {
        (self.property, self.operator, self.value)
    }
}

/// How a registered condition type finds its property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionKind {
    /// Generic field condition; the property comes from the parameters.
    Field,
    /// Bound to one property of the target.
    Property(String),
}

/// Condition types that ship with the helpdesk.
pub const HELPDESK_CONDITION_TYPES: [&str; 10] = [
    "subject",
    "description",
    "status",
    "priority",
    "source",
    "branch",
    "assignee",
    "reporter",
    "created",
    "updated",
];

/// Resolves condition definitions against a target.
#[derive(Debug, Clone)]
pub struct ConditionFactory {
    kinds: HashMap<String, ConditionKind>,
}

impl Default for ConditionFactory {
    fn default() -> Self {
        let mut factory = ConditionFactory::empty().register("field", ConditionKind::Field);
        for name in HELPDESK_CONDITION_TYPES {
            factory = factory.register(name, ConditionKind::Property(name.to_string()));
        }
        factory
    }
}

impl ConditionFactory {
    /// A factory with no registered types.
    pub fn empty() -> Self {
        ConditionFactory {
            kinds: HashMap::new(),
        }
    }

    pub fn register(mut self, condition_type: &str, kind: ConditionKind) -> Self {
        self.kinds.insert(condition_type.to_string(), kind);
        self
    }

    pub fn is_registered(&self, condition_type: &str) -> bool {
        self.kinds.contains_key(condition_type)
    }

    /// Resolve and validate one condition.
    pub fn get_condition(
        &self,
        condition_type: &str,
        parameters: &ConditionParameters,
        target: &TargetContext<'_>,
    ) -> Result<Condition> {
        let kind = self.kinds.get(condition_type).ok_or_else(|| {
            Error::ConditionResolution(format!("unknown condition type '{condition_type}'"))
        })?;
        let property = match kind {
            ConditionKind::Property(property) => property.clone(),
            ConditionKind::Field => parameters.property.clone().ok_or_else(|| {
                Error::ConditionResolution(format!(
                    "'{condition_type}' condition requires a property"
                ))
            })?,
        };
        let operator_name = parameters.operator.as_deref().ok_or_else(|| {
            Error::ConditionResolution(format!("'{condition_type}' condition requires an operator"))
        })?;
        let unsupported = || Error::UnsupportedOperator {
            property: property.clone(),
            operator: operator_name.to_string(),
        };
        let operator = Operator::from_name(operator_name).ok_or_else(unsupported)?;

        let meta = target.field(&property)?;
        if !meta.field_type.allows(operator) {
            return Err(unsupported());
        }

        let value = if operator.takes_value() {
            let value = parameters
                .value
                .clone()
                .filter(|v| !v.is_null())
                .ok_or_else(|| {
                    Error::ConditionResolution(format!(
                        "'{property}' condition with operator '{operator}' requires a value"
                    ))
                })?;
            check_shape(&property, operator, meta.field_type, &value)?;
            value
        } else {
            Value::Null
        };

        Ok(Condition {
            property,
            operator,
            value,
        })
    }
}

fn check_shape(
    property: &str,
    operator: Operator,
    field_type: FieldType,
    value: &Value,
) -> Result<()> {
    if operator.takes_list() != value.is_list() {
        let expected = if operator.takes_list() { "a list" } else { "a single value" };
        return Err(Error::ConditionResolution(format!(
            "'{property}' condition with operator '{operator}' expects {expected}, got {value}"
        )));
    }
    if field_type == FieldType::Datetime && value.as_hours().is_none() {
        return Err(Error::ConditionResolution(format!(
            "'{property}' expects a non-negative number of hours, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
