// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rules and their boolean group trees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::condition::ConditionDefinition;
use crate::config::load_document;
use crate::error::{Error, Result};
use crate::query::Predicate;

/// Persisted connector of an AND group.
pub const CONNECTOR_INCLUSIVE: &str = "and";
/// Persisted connector of an OR group.
pub const CONNECTOR_EXCLUSIVE: &str = "or";

/// How a group combines its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// Every term must hold (AND).
    Inclusive,
    /// At least one term must hold (OR).
    Exclusive,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::Inclusive => CONNECTOR_INCLUSIVE,
            Connector::Exclusive => CONNECTOR_EXCLUSIVE,
        }
    }

    /// Aggregate terms. With zero terms AND is always true and OR always false.
    pub fn combine(self, terms: Vec<Predicate>) -> Predicate {
        match self {
            Connector::Inclusive => Predicate::all(terms),
            Connector::Exclusive => Predicate::any(terms),
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Connector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            CONNECTOR_INCLUSIVE => Ok(Connector::Inclusive),
            CONNECTOR_EXCLUSIVE => Ok(Connector::Exclusive),
            _ => Err(Error::Configuration(format!(
                "connector '{s}' is not supported, expected '{CONNECTOR_INCLUSIVE}' or '{CONNECTOR_EXCLUSIVE}'"
            ))),
        }
    }
}

/// A node of a rule's boolean tree.
///
/// The connector is kept as persisted and only checked at compile time, so a
/// stored rule with a bad connector still loads and fails on evaluation.
/// When `children` is non-empty the group's own `conditions` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Group {
    pub connector: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Group>,
}

impl Group {
    pub fn new(connector: &str) -> Self {
        Group {
            connector: connector.to_string(),
            conditions: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn inclusive() -> Self {
        Group::new(CONNECTOR_INCLUSIVE)
    }

    pub fn exclusive() -> Self {
        Group::new(CONNECTOR_EXCLUSIVE)
    }

    pub fn with_condition(mut self, condition: ConditionDefinition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_child(mut self, child: Group) -> Self {
        self.children.push(child);
        self
    }

    pub fn connector(&self) -> Result<Connector> {
        self.connector.parse()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A named automation rule: a target type plus its root group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Rule {
    pub name: String,
    /// Target type name, e.g. `ticket`.
    pub target: String,
    pub grouping: Group,
}

impl Rule {
    pub fn new(name: &str, target: &str, grouping: Group) -> Self {
        Rule {
            name: name.to_string(),
            target: target.to_string(),
            grouping,
        }
    }

    /// Load a rule from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        load_document(path)
    }
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
