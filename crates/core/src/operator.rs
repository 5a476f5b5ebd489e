// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison operators understood by the query backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operator a condition may export.
///
/// Rule definitions spell operators in snake_case (`not_in`); the camelCase
/// spellings of older rule exports (`notIn`) are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    #[serde(alias = "notIn")]
    NotIn,
    Like,
    #[serde(alias = "notLike")]
    NotLike,
    #[serde(alias = "isNull")]
    IsNull,
    #[serde(alias = "isNotNull")]
    IsNotNull,
}

impl Operator {
    pub const ALL: [Operator; 12] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::NotIn,
        Operator::Like,
        Operator::NotLike,
        Operator::IsNull,
        Operator::IsNotNull,
    ];

    /// Returns the canonical name used in rule definitions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Like => "like",
            Operator::NotLike => "not_like",
            Operator::IsNull => "is_null",
            Operator::IsNotNull => "is_not_null",
        }
    }

    /// Look up an operator by name. Returns `None` for anything the backend
    /// cannot express.
    pub fn from_name(name: &str) -> Option<Operator> {
        let op = match name {
            "eq" => Operator::Eq,
            "neq" => Operator::Neq,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "in" => Operator::In,
            "not_in" | "notIn" => Operator::NotIn,
            "like" => Operator::Like,
            "not_like" | "notLike" => Operator::NotLike,
            "is_null" | "isNull" => Operator::IsNull,
            "is_not_null" | "isNotNull" => Operator::IsNotNull,
            _ => return None,
        };
        Some(op)
    }

    /// Returns valid operator names for error messages.
    pub fn valid_names() -> &'static str {
        "eq, neq, gt, gte, lt, lte, in, not_in, like, not_like, is_null, is_not_null"
    }

    /// Mirror an ordering operator for relative-time fields.
    ///
    /// "Older than N hours" is a timestamp *before* `now - N`, so `gt` on the
    /// age becomes `lt` on the stored timestamp. Non-ordering operators have
    /// no mirror.
    pub fn time_mirror(self) -> Option<Operator> {
        match self {
            Operator::Gt => Some(Operator::Lt),
            Operator::Gte => Some(Operator::Lte),
            Operator::Lt => Some(Operator::Gt),
            Operator::Lte => Some(Operator::Gte),
            _ => None,
        }
    }

    /// Whether the operator compares against a bound value at all.
    pub fn takes_value(self) -> bool {
        !matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// Whether the operator expects a list of values.
    pub fn takes_list(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
        )
    }

    /// SQL spelling of the operator.
    pub fn sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "<>",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "operator_tests.rs"]
mod tests;
