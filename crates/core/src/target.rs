// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Target types and the collaborators that describe them.
//!
//! A target type is the logical name of an entity class (e.g. `ticket`)
//! together with its field metadata. The compiler never inspects storage
//! directly; it asks a [`ConfigurationProvider`] which class and table a
//! target maps to and a [`MetadataResolver`] which physical field a logical
//! property maps to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::operator::Operator;

/// Declared data type of a target property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Integer,
    Boolean,
    /// A closed set of values compared by identity (e.g. status).
    Enum,
    /// A closed set of values with a rank (e.g. priority).
    WeightedEnum,
    /// A timestamp compared against "N hours ago".
    Datetime,
    /// A many-to-one reference to another table (e.g. branch).
    Association,
    /// A reference to a user account.
    User,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Enum => "enum",
            FieldType::WeightedEnum => "weighted_enum",
            FieldType::Datetime => "datetime",
            FieldType::Association => "association",
            FieldType::User => "user",
        }
    }

    /// Whether a condition on a property of this type may use `op`.
    pub fn allows(&self, op: Operator) -> bool {
        use Operator::*;
        match self {
            FieldType::Text => matches!(
                op,
                Eq | Neq | Like | NotLike | In | NotIn | IsNull | IsNotNull
            ),
            FieldType::Integer => !matches!(op, Like | NotLike),
            FieldType::Boolean => matches!(op, Eq | Neq),
            FieldType::Enum => matches!(op, Eq | Neq | In | NotIn),
            FieldType::WeightedEnum => !matches!(op, Like | NotLike | IsNull | IsNotNull),
            FieldType::Datetime => op.is_ordering(),
            FieldType::Association => {
                matches!(op, Eq | Neq | Like | NotLike | IsNull | IsNotNull)
            }
            FieldType::User => matches!(op, Eq | Neq | IsNull | IsNotNull),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a logical property is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct FieldMetadata {
    /// Physical field (column) name. Defaults to the property name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldMetadata {
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        FieldMetadata {
            field: field.into(),
            field_type,
        }
    }
}

/// Entity configuration bound to a target type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct EntityConfiguration {
    /// Entity class name, as passed to `get_targets`.
    pub class: String,
    /// Storage table holding the entities.
    pub table: String,
    /// Logical property name -> field metadata.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldMetadata>,
}

/// Maps target types to entity configuration. Read-only to the compiler.
pub trait ConfigurationProvider: Send + Sync {
    /// Resolve the target type name bound to an entity class.
    fn target_by_class(&self, class: &str) -> Result<&str>;

    /// Whether `property` of `target` holds a timestamp.
    fn is_datetime_property(&self, target: &str, property: &str) -> bool;

    /// Entity configuration of a target type.
    fn entity_configuration(&self, target: &str) -> Result<&EntityConfiguration>;
}

/// Maps a logical property name to its physical field for an entity class.
pub trait MetadataResolver: Send + Sync {
    fn field_metadata(&self, class: &str, property: &str) -> Option<&FieldMetadata>;

    fn field_name(&self, class: &str, property: &str) -> Option<&str> {
        self.field_metadata(class, property)
            .map(|meta| meta.field.as_str())
    }
}

/// Everything the condition factory and compiler need to know about the
/// target of one compilation.
#[derive(Clone, Copy)]
pub struct TargetContext<'a> {
    pub name: &'a str,
    pub entity: &'a EntityConfiguration,
    pub metadata: &'a dyn MetadataResolver,
}

impl<'a> TargetContext<'a> {
    /// Field metadata of `property`, or [`Error::UnknownField`].
    pub fn field(&self, property: &str) -> Result<&'a FieldMetadata> {
        self.metadata
            .field_metadata(&self.entity.class, property)
            .ok_or_else(|| Error::UnknownField {
                target: self.name.to_string(),
                property: property.to_string(),
            })
    }
}

impl fmt::Debug for TargetContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetContext")
            .field("name", &self.name)
            .field("class", &self.entity.class)
            .finish()
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
