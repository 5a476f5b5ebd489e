// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Automation configuration loading from TOML and JSON files.
//!
//! The configuration binds target type names to entity classes and tables,
//! describes each target's fields, carries the priority weight table, and
//! optionally overrides the field-strategy registry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::priority::PriorityWeights;
use crate::strategy::{FieldStrategy, StrategyEntry, StrategyRegistry};
use crate::target::{
    ConfigurationProvider, EntityConfiguration, FieldMetadata, FieldType, MetadataResolver,
};

/// Entity class of helpdesk tickets.
pub const TICKET_CLASS: &str = "Ticket";
/// Target type name of helpdesk tickets.
pub const TICKET_TARGET: &str = "ticket";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct AutomationConfig {
    #[serde(default)]
    pub priority: PriorityWeights,
    #[serde(default)]
    pub targets: BTreeMap<String, EntityConfiguration>,
    /// Strategy overrides. Absent means the helpdesk registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategies: Option<Vec<StrategyEntry>>,
}

/// Read a `.toml` or `.json` document, chosen by file extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let content = fs::read_to_string(path)?;
    match ext {
        "toml" => Ok(toml::from_str(&content)?),
        "json" => Ok(serde_json::from_str(&content)?),
        _ => Err(Error::Configuration(format!(
            "unsupported file type: {}\n  hint: use a .toml or .json file",
            path.display()
        ))),
    }
}

impl AutomationConfig {
    /// Load, normalize and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let config: AutomationConfig = load_document(path)?;
        config.validated()
    }

    /// Parse a TOML configuration string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AutomationConfig = toml::from_str(content)?;
        config.validated()
    }

    /// Configuration of the bundled helpdesk schema.
    pub fn helpdesk() -> Self {
        let fields = [
            ("id", "id", FieldType::Integer),
            ("key", "key", FieldType::Text),
            ("subject", "subject", FieldType::Text),
            ("description", "description", FieldType::Text),
            ("status", "status", FieldType::Enum),
            ("priority", "priority", FieldType::WeightedEnum),
            ("source", "source", FieldType::Enum),
            ("branch", "branch", FieldType::Association),
            ("assignee", "assignee", FieldType::User),
            ("reporter", "reporter", FieldType::User),
            ("created", "created_at", FieldType::Datetime),
            ("updated", "updated_at", FieldType::Datetime),
        ]
        .into_iter()
        .map(|(property, field, field_type)| {
            (property.to_string(), FieldMetadata::new(field, field_type))
        })
        .collect();

        let ticket = EntityConfiguration {
            class: TICKET_CLASS.to_string(),
            table: "tickets".to_string(),
            fields,
        };

        AutomationConfig {
            priority: PriorityWeights::default(),
            targets: BTreeMap::from([(TICKET_TARGET.to_string(), ticket)]),
            strategies: None,
        }
    }

    /// The strategy registry this configuration selects.
    pub fn strategy_registry(&self) -> StrategyRegistry {
        match &self.strategies {
            Some(entries) => StrategyRegistry::from_entries(entries),
            None => StrategyRegistry::helpdesk(),
        }
    }

    /// Fill defaulted field names and reject identifiers that cannot be
    /// spliced into SQL.
    fn validated(mut self) -> Result<Self> {
        let mut classes = BTreeMap::new();
        for (name, target) in &mut self.targets {
            if let Some(other) = classes.insert(target.class.clone(), name.clone()) {
                return Err(Error::Configuration(format!(
                    "class '{}' is bound to both '{other}' and '{name}'",
                    target.class
                )));
            }
            check_identifier(&format!("targets.{name}.table"), &target.table)?;
            for (property, meta) in &mut target.fields {
                if meta.field.is_empty() {
                    meta.field = property.clone();
                }
                check_identifier(&format!("targets.{name}.fields.{property}"), &meta.field)?;
            }
        }
        for entry in self.strategies.iter().flatten() {
            check_identifier("strategies.field", &entry.field)?;
            if let FieldStrategy::AssociationContains { join } = &entry.strategy {
                check_identifier("strategies.join.table", &join.table)?;
                check_identifier("strategies.join.key", &join.key)?;
                check_identifier("strategies.join.display", &join.display)?;
            }
        }
        Ok(self)
    }

    fn target_named(&self, target: &str) -> Option<&EntityConfiguration> {
        self.targets.get(target)
    }

    fn target_for_class(&self, class: &str) -> Option<(&str, &EntityConfiguration)> {
        self.targets
            .iter()
            .find(|(_, entity)| entity.class == class)
            .map(|(name, entity)| (name.as_str(), entity))
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        AutomationConfig::helpdesk()
    }
}

fn check_identifier(key: &str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && !value.starts_with(|c: char| c.is_ascii_digit())
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "{key}: '{value}' is not a valid identifier\n  hint: use letters, digits and underscores"
        )))
    }
}

impl ConfigurationProvider for AutomationConfig {
    fn target_by_class(&self, class: &str) -> Result<&str> {
        self.target_for_class(class)
            .map(|(name, _)| name)
            .ok_or_else(|| {
                Error::Configuration(format!("no target type is bound to class '{class}'"))
            })
    }

    fn is_datetime_property(&self, target: &str, property: &str) -> bool {
        self.target_named(target)
            .and_then(|entity| entity.fields.get(property))
            .is_some_and(|meta| meta.field_type == FieldType::Datetime)
    }

    fn entity_configuration(&self, target: &str) -> Result<&EntityConfiguration> {
        self.target_named(target)
            .ok_or_else(|| Error::Configuration(format!("unknown target type '{target}'")))
    }
}

impl MetadataResolver for AutomationConfig {
    fn field_metadata(&self, class: &str, property: &str) -> Option<&FieldMetadata> {
        self.target_for_class(class)
            .and_then(|(_, entity)| entity.fields.get(property))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
