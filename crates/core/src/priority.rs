// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ticket priority weights.
//!
//! Priorities are a weighted enum: each value carries a numeric rank so that
//! rules can ask for "priority >= high". The table is loaded once with the
//! automation configuration and handed to the compiler; it is never mutated
//! afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default priority values and their weights.
pub const DEFAULT_PRIORITIES: [(&str, i64); 3] = [("low", 10), ("medium", 20), ("high", 30)];

/// Ordered mapping from priority value to weight, lowest weight first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct PriorityWeights {
    entries: Vec<(String, i64)>,
}

impl PriorityWeights {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        // One weight per value; a later entry replaces an earlier one.
        let by_value: BTreeMap<String, i64> =
            entries.into_iter().map(|(v, w)| (v.into(), w)).collect();
        let mut entries: Vec<(String, i64)> = by_value.into_iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        PriorityWeights { entries }
    }

    /// Weight of a priority value, if the value is known.
    pub fn weight(&self, value: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, w)| *w)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.weight(value).is_some()
    }

    /// Priority values in ascending weight order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(v, _)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect every value whose weight passes `keep(candidate, threshold)`.
    ///
    /// Returns `None` when `threshold` is not a known priority.
    pub fn select(&self, threshold: &str, keep: impl Fn(i64, i64) -> bool) -> Option<Vec<String>> {
        let threshold_weight = self.weight(threshold)?;
        Some(
            self.entries
                .iter()
                .filter(|(_, w)| keep(*w, threshold_weight))
                .map(|(v, _)| v.clone())
                .collect(),
        )
    }
}

impl Default for PriorityWeights {
    fn default() -> Self {
        PriorityWeights::new(DEFAULT_PRIORITIES)
    }
}

impl From<BTreeMap<String, i64>> for PriorityWeights {
    fn from(map: BTreeMap<String, i64>) -> Self {
        PriorityWeights::new(map)
    }
}

impl From<PriorityWeights> for BTreeMap<String, i64> {
    fn from(weights: PriorityWeights) -> Self {
        weights.entries.into_iter().collect()
    }
}

/// Documented as the map it is read from.
#[cfg(feature = "schemars")]
impl schemars::JsonSchema for PriorityWeights {
    fn schema_name() -> String {
        "PriorityWeights".to_string()
    }

    fn json_schema(generator: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <BTreeMap<String, i64> as schemars::JsonSchema>::json_schema(generator)
    }
}

#[cfg(test)]
#[path = "priority_tests.rs"]
mod tests;
