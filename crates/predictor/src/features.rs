//! Single-row categorical feature records.

use serde::Serialize;

/// One row of categorical features, in insertion order.
///
/// Classifiers look values up by feature name, so the order only matters
/// for logging and display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureRecord {
    fields: Vec<(String, String)>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature (builder pattern). A repeated name replaces the old value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
