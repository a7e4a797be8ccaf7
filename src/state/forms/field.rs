//! Field value objects and per-field options

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current string values of a form, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, useful when declaring default values
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Copy-then-assign: returns a new map with `name` set to `value`,
    /// leaving `self` untouched
    pub fn assign(&self, name: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.0.insert(name.to_string(), value.to_string());
        next
    }

    /// Field names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FormValues {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Validation messages of a failed submission, one per failing field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.0.insert(name.into(), message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FieldErrors {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Validation rules attached to a field at registration time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldOption {
    /// Message reported when the field is empty at submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
}

impl FieldOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Option with a `required` rule carrying `message`
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: Some(message.into()),
        }
    }

    /// Check a current value against this option.
    ///
    /// Returns the failure message, if any. A missing value counts as empty.
    pub fn check(&self, value: Option<&str>) -> Option<&str> {
        match (&self.required, value) {
            (Some(message), None) => Some(message),
            (Some(message), Some(v)) if v.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Field name -> option, built up as fields register
#[derive(Debug, Clone, Default)]
pub struct FieldOptionRegistry {
    options: HashMap<String, FieldOption>,
}

impl FieldOptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the option for `name`, returning the previous one
    pub fn upsert(&mut self, name: &str, option: FieldOption) -> Option<FieldOption> {
        self.options.insert(name.to_string(), option)
    }

    pub fn get(&self, name: &str) -> Option<&FieldOption> {
        self.options.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOption)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
