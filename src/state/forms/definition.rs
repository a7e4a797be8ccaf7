//! Declarative form definitions loaded from configuration

use super::error::FormError;
use super::field::{FieldOption, FormValues};
use super::form::{Form, FormMode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    /// Display label; falls back to the field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub default: String,
    /// Message shown when the field is left empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            default: String::new(),
            required: None,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn option(&self) -> FieldOption {
        FieldOption {
            required: self.required.clone(),
        }
    }
}

/// A titled list of fields in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(default)]
    pub title: String,
    pub fields: Vec<FieldDefinition>,
}

impl FormDefinition {
    /// Name + email sign-up form with a required email
    pub fn signup() -> Self {
        Self {
            title: "Sign up".to_string(),
            fields: vec![
                FieldDefinition {
                    label: Some("Name".to_string()),
                    ..FieldDefinition::new("name")
                },
                FieldDefinition {
                    label: Some("Email".to_string()),
                    required: Some("Email is required".to_string()),
                    ..FieldDefinition::new("email")
                },
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn default_values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.default.as_str()))
            .collect()
    }

    /// Field names must be unique
    pub fn validate(&self) -> Result<(), FormError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Construct an empty form for this definition. Fields are registered
    /// by the UI layer as it renders them.
    pub fn build(&self, mode: FormMode) -> Result<Form, FormError> {
        self.validate()?;
        Ok(Form::new(mode, self.default_values()))
    }
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self::signup()
    }
}
