//! A single input of a form view-model.

use crate::error::{MentorlyError, Result};
use crate::record::{FieldKind, FieldSpec, FieldValue, date_input_value};
use serde::Serialize;

/// A value typed or toggled by the mentor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Text(String),
    Checked(bool),
}

impl FormInput {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// One rendered input: its schema entry, current value, and whether it
/// accepts edits.
///
/// Text-like inputs always hold `FieldValue::Text`, checkboxes always hold
/// `FieldValue::Bool`, exactly what the form posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub spec: &'static FieldSpec,
    pub value: FieldValue,
    pub enabled: bool,
}

impl FormField {
    /// An empty, editable input.
    pub fn blank(spec: &'static FieldSpec) -> Self {
        let value = if spec.is_checkbox() {
            FieldValue::Bool(false)
        } else {
            FieldValue::text("")
        };
        Self {
            spec,
            value,
            enabled: true,
        }
    }

    /// An input populated from a stored value, disabled for viewing.
    pub fn populated(spec: &'static FieldSpec, stored: &FieldValue) -> Self {
        let value = match spec.kind {
            FieldKind::Checkbox => FieldValue::Bool(stored.is_truthy()),
            FieldKind::Date => FieldValue::Text(date_input_value(stored)),
            FieldKind::Select(options) => {
                let shown = stored.display_string();
                let wanted = shown.to_lowercase();
                let matched = options
                    .iter()
                    .find(|option| option.value.to_lowercase() == wanted)
                    .map(|option| option.value.to_string());
                FieldValue::Text(matched.unwrap_or(shown))
            }
            _ => FieldValue::Text(stored.display_string()),
        };
        Self {
            spec,
            value,
            enabled: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Applies mentor input, rejecting disabled fields and mismatched kinds.
    pub fn set(&mut self, input: FormInput) -> Result<()> {
        if !self.enabled {
            return Err(MentorlyError::invalid_state(format!(
                "field '{}' is not editable",
                self.spec.name
            )));
        }
        self.value = match (self.spec.is_checkbox(), input) {
            (true, FormInput::Checked(checked)) => FieldValue::Bool(checked),
            (false, FormInput::Text(text)) => FieldValue::Text(text),
            (true, FormInput::Text(_)) => {
                return Err(MentorlyError::invalid_state(format!(
                    "field '{}' is a checkbox",
                    self.spec.name
                )));
            }
            (false, FormInput::Checked(_)) => {
                return Err(MentorlyError::invalid_state(format!(
                    "field '{}' is not a checkbox",
                    self.spec.name
                )));
            }
        };
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        match &self.value {
            FieldValue::Bool(checked) => !checked,
            other => other.is_blank(),
        }
    }
}
