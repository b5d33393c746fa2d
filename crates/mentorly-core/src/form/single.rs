//! Single-record form view-model.

use super::control::ActionControl;
use super::field::{FormField, FormInput};
use crate::error::{MentorlyError, Result};
use crate::record::{Record, RecordSchema, RecordType};
use serde::Serialize;

/// Whether a form is accepting input or showing saved data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Editable,
    Viewing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleRecordForm {
    schema: &'static RecordSchema,
    fields: Vec<FormField>,
    mode: FormMode,
    submit: ActionControl,
}

impl SingleRecordForm {
    /// An empty form with every field editable.
    pub fn blank(schema: &'static RecordSchema) -> Self {
        Self {
            schema,
            fields: schema.fields.iter().map(FormField::blank).collect(),
            mode: FormMode::Editable,
            submit: ActionControl::save("Save Record"),
        }
    }

    /// A form showing `record`, disabled until the Edit control is used.
    pub fn from_record(schema: &'static RecordSchema, record: &Record) -> Self {
        let fields = schema
            .fields
            .iter()
            .map(|spec| FormField::populated(spec, record.value(spec.name)))
            .collect();
        let mut form = Self {
            schema,
            fields,
            mode: FormMode::Viewing,
            submit: ActionControl::save("Save Record"),
        };
        form.set_enabled(false);
        form
    }

    pub fn record_type(&self) -> RecordType {
        self.schema.record_type
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn submit(&self) -> &ActionControl {
        &self.submit
    }

    pub fn submit_mut(&mut self) -> &mut ActionControl {
        &mut self.submit
    }

    /// The Edit control is shown exactly when the form is in view mode.
    pub fn edit_control_visible(&self) -> bool {
        self.mode == FormMode::Viewing
    }

    fn set_enabled(&mut self, enabled: bool) {
        for field in &mut self.fields {
            field.enabled = enabled;
        }
        self.submit.set_visible(enabled);
        self.mode = if enabled {
            FormMode::Editable
        } else {
            FormMode::Viewing
        };
    }

    /// Handles the Edit control: re-enables every field and the save button.
    pub fn edit(&mut self) -> Result<()> {
        if !self.edit_control_visible() {
            return Err(MentorlyError::invalid_state("form is already editable"));
        }
        self.set_enabled(true);
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, input: FormInput) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name() == name)
            .ok_or_else(|| MentorlyError::not_found("field", name))?;
        field.set(input)
    }

    /// Collects every field value by name, as the form would post them.
    pub fn collect(&self) -> Record {
        self.fields
            .iter()
            .map(|f| (f.name().to_string(), f.value.clone()))
            .collect()
    }
}
