//! One subject entry inside a multi-record form.

use super::field::{FormField, FormInput};
use crate::error::{MentorlyError, Result};
use crate::record::{
    ESE_ATTEMPT_CAP, ESE_ATTEMPT_FIELDS, FieldSpec, Record, SUBJECT_LEADING_FIELDS, SUBJECT_TRAILING_FIELDS,
    ese_attempt_field, is_blank_subject,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectForm {
    leading: Vec<FormField>,
    attempts: Vec<FormField>,
    trailing: Vec<FormField>,
    enabled: bool,
}

impl SubjectForm {
    /// An empty, editable subject with a single ESE attempt.
    pub fn blank() -> Self {
        Self {
            leading: SUBJECT_LEADING_FIELDS.iter().map(FormField::blank).collect(),
            attempts: vec![FormField::blank(&ESE_ATTEMPT_FIELDS[0])],
            trailing: SUBJECT_TRAILING_FIELDS.iter().map(FormField::blank).collect(),
            enabled: true,
        }
    }

    /// Rebuilds a saved subject in view mode.
    ///
    /// The number of attempt inputs is the highest attempt index holding a
    /// value, so a subject with only `ese_attempt_3` set still shows three.
    pub fn from_record(record: &Record) -> Self {
        let attempt_count = (1..=ESE_ATTEMPT_CAP)
            .filter(|i| record.has_value(&ese_attempt_field(*i)))
            .max()
            .unwrap_or(1);
        let populate = |spec: &'static FieldSpec| FormField::populated(spec, record.value(spec.name));
        Self {
            leading: SUBJECT_LEADING_FIELDS.iter().map(populate).collect(),
            attempts: ESE_ATTEMPT_FIELDS[..attempt_count].iter().map(populate).collect(),
            trailing: SUBJECT_TRAILING_FIELDS.iter().map(populate).collect(),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        for field in self.fields_mut() {
            field.enabled = enabled;
        }
    }

    pub fn leading_fields(&self) -> &[FormField] {
        &self.leading
    }

    pub fn attempt_fields(&self) -> &[FormField] {
        &self.attempts
    }

    pub fn trailing_fields(&self) -> &[FormField] {
        &self.trailing
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.leading
            .iter()
            .chain(self.attempts.iter())
            .chain(self.trailing.iter())
    }

    fn fields_mut(&mut self) -> impl Iterator<Item = &mut FormField> {
        self.leading
            .iter_mut()
            .chain(self.attempts.iter_mut())
            .chain(self.trailing.iter_mut())
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// The "+ Add Another ESE Attempt" control is shown while editing and
    /// below the attempt cap.
    pub fn add_attempt_visible(&self) -> bool {
        self.enabled && self.attempts.len() < ESE_ATTEMPT_CAP
    }

    /// Appends the next ESE attempt input.
    ///
    /// Returns `Ok(false)` when the cap is already reached.
    pub fn add_ese_attempt(&mut self) -> Result<bool> {
        if !self.enabled {
            return Err(MentorlyError::invalid_state("subject is not editable"));
        }
        if self.attempts.len() >= ESE_ATTEMPT_CAP {
            return Ok(false);
        }
        let next = &ESE_ATTEMPT_FIELDS[self.attempts.len()];
        self.attempts.push(FormField::blank(next));
        Ok(true)
    }

    pub fn set_field(&mut self, name: &str, input: FormInput) -> Result<()> {
        let field = self
            .fields_mut()
            .find(|f| f.name() == name)
            .ok_or_else(|| MentorlyError::not_found("subject field", name))?;
        field.set(input)
    }

    pub fn collect(&self) -> Record {
        self.fields()
            .map(|f| (f.name().to_string(), f.value.clone()))
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        is_blank_subject(&self.collect())
    }
}

impl Default for SubjectForm {
    fn default() -> Self {
        Self::blank()
    }
}
