//! Multi-record (subject list) form view-model.

use super::control::ActionControl;
use super::field::FormInput;
use super::subject::SubjectForm;
use crate::error::{MentorlyError, Result};
use crate::record::{
    COURSE_TYPE_OPTIONS, COURSE_TYPE_RECORD_FIELD, MultiRecordSchema, Record, RecordType,
};
use serde::Serialize;

/// Form holding an ordered list of subject entries.
///
/// In view mode every subject is disabled, the form actions (add subject,
/// save) are hidden and an "Edit Records" control is shown. Editing turns
/// all of that around and removes the Edit control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiRecordForm {
    schema: &'static MultiRecordSchema,
    course_type: Option<String>,
    course_type_locked: bool,
    subjects: Vec<SubjectForm>,
    actions_visible: bool,
    edit_visible: bool,
    submit: ActionControl,
}

impl MultiRecordForm {
    /// The empty skeleton for `schema`.
    ///
    /// Academic marks start with one editable subject. Honors/minors start
    /// with none and hidden actions until a course type is picked.
    pub fn blank(schema: &'static MultiRecordSchema) -> Self {
        let subjects = if schema.has_course_type {
            Vec::new()
        } else {
            vec![SubjectForm::blank()]
        };
        Self {
            schema,
            course_type: None,
            course_type_locked: false,
            actions_visible: !schema.has_course_type,
            subjects,
            edit_visible: false,
            submit: ActionControl::save(schema.save_label),
        }
    }

    /// Rebuilds saved records in view mode, one subject per record.
    pub fn from_records(schema: &'static MultiRecordSchema, records: &[Record]) -> Self {
        if records.is_empty() {
            return Self::blank(schema);
        }
        let course_type = if schema.has_course_type {
            records
                .first()
                .filter(|r| r.has_value(COURSE_TYPE_RECORD_FIELD))
                .map(|r| r.value(COURSE_TYPE_RECORD_FIELD).display_string())
        } else {
            None
        };
        Self {
            schema,
            course_type_locked: course_type.is_some(),
            course_type,
            subjects: records.iter().map(SubjectForm::from_record).collect(),
            actions_visible: false,
            edit_visible: true,
            submit: ActionControl::save(schema.save_label),
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.schema.record_type
    }

    pub fn schema(&self) -> &'static MultiRecordSchema {
        self.schema
    }

    pub fn subjects(&self) -> &[SubjectForm] {
        &self.subjects
    }

    pub fn course_type(&self) -> Option<&str> {
        self.course_type.as_deref()
    }

    pub fn course_type_locked(&self) -> bool {
        self.course_type_locked
    }

    pub fn actions_visible(&self) -> bool {
        self.actions_visible
    }

    pub fn edit_control_visible(&self) -> bool {
        self.edit_visible
    }

    pub fn is_viewing(&self) -> bool {
        self.edit_visible
    }

    pub fn submit(&self) -> &ActionControl {
        &self.submit
    }

    pub fn submit_mut(&mut self) -> &mut ActionControl {
        &mut self.submit
    }

    /// Handles "Edit Records": re-enables every subject and its attempt
    /// control, shows the actions and unlocks the course type.
    pub fn edit(&mut self) -> Result<()> {
        if !self.edit_visible {
            return Err(MentorlyError::invalid_state("records are already editable"));
        }
        for subject in &mut self.subjects {
            subject.set_enabled(true);
        }
        self.actions_visible = true;
        self.course_type_locked = false;
        self.edit_visible = false;
        Ok(())
    }

    /// Handles "Add Another Subject".
    pub fn add_subject(&mut self) -> Result<usize> {
        if !self.actions_visible {
            return Err(MentorlyError::invalid_state(
                "subjects cannot be added right now",
            ));
        }
        self.subjects.push(SubjectForm::blank());
        Ok(self.subjects.len() - 1)
    }

    pub fn add_ese_attempt(&mut self, subject: usize) -> Result<bool> {
        self.subject_mut(subject)?.add_ese_attempt()
    }

    pub fn set_subject_field(&mut self, subject: usize, name: &str, input: FormInput) -> Result<()> {
        self.subject_mut(subject)?.set_field(name, input)
    }

    fn subject_mut(&mut self, index: usize) -> Result<&mut SubjectForm> {
        self.subjects
            .get_mut(index)
            .ok_or_else(|| MentorlyError::not_found("subject", (index + 1).to_string()))
    }

    /// Handles a change of the course-type selector.
    ///
    /// Picking a type with no subjects adds the first one; clearing it drops
    /// every subject and hides the actions.
    pub fn set_course_type(&mut self, course_type: Option<&str>) -> Result<()> {
        if !self.schema.has_course_type {
            return Err(MentorlyError::invalid_state(format!(
                "{} has no course type",
                self.schema.record_type
            )));
        }
        if self.course_type_locked {
            return Err(MentorlyError::invalid_state("course type is locked"));
        }

        match course_type.map(str::trim).filter(|t| !t.is_empty()) {
            Some(wanted) => {
                let option = COURSE_TYPE_OPTIONS
                    .iter()
                    .find(|o| o.value.eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| MentorlyError::not_found("course type", wanted))?;
                self.course_type = Some(option.value.to_string());
                if self.subjects.is_empty() {
                    self.subjects.push(SubjectForm::blank());
                }
                self.actions_visible = true;
            }
            None => {
                self.course_type = None;
                self.subjects.clear();
                self.actions_visible = false;
            }
        }
        Ok(())
    }

    /// Collects one record per subject, dropping subjects left blank.
    pub fn collect(&self) -> Vec<Record> {
        self.subjects
            .iter()
            .filter(|s| !s.is_blank())
            .map(SubjectForm::collect)
            .collect()
    }
}
