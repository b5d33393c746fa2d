//! Form view-models.
//!
//! A `RecordForm` is what the form area currently shows: either a
//! single-record form or a list of subject entries. The view-models own the
//! enabled/visible flags the page used to keep in the DOM, so the
//! controller and the renderer never have to guess at them.

mod control;
mod field;
mod multi;
mod single;
mod subject;

pub use control::{ActionControl, SAVING_LABEL};
pub use field::{FormField, FormInput};
pub use multi::MultiRecordForm;
pub use single::{FormMode, SingleRecordForm};
pub use subject::SubjectForm;

use crate::error::Result;
use crate::record::{FormTemplate, RecordType};
use crate::session::CachedRecords;
use serde::Serialize;

/// The form currently shown in the form area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RecordForm {
    Single(SingleRecordForm),
    Multi(MultiRecordForm),
}

impl RecordForm {
    /// Instantiates the template for `record_type`, populated from `cached`
    /// in view mode when there is saved data.
    pub fn build(record_type: RecordType, cached: Option<&CachedRecords>) -> Self {
        match FormTemplate::for_type(record_type) {
            FormTemplate::Single(schema) => {
                let form = match cached.and_then(CachedRecords::single) {
                    Some(record) => SingleRecordForm::from_record(schema, record),
                    None => SingleRecordForm::blank(schema),
                };
                Self::Single(form)
            }
            FormTemplate::Multi(schema) => {
                let records = cached.map(CachedRecords::records).unwrap_or_default();
                Self::Multi(MultiRecordForm::from_records(schema, records))
            }
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            Self::Single(form) => form.record_type(),
            Self::Multi(form) => form.record_type(),
        }
    }

    pub fn title(&self) -> &'static str {
        FormTemplate::for_type(self.record_type()).title()
    }

    /// Whether the form shows saved data and offers an Edit control.
    pub fn is_viewing(&self) -> bool {
        match self {
            Self::Single(form) => form.edit_control_visible(),
            Self::Multi(form) => form.is_viewing(),
        }
    }

    pub fn edit(&mut self) -> Result<()> {
        match self {
            Self::Single(form) => form.edit(),
            Self::Multi(form) => form.edit(),
        }
    }

    pub fn submit(&self) -> &ActionControl {
        match self {
            Self::Single(form) => form.submit(),
            Self::Multi(form) => form.submit(),
        }
    }

    pub fn submit_mut(&mut self) -> &mut ActionControl {
        match self {
            Self::Single(form) => form.submit_mut(),
            Self::Multi(form) => form.submit_mut(),
        }
    }

    pub fn as_single(&self) -> Option<&SingleRecordForm> {
        match self {
            Self::Single(form) => Some(form),
            Self::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&MultiRecordForm> {
        match self {
            Self::Multi(form) => Some(form),
            Self::Single(_) => None,
        }
    }
}
