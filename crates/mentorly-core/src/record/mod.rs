//! Record domain module.
//!
//! - `record_type`: the enumerated record categories (`RecordType`)
//! - `value`: scalar values and records (`FieldValue`, `Record`)
//! - `schema`: static per-type form schemas (the template registry)
//! - `validation`: checks run before a record is posted

mod record_type;
mod schema;
mod validation;
mod value;

pub use record_type::{RecordType, TemplateShape};
pub use schema::{
    COURSE_TYPE_OPTIONS, COURSE_TYPE_RECORD_FIELD, ESE_ATTEMPT_CAP, ESE_ATTEMPT_FIELDS,
    FieldKind, FieldSpec, FormTemplate, MultiRecordSchema, RecordSchema, SUBJECT_LEADING_FIELDS,
    SUBJECT_TRAILING_FIELDS, SelectOption, ese_attempt_field,
};
pub use validation::{date_input_value, is_blank_subject, parse_date, validate_record};
pub use value::{FieldValue, Record};
