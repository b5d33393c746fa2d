//! Per-record-type form schemas.
//!
//! Each record type has a static schema listing its fields in display
//! order with their input kind and whether they are required. The form
//! view-models are built from these schemas and validation walks them
//! before anything is serialized.

use super::record_type::RecordType;
use serde::Serialize;

/// Maximum number of ESE attempt fields per subject.
pub const ESE_ATTEMPT_CAP: usize = 4;

/// Field name of the n-th (1-based) ESE attempt.
pub fn ese_attempt_field(index: usize) -> String {
    format!("ese_attempt_{index}")
}

/// A selectable option of a `select` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Date,
    Integer,
    Decimal,
    Select(&'static [SelectOption]),
    Checkbox,
}

/// One field of a record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            label,
            kind,
            required,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox)
    }
}

/// Schema of a single-record form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordSchema {
    pub record_type: RecordType,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Schema of a multi-record (subject list) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MultiRecordSchema {
    pub record_type: RecordType,
    pub title: &'static str,
    pub save_label: &'static str,
    /// Whether the form carries the Honors/Minors course-type selector.
    pub has_course_type: bool,
}

use FieldKind::{Checkbox, Date, Decimal, Integer, Select, Text, TextArea};

const YES_NO: &[SelectOption] = &[
    SelectOption {
        value: "true",
        label: "Yes",
    },
    SelectOption {
        value: "false",
        label: "No",
    },
];

/// Options of the honors/minors course-type selector.
pub const COURSE_TYPE_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "Honors",
        label: "Honors",
    },
    SelectOption {
        value: "Minors",
        label: "Minors",
    },
];

/// Field in which the server stores the honors/minors course type.
pub const COURSE_TYPE_RECORD_FIELD: &str = "semester";

const PLACEMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("company_name", "Company Name", Text, true),
    FieldSpec::new("company_location", "Company Location", Text, false),
    FieldSpec::new("interview_date", "Interview Date", Date, true),
    FieldSpec::new("rounds_attended", "No. Of Rounds Attended", Integer, true),
    FieldSpec::new("internship_provided", "Internship Provided", Select(YES_NO), true),
    FieldSpec::new("annual_ctc", "Annual CTC (Rs.)", Decimal, false),
    FieldSpec::new("stipend_amount", "Stipend Amount (Rs.)", Decimal, false),
    FieldSpec::new("interview_status", "Interview Status", Text, true),
];

const RESEARCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", Text, true),
    FieldSpec::new("publication_name", "Conference / Journal / Patent Name", Text, true),
    FieldSpec::new("identifier_number", "ISSN/E-ISSN / ISBN Number", Text, false),
    FieldSpec::new("publication_date", "Publication Date", Date, true),
    FieldSpec::new(
        "publication_type",
        "Type of Publication (Scopus / SCI / UGC, etc)",
        Text,
        true,
    ),
    FieldSpec::new("publication_status", "Status of Publication", Text, true),
];

const MEETING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("points_discussed", "Points Discussed", TextArea, true),
    FieldSpec::new("remarks_given", "Remarks Given", TextArea, true),
];

const AWARD_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("award_achievement_name", "Award / Achievement Name", Text, true),
    FieldSpec::new("award_achievement_type", "Award / Achievement Type", Text, false),
    FieldSpec::new("conducted_by", "Conducted By", Text, true),
    FieldSpec::new("date", "Date", Date, true),
];

const ACTIVITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("activity_name", "Activity Name", Text, true),
    FieldSpec::new("activity_type", "Activity Type", Text, false),
    FieldSpec::new("conducted_by", "Conducted By", Text, true),
    FieldSpec::new("date", "Date", Date, true),
];

const INTERNSHIP_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("company_name", "Company Name", Text, true),
    FieldSpec::new("duration_from", "Duration From", Date, true),
    FieldSpec::new("duration_to", "Duration To", Date, true),
    FieldSpec::new("sem", "Sem", Text, true),
    FieldSpec::new("technology_domain", "Technology / Domain", Text, true),
    FieldSpec::new(
        "internship_project_details",
        "Internship Project Details",
        TextArea,
        false,
    ),
    FieldSpec::new("company_location", "Company Location", Text, false),
    FieldSpec::new("internship_status", "Internship Status", Text, true),
];

/// Subject fields shown before the ESE attempts.
pub const SUBJECT_LEADING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("subject_code_name", "Subject Code / Name", Text, false),
    FieldSpec::new("grade", "GRADE", Text, false),
    FieldSpec::new("gpa", "GPA", Decimal, false),
    FieldSpec::new("cgpa", "CGPA", Decimal, false),
    FieldSpec::new("attendance_percentage", "ATTENDANCE %", Decimal, false),
    FieldSpec::new("cia_1", "CIA-1", Decimal, false),
    FieldSpec::new("cia_2", "CIA-2", Decimal, false),
    FieldSpec::new("cia_3", "CIA-3", Decimal, false),
    FieldSpec::new("overall_cia", "Overall CIA", Decimal, false),
];

/// ESE attempt fields, 1 through `ESE_ATTEMPT_CAP`.
pub static ESE_ATTEMPT_FIELDS: [FieldSpec; ESE_ATTEMPT_CAP] = [
    FieldSpec::new("ese_attempt_1", "ESE ATTEMPT - 1", Decimal, false),
    FieldSpec::new("ese_attempt_2", "ESE ATTEMPT - 2", Decimal, false),
    FieldSpec::new("ese_attempt_3", "ESE ATTEMPT - 3", Decimal, false),
    FieldSpec::new("ese_attempt_4", "ESE ATTEMPT - 4", Decimal, false),
];

/// Subject fields shown after the ESE attempts.
pub const SUBJECT_TRAILING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "suggestions_by_mentor",
        "Suggestions by Mentor to Improve",
        TextArea,
        false,
    ),
    FieldSpec::new(
        "course_acceleration_deceleration",
        "Course Acceleration / De-Acceleration",
        Checkbox,
        false,
    ),
];

const SINGLE_SCHEMAS: &[RecordSchema] = &[
    RecordSchema {
        record_type: RecordType::PlacementInformation,
        title: "Placement Information",
        fields: PLACEMENT_FIELDS,
    },
    RecordSchema {
        record_type: RecordType::ResearchRecord,
        title: "Research Record",
        fields: RESEARCH_FIELDS,
    },
    RecordSchema {
        record_type: RecordType::MentorMeetingDetails,
        title: "Mentor Meeting Details",
        fields: MEETING_FIELDS,
    },
    RecordSchema {
        record_type: RecordType::AwardsAchievements,
        title: "Awards and Achievements",
        fields: AWARD_FIELDS,
    },
    RecordSchema {
        record_type: RecordType::CocurricularActivity,
        title: "Co-Curricular Activity Record",
        fields: ACTIVITY_FIELDS,
    },
    RecordSchema {
        record_type: RecordType::ExtracurricularActivity,
        title: "Extra-Curricular Activity Record",
        fields: ACTIVITY_FIELDS,
    },
    RecordSchema {
        record_type: RecordType::InternshipInformation,
        title: "Internship Information",
        fields: INTERNSHIP_FIELDS,
    },
];

const MULTI_SCHEMAS: &[MultiRecordSchema] = &[
    MultiRecordSchema {
        record_type: RecordType::AcademicMarkDetails,
        title: "Academic Semester Mark Details",
        save_label: "Save All Academic Records",
        has_course_type: false,
    },
    MultiRecordSchema {
        record_type: RecordType::HonorsMinorMarks,
        title: "Honors / Minors Marks Details",
        save_label: "Save All Records",
        has_course_type: true,
    },
];

/// Template registry entry for a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTemplate {
    Single(&'static RecordSchema),
    Multi(&'static MultiRecordSchema),
}

impl FormTemplate {
    /// Looks up the template for `record_type`.
    pub fn for_type(record_type: RecordType) -> Self {
        if record_type.is_multi_record() {
            Self::Multi(multi_schema(record_type))
        } else {
            Self::Single(single_schema(record_type))
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Single(schema) => schema.title,
            Self::Multi(schema) => schema.title,
        }
    }
}

/// Returns the schema of a single-record type.
///
/// Multi-record types fall back to the first single schema; callers go
/// through [`FormTemplate::for_type`] which never asks for them.
fn single_schema(record_type: RecordType) -> &'static RecordSchema {
    SINGLE_SCHEMAS
        .iter()
        .find(|s| s.record_type == record_type)
        .unwrap_or(&SINGLE_SCHEMAS[0])
}

fn multi_schema(record_type: RecordType) -> &'static MultiRecordSchema {
    MULTI_SCHEMAS
        .iter()
        .find(|s| s.record_type == record_type)
        .unwrap_or(&MULTI_SCHEMAS[0])
}
