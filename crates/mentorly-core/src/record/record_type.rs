//! Record type tags.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// The fixed categories of data a mentor records per mentee per session.
///
/// The string form (`snake_case`) is the `form_type` used on the wire and
/// the key of the records map returned by the server.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordType {
    PlacementInformation,
    ResearchRecord,
    AcademicMarkDetails,
    HonorsMinorMarks,
    MentorMeetingDetails,
    AwardsAchievements,
    CocurricularActivity,
    ExtracurricularActivity,
    InternshipInformation,
}

/// Shape of the template a record type renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateShape {
    /// One object of named fields.
    Single,
    /// Ordered list of subject entries.
    Multi,
}

impl RecordType {
    /// Returns the template shape for this record type.
    pub fn shape(self) -> TemplateShape {
        match self {
            Self::AcademicMarkDetails | Self::HonorsMinorMarks => TemplateShape::Multi,
            _ => TemplateShape::Single,
        }
    }

    pub fn is_multi_record(self) -> bool {
        self.shape() == TemplateShape::Multi
    }

    /// Returns the wire identifier (`form_type`).
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
