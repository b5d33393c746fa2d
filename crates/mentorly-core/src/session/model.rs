use crate::record::RecordType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type MenteeId = i64;
pub type SessionId = i64;

/// A mentee of the session batch as the page lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentee {
    pub id: MenteeId,
    pub name: String,
    /// Approved leave for this session.
    #[serde(default)]
    pub has_leave: bool,
}

impl Mentee {
    pub fn new(id: MenteeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            has_leave: false,
        }
    }

    pub fn with_leave(mut self, has_leave: bool) -> Self {
        self.has_leave = has_leave;
        self
    }
}

impl fmt::Display for Mentee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// Parses the `id:name[:leave]` form used on the command line.
impl FromStr for Mentee {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let id = parts
            .next()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| format!("missing mentee id in '{s}'"))?
            .parse::<MenteeId>()
            .map_err(|e| format!("invalid mentee id in '{s}': {e}"))?;
        let name = parts
            .next()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| format!("missing mentee name in '{s}'"))?;
        let has_leave = match parts.next().map(str::trim) {
            None => false,
            Some("leave") => true,
            Some(other) => return Err(format!("unknown mentee flag '{other}'")),
        };
        Ok(Mentee::new(id, name).with_leave(has_leave))
    }
}

/// Attendance status as posted to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn from_absent(absent: bool) -> Self {
        if absent { Self::Absent } else { Self::Present }
    }

    pub fn is_absent(self) -> bool {
        self == Self::Absent
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        })
    }
}

/// Attendance as reported by the server for a (session, mentee) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceInfo {
    pub is_absent: bool,
    #[serde(default)]
    pub has_leave: bool,
}

/// The "mark absent" checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceToggle {
    /// Checked means absent.
    pub checked: bool,
    /// Locked toggles (no mentee, or approved leave) cannot be changed.
    pub locked: bool,
}

impl AttendanceToggle {
    /// Toggle of a mentee on approved leave: absent and locked.
    pub fn on_leave() -> Self {
        Self {
            checked: true,
            locked: true,
        }
    }

    pub fn status(&self) -> AttendanceStatus {
        AttendanceStatus::from_absent(self.checked)
    }
}

/// The record-type dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordTypeSelector {
    pub value: Option<RecordType>,
    pub enabled: bool,
}

impl RecordTypeSelector {
    pub fn reset(&mut self) {
        self.value = None;
    }

    /// Record entry is allowed only for a present mentee.
    pub fn sync_with_absent(&mut self, absent: bool) {
        self.enabled = !absent;
    }
}

impl Default for RecordTypeSelector {
    fn default() -> Self {
        Self {
            value: None,
            enabled: false,
        }
    }
}
