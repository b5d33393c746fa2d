//! Texts shown to the mentor.

pub const SELECT_MENTEE_FIRST: &str = "Please select a mentee first.";
pub const ATTENDANCE_FAILED: &str = "Could not update attendance. Please try again.";

pub const RECORD_SAVED: &str = "Record saved successfully!";
pub const RECORDS_SAVED: &str = "Records saved successfully!";
pub const SAVE_RECORD_FAILED: &str = "Failed to save record.";
pub const SAVE_MULTI_RECORD_FAILED: &str = "Failed to save multi-record.";

pub const NO_SUBJECT_FILLED: &str = "Please fill in details for at least one subject.";
pub const NO_COURSE_TYPE: &str = "Please select a course type (Honors or Minors).";

pub const END_SESSION_CONFIRM: &str =
    "Are you sure you want to end this session? This action cannot be undone.";
pub const END_SESSION_LABEL: &str = "End Session";
pub const END_SESSION_BUSY_LABEL: &str = "Ending Session...";
pub const SESSION_ENDED: &str = "Session ended successfully.";
pub const END_SESSION_FAILED: &str = "Failed to end session.";

/// Where the page goes once the session is over.
pub const COMPLETED_SESSIONS_PATH: &str = "/mentor/completed_sessions";

pub fn leave_notice(mentee_name: &str) -> String {
    format!("{mentee_name} has an approved leave for this session.")
}
