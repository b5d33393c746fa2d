//! Live-session state shared by the controller and its hosts.

mod cache;
mod model;

pub use cache::{CachedRecords, RecordCache};
pub use model::{
    AttendanceInfo, AttendanceStatus, AttendanceToggle, Mentee, MenteeId, RecordTypeSelector,
    SessionId,
};
