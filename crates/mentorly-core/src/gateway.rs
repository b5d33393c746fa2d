//! Session gateway trait.
//!
//! Defines the server operations the live-session workflow depends on.

use crate::error::Result;
use crate::record::{Record, RecordType};
use crate::session::{AttendanceInfo, AttendanceStatus, MenteeId, SessionId};
use async_trait::async_trait;

/// An abstract gateway to the mentoring server.
///
/// This trait decouples the controller from the transport (HTTP in
/// production, in-memory doubles in tests). Every mutating call resolves to
/// `Ok(())` only when the server answered `success: true`; a `success:
/// false` answer is `MentorlyError::Server` carrying the server message.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Signals that the mentor started working with the session.
    async fn start_session(&self, session_id: SessionId) -> Result<()>;

    /// Fetches every saved record of a mentee for the session, grouped by
    /// record type. Types the server reports but the client does not know
    /// are skipped.
    async fn fetch_records(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
    ) -> Result<Vec<(RecordType, Vec<Record>)>>;

    /// Fetches the current attendance of a mentee.
    async fn fetch_attendance(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
    ) -> Result<AttendanceInfo>;

    /// Posts the attendance status of a mentee.
    async fn set_attendance(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
        status: AttendanceStatus,
    ) -> Result<()>;

    /// Saves a single record.
    async fn add_record(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
        record_type: RecordType,
        record: &Record,
    ) -> Result<()>;

    /// Saves a list of subject records, replacing the saved list.
    async fn add_multi_record(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
        record_type: RecordType,
        records: &[Record],
        course_type: Option<String>,
    ) -> Result<()>;

    /// Ends the session for good.
    async fn end_session(&self, session_id: SessionId) -> Result<()>;
}
