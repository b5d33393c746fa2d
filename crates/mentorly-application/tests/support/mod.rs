//! In-memory gateway and recording prompter for controller tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mentorly_application::LiveSessionController;
use mentorly_core::record::{Record, RecordType};
use mentorly_core::session::{AttendanceInfo, AttendanceStatus, Mentee, MenteeId, SessionId};
use mentorly_core::{MentorlyError, Result, SessionGateway, SessionPrompter};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const SESSION_ID: SessionId = 42;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Start,
    FetchRecords(MenteeId),
    FetchAttendance(MenteeId),
    SetAttendance(MenteeId, AttendanceStatus),
    AddRecord {
        mentee_id: MenteeId,
        record_type: RecordType,
        record: Record,
    },
    AddMultiRecord {
        mentee_id: MenteeId,
        record_type: RecordType,
        records: Vec<Record>,
        course_type: Option<String>,
    },
    End,
}

impl Call {
    fn op(&self) -> &'static str {
        match self {
            Call::Start => "start_session",
            Call::FetchRecords(_) => "fetch_records",
            Call::FetchAttendance(_) => "fetch_attendance",
            Call::SetAttendance(..) => "set_attendance",
            Call::AddRecord { .. } => "add_record",
            Call::AddMultiRecord { .. } => "add_multi_record",
            Call::End => "end_session",
        }
    }
}

/// Holds the next call of one operation until released.
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Waits until the held call has reached the gateway.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Default)]
pub struct MockGateway {
    calls: Mutex<Vec<Call>>,
    records: Mutex<HashMap<MenteeId, Vec<(RecordType, Vec<Record>)>>>,
    attendance: Mutex<HashMap<MenteeId, AttendanceInfo>>,
    failures: Mutex<HashMap<&'static str, MentorlyError>>,
    gates: Mutex<HashMap<&'static str, Gate>>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_records(&self, mentee_id: MenteeId, record_type: RecordType, records: Vec<Record>) {
        self.records
            .lock()
            .unwrap()
            .entry(mentee_id)
            .or_default()
            .push((record_type, records));
    }

    pub fn with_attendance(&self, mentee_id: MenteeId, is_absent: bool, has_leave: bool) {
        self.attendance.lock().unwrap().insert(
            mentee_id,
            AttendanceInfo {
                is_absent,
                has_leave,
            },
        );
    }

    /// Makes every later call of `op` fail with `err`.
    pub fn fail(&self, op: &'static str, err: MentorlyError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    pub fn succeed(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    /// Holds the next call of `op`.
    pub fn hold(&self, op: &'static str) -> Gate {
        let gate = Gate::default();
        self.gates.lock().unwrap().insert(op, gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.op() == op).count()
    }

    async fn record(&self, call: Call) -> Result<()> {
        let op = call.op();
        self.calls.lock().unwrap().push(call);

        let gate = self.gates.lock().unwrap().remove(op);
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        match self.failures.lock().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SessionGateway for MockGateway {
    async fn start_session(&self, _session_id: SessionId) -> Result<()> {
        self.record(Call::Start).await
    }

    async fn fetch_records(
        &self,
        _session_id: SessionId,
        mentee_id: MenteeId,
    ) -> Result<Vec<(RecordType, Vec<Record>)>> {
        self.record(Call::FetchRecords(mentee_id)).await?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&mentee_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_attendance(
        &self,
        _session_id: SessionId,
        mentee_id: MenteeId,
    ) -> Result<AttendanceInfo> {
        self.record(Call::FetchAttendance(mentee_id)).await?;
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .get(&mentee_id)
            .copied()
            .unwrap_or_default())
    }

    async fn set_attendance(
        &self,
        _session_id: SessionId,
        mentee_id: MenteeId,
        status: AttendanceStatus,
    ) -> Result<()> {
        self.record(Call::SetAttendance(mentee_id, status)).await
    }

    async fn add_record(
        &self,
        _session_id: SessionId,
        mentee_id: MenteeId,
        record_type: RecordType,
        record: &Record,
    ) -> Result<()> {
        self.record(Call::AddRecord {
            mentee_id,
            record_type,
            record: record.clone(),
        })
        .await
    }

    async fn add_multi_record(
        &self,
        _session_id: SessionId,
        mentee_id: MenteeId,
        record_type: RecordType,
        records: &[Record],
        course_type: Option<String>,
    ) -> Result<()> {
        self.record(Call::AddMultiRecord {
            mentee_id,
            record_type,
            records: records.to_vec(),
            course_type,
        })
        .await
    }

    async fn end_session(&self, _session_id: SessionId) -> Result<()> {
        self.record(Call::End).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Alert(String),
    Confirm(String),
    Navigate(String),
}

pub struct RecordingPrompter {
    prompts: Mutex<Vec<Prompt>>,
    confirm_answer: Mutex<bool>,
}

impl RecordingPrompter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            confirm_answer: Mutex::new(true),
        })
    }

    pub fn answer_confirm(&self, answer: bool) {
        *self.confirm_answer.lock().unwrap() = answer;
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter_map(|p| match p {
                Prompt::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts().pop()
    }
}

#[async_trait]
impl SessionPrompter for RecordingPrompter {
    async fn alert(&self, message: &str) {
        self.prompts
            .lock()
            .unwrap()
            .push(Prompt::Alert(message.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.prompts
            .lock()
            .unwrap()
            .push(Prompt::Confirm(message.to_string()));
        *self.confirm_answer.lock().unwrap()
    }

    async fn navigate(&self, path: &str) {
        self.prompts
            .lock()
            .unwrap()
            .push(Prompt::Navigate(path.to_string()));
    }
}

pub fn mentees() -> Vec<Mentee> {
    vec![
        Mentee::new(1, "A"),
        Mentee::new(2, "B"),
        Mentee::new(3, "C").with_leave(true),
    ]
}

pub struct Harness {
    pub controller: Arc<LiveSessionController>,
    pub gateway: Arc<MockGateway>,
    pub prompter: Arc<RecordingPrompter>,
}

pub fn harness() -> Harness {
    let gateway = MockGateway::new();
    let prompter = RecordingPrompter::new();
    let controller = Arc::new(LiveSessionController::new(
        SESSION_ID,
        mentees(),
        gateway.clone(),
        prompter.clone(),
    ));
    Harness {
        controller,
        gateway,
        prompter,
    }
}
