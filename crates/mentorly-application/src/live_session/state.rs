use super::messages::{END_SESSION_BUSY_LABEL, END_SESSION_LABEL, leave_notice};
use mentorly_core::form::{ActionControl, RecordForm};
use mentorly_core::record::RecordType;
use mentorly_core::session::{
    AttendanceToggle, Mentee, MenteeId, RecordCache, RecordTypeSelector, SessionId,
};
use mentorly_core::{MentorlyError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Everything the live-session page shows, owned by the controller.
#[derive(Debug)]
pub(crate) struct LiveSessionState {
    pub mentees: Vec<Mentee>,
    pub selected: Option<MenteeId>,
    /// Bumped on every mentee selection.
    pub epoch: u64,
    pub on_leave: bool,
    pub attendance: AttendanceToggle,
    pub selector: RecordTypeSelector,
    pub form: Option<RecordForm>,
    pub cache: RecordCache,
    /// Saves in flight, keyed by the mentee they were posted for.
    pub saving: HashSet<(MenteeId, RecordType)>,
    pub end_control: ActionControl,
    pub ended: bool,
}

impl LiveSessionState {
    pub fn new(mentees: Vec<Mentee>) -> Self {
        Self {
            mentees,
            selected: None,
            epoch: 0,
            on_leave: false,
            attendance: AttendanceToggle {
                checked: false,
                locked: true,
            },
            selector: RecordTypeSelector::default(),
            form: None,
            cache: RecordCache::new(),
            saving: HashSet::new(),
            end_control: ActionControl::new(END_SESSION_LABEL, END_SESSION_BUSY_LABEL),
            ended: false,
        }
    }

    pub fn mentee(&self, id: MenteeId) -> Option<&Mentee> {
        self.mentees.iter().find(|m| m.id == id)
    }

    /// Whether a response captured at `(mentee, epoch)` may still touch
    /// visible state.
    pub fn is_current(&self, mentee: MenteeId, epoch: u64) -> bool {
        self.epoch == epoch && self.selected == Some(mentee)
    }

    pub fn ensure_active(&self) -> Result<()> {
        if self.ended {
            Err(MentorlyError::invalid_state("session has ended"))
        } else {
            Ok(())
        }
    }

    pub fn selected_mentee(&self) -> Result<MenteeId> {
        self.selected
            .ok_or_else(|| MentorlyError::invalid_state("no mentee selected"))
    }

    pub fn form_mut(&mut self) -> Result<&mut RecordForm> {
        self.form
            .as_mut()
            .ok_or_else(|| MentorlyError::invalid_state("no record form is shown"))
    }

    /// Empties the form area and unsets the record-type selector.
    pub fn clear_form(&mut self) {
        self.form = None;
        self.selector.reset();
    }

    /// Re-renders the form of `record_type` from the cache.
    ///
    /// The submit control stays busy while a save of the same form is in
    /// flight.
    pub fn rebuild_form(&mut self, mentee: MenteeId, record_type: RecordType) {
        let cached = self.cache.get(mentee, record_type);
        let mut form = RecordForm::build(record_type, cached);
        if self.saving.contains(&(mentee, record_type)) {
            // A freshly built control is idle, so this cannot fail.
            let _ = form.submit_mut().begin();
        }
        self.form = Some(form);
    }

    /// Whether the form area shows `record_type` for `mentee`.
    pub fn shows_form(&self, mentee: MenteeId, record_type: RecordType) -> bool {
        self.selected == Some(mentee)
            && self.form.as_ref().map(RecordForm::record_type) == Some(record_type)
    }

    pub fn snapshot(&self, session_id: SessionId) -> LiveSessionSnapshot {
        let selected = self.selected.and_then(|id| self.mentee(id)).cloned();
        let leave_notice = selected
            .as_ref()
            .filter(|_| self.on_leave)
            .map(|m| leave_notice(&m.name));
        LiveSessionSnapshot {
            session_id,
            mentees: self.mentees.clone(),
            cached_types: self
                .selected
                .map(|id| self.cache.record_types(id))
                .unwrap_or_default(),
            selected,
            leave_notice,
            attendance: self.attendance,
            selector: self.selector,
            form: self.form.clone(),
            end_control: self.end_control.clone(),
            ended: self.ended,
        }
    }
}

/// A copy of the visible page state, for hosts to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveSessionSnapshot {
    pub session_id: SessionId,
    pub mentees: Vec<Mentee>,
    pub selected: Option<Mentee>,
    /// Shown instead of the record entry area for a mentee on leave.
    pub leave_notice: Option<String>,
    pub attendance: AttendanceToggle,
    pub selector: RecordTypeSelector,
    pub form: Option<RecordForm>,
    /// Record types with saved data for the selected mentee.
    pub cached_types: Vec<RecordType>,
    pub end_control: ActionControl,
    pub ended: bool,
}
