//! The live-session record workflow controller.

use super::messages::*;
use super::state::{LiveSessionSnapshot, LiveSessionState};
use mentorly_core::form::{FormInput, MultiRecordForm, RecordForm};
use mentorly_core::record::{COURSE_TYPE_RECORD_FIELD, Record, RecordType, validate_record};
use mentorly_core::session::{AttendanceStatus, AttendanceToggle, Mentee, MenteeId, SessionId};
use mentorly_core::{MentorlyError, Result, SessionGateway, SessionPrompter};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A save request prepared under the lock and sent without it.
enum PendingSave {
    Single {
        record_type: RecordType,
        record: Record,
    },
    Multi {
        record_type: RecordType,
        records: Vec<Record>,
        course_type: Option<String>,
    },
}

/// Coordinates mentee selection, attendance, record forms and the end of a
/// live session.
///
/// State sits behind a `tokio::sync::Mutex` that is released before every
/// gateway call, so user events can interleave with requests in flight.
/// Each selection bumps an epoch. Fetches from an older selection are
/// dropped; a save finishing late still updates its mentee's cache. Saves in
/// flight are tracked per mentee and record type, so re-showing a form never
/// allows a second overlapping save.
pub struct LiveSessionController {
    session_id: SessionId,
    gateway: Arc<dyn SessionGateway>,
    prompter: Arc<dyn SessionPrompter>,
    state: Mutex<LiveSessionState>,
}

impl LiveSessionController {
    pub fn new(
        session_id: SessionId,
        mentees: Vec<Mentee>,
        gateway: Arc<dyn SessionGateway>,
        prompter: Arc<dyn SessionPrompter>,
    ) -> Self {
        Self {
            session_id,
            gateway,
            prompter,
            state: Mutex::new(LiveSessionState::new(mentees)),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub async fn snapshot(&self) -> LiveSessionSnapshot {
        self.state.lock().await.snapshot(self.session_id)
    }

    // ========================================================================
    // Mentee selection
    // ========================================================================

    /// Makes `mentee_id` the active mentee.
    ///
    /// Unsaved form input of the previous mentee is dropped. The session
    /// start signal is fire-and-forget; record and attendance fetch failures
    /// are logged and leave the state empty.
    pub async fn select_mentee(&self, mentee_id: MenteeId) -> Result<()> {
        let (mentee, epoch) = {
            let mut state = self.state.lock().await;
            state.ensure_active()?;
            let mentee = state
                .mentee(mentee_id)
                .cloned()
                .ok_or_else(|| MentorlyError::not_found("mentee", mentee_id.to_string()))?;

            state.epoch += 1;
            state.selected = Some(mentee_id);
            state.on_leave = mentee.has_leave;
            state.clear_form();
            state.selector.enabled = false;
            state.attendance = AttendanceToggle {
                checked: false,
                locked: true,
            };
            (mentee, state.epoch)
        };
        tracing::info!("[LiveSession] Selected mentee {} (epoch {})", mentee, epoch);

        if let Err(e) = self.gateway.start_session(self.session_id).await {
            tracing::warn!("[LiveSession] Session start signal failed: {}", e);
        }

        self.load_records(mentee_id, epoch).await;

        if mentee.has_leave {
            self.apply_leave(mentee_id, epoch).await;
            return Ok(());
        }

        match self.gateway.fetch_attendance(self.session_id, mentee_id).await {
            Ok(info) if info.has_leave => self.apply_leave(mentee_id, epoch).await,
            Ok(info) => {
                let mut state = self.state.lock().await;
                if state.is_current(mentee_id, epoch) {
                    state.attendance = AttendanceToggle {
                        checked: info.is_absent,
                        locked: false,
                    };
                    state.selector.sync_with_absent(info.is_absent);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "[LiveSession] Failed to fetch attendance for mentee {}: {}",
                    mentee_id,
                    e
                );
                let mut state = self.state.lock().await;
                if state.is_current(mentee_id, epoch) {
                    state.attendance = AttendanceToggle::default();
                    state.selector.sync_with_absent(false);
                }
            }
        }
        Ok(())
    }

    /// Fetches the saved records of `mentee_id` into the cache.
    async fn load_records(&self, mentee_id: MenteeId, epoch: u64) {
        match self.gateway.fetch_records(self.session_id, mentee_id).await {
            Ok(groups) => {
                let mut state = self.state.lock().await;
                if !state.is_current(mentee_id, epoch) {
                    tracing::debug!(
                        "[LiveSession] Dropping records of superseded selection for mentee {}",
                        mentee_id
                    );
                    return;
                }
                state.cache.replace_for(mentee_id, groups);
                tracing::debug!(
                    "[LiveSession] Cached record types for mentee {}: {:?}",
                    mentee_id,
                    state.cache.record_types(mentee_id)
                );
            }
            Err(e) => {
                tracing::warn!(
                    "[LiveSession] Failed to fetch records for mentee {}: {}",
                    mentee_id,
                    e
                );
                let mut state = self.state.lock().await;
                if state.is_current(mentee_id, epoch) {
                    state.cache.replace_for(mentee_id, Vec::new());
                }
            }
        }
    }

    async fn apply_leave(&self, mentee_id: MenteeId, epoch: u64) {
        let mut state = self.state.lock().await;
        if state.is_current(mentee_id, epoch) {
            state.on_leave = true;
            state.attendance = AttendanceToggle::on_leave();
            state.selector.enabled = false;
            state.clear_form();
        }
    }

    // ========================================================================
    // Form area
    // ========================================================================

    /// Shows the form of `record_type`, or clears the form area for `None`.
    ///
    /// The form is populated in view mode when the mentee has saved data of
    /// that type, and blank otherwise.
    pub async fn show_form(&self, record_type: Option<RecordType>) -> Result<()> {
        let mut state = self.state.lock().await;
        state.ensure_active()?;

        let Some(mentee_id) = state.selected else {
            state.clear_form();
            drop(state);
            self.prompter.alert(SELECT_MENTEE_FIRST).await;
            return Err(MentorlyError::invalid_state("no mentee selected"));
        };
        if !state.selector.enabled {
            return Err(MentorlyError::invalid_state(
                "record entry is disabled for this mentee",
            ));
        }

        state.selector.value = record_type;
        match record_type {
            Some(record_type) => {
                state.rebuild_form(mentee_id, record_type);
                tracing::debug!(
                    "[LiveSession] Showing {} for mentee {} (viewing: {})",
                    record_type,
                    mentee_id,
                    state.form.as_ref().is_some_and(RecordForm::is_viewing)
                );
            }
            None => state.form = None,
        }
        Ok(())
    }

    /// Writes a field of the single-record form.
    pub async fn set_field(&self, name: &str, input: FormInput) -> Result<()> {
        self.with_form(|form| match form {
            RecordForm::Single(form) => form.set_field(name, input),
            RecordForm::Multi(_) => Err(MentorlyError::invalid_state(
                "subject forms are edited per subject",
            )),
        })
        .await
    }

    /// Writes a field of the subject at `subject` (0-based).
    pub async fn set_subject_field(
        &self,
        subject: usize,
        name: &str,
        input: FormInput,
    ) -> Result<()> {
        self.with_multi(|form| form.set_subject_field(subject, name, input))
            .await
    }

    /// Appends a blank subject and returns its index.
    pub async fn add_subject(&self) -> Result<usize> {
        self.with_multi(|form| form.add_subject()).await
    }

    /// Adds an ESE attempt input to a subject. `Ok(false)` once the cap is
    /// reached.
    pub async fn add_ese_attempt(&self, subject: usize) -> Result<bool> {
        self.with_multi(|form| form.add_ese_attempt(subject)).await
    }

    pub async fn set_course_type(&self, course_type: Option<&str>) -> Result<()> {
        self.with_multi(|form| form.set_course_type(course_type))
            .await
    }

    /// Handles the Edit control of a form in view mode.
    pub async fn edit(&self) -> Result<()> {
        self.with_form(|form| form.edit()).await
    }

    async fn with_form<R>(&self, f: impl FnOnce(&mut RecordForm) -> Result<R>) -> Result<R> {
        let mut state = self.state.lock().await;
        state.ensure_active()?;
        f(state.form_mut()?)
    }

    async fn with_multi<R>(
        &self,
        f: impl FnOnce(&mut MultiRecordForm) -> Result<R>,
    ) -> Result<R> {
        self.with_form(|form| match form {
            RecordForm::Multi(form) => f(form),
            RecordForm::Single(_) => Err(MentorlyError::invalid_state(
                "the current form has no subjects",
            )),
        })
        .await
    }

    // ========================================================================
    // Attendance
    // ========================================================================

    /// Handles a change of the "mark absent" toggle.
    ///
    /// The toggle and the selector change immediately; a failed post puts
    /// both back and alerts the mentor.
    pub async fn handle_attendance_change(&self, absent: bool) -> Result<()> {
        let (mentee_id, epoch, previous) = {
            let mut state = self.state.lock().await;
            state.ensure_active()?;
            let mentee_id = state.selected_mentee()?;
            if state.attendance.locked {
                return Err(MentorlyError::invalid_state(
                    "attendance cannot be changed for this mentee",
                ));
            }
            let previous = state.attendance.checked;
            state.attendance.checked = absent;
            state.selector.sync_with_absent(absent);
            if absent {
                state.clear_form();
            }
            (mentee_id, state.epoch, previous)
        };

        let status = AttendanceStatus::from_absent(absent);
        match self
            .gateway
            .set_attendance(self.session_id, mentee_id, status)
            .await
        {
            Ok(()) => {
                tracing::info!("[LiveSession] Mentee {} marked {}", mentee_id, status);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "[LiveSession] Attendance update for mentee {} failed: {}",
                    mentee_id,
                    e
                );
                {
                    let mut state = self.state.lock().await;
                    if state.is_current(mentee_id, epoch) {
                        state.attendance.checked = previous;
                        state.selector.sync_with_absent(previous);
                    }
                }
                self.prompter.alert(ATTENDANCE_FAILED).await;
                Err(e)
            }
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Validates and saves the form currently shown.
    ///
    /// On success the cache entry is replaced by what was posted and the
    /// form is shown again in view mode.
    pub async fn submit(&self) -> Result<()> {
        let (mentee_id, epoch, pending) = {
            let mut state = self.state.lock().await;
            state.ensure_active()?;
            let mentee_id = state.selected_mentee()?;
            let epoch = state.epoch;
            let record_type = state.form_mut()?.record_type();
            let prepared = if state.saving.contains(&(mentee_id, record_type)) {
                Err(MentorlyError::invalid_state("a save is already in progress"))
            } else {
                Self::prepare_save(state.form_mut()?)
            };
            match prepared {
                Ok(pending) => {
                    state.saving.insert((mentee_id, record_type));
                    (mentee_id, epoch, pending)
                }
                Err(e) => {
                    drop(state);
                    if let Some(message) = Self::rejection_alert(&e) {
                        self.prompter.alert(&message).await;
                    }
                    return Err(e);
                }
            }
        };

        let (record_type, result) = match &pending {
            PendingSave::Single {
                record_type,
                record,
            } => {
                let result = self
                    .gateway
                    .add_record(self.session_id, mentee_id, *record_type, record)
                    .await;
                (*record_type, result)
            }
            PendingSave::Multi {
                record_type,
                records,
                course_type,
            } => {
                let result = self
                    .gateway
                    .add_multi_record(
                        self.session_id,
                        mentee_id,
                        *record_type,
                        records,
                        course_type.clone(),
                    )
                    .await;
                (*record_type, result)
            }
        };

        let mut state = self.state.lock().await;
        state.saving.remove(&(mentee_id, record_type));
        // The save belongs to the mentee, so a form of the same type shown
        // after re-selecting that mentee is released as well.
        let visible = state.shows_form(mentee_id, record_type);
        if !state.is_current(mentee_id, epoch) {
            tracing::debug!(
                "[LiveSession] Save of {} for mentee {} finished after a reselection",
                record_type,
                mentee_id
            );
        }

        match result {
            Ok(()) => {
                let message = match pending {
                    PendingSave::Single { record, .. } => {
                        state.cache.store_single(mentee_id, record_type, record);
                        RECORD_SAVED
                    }
                    PendingSave::Multi {
                        records,
                        course_type,
                        ..
                    } => {
                        let records = match course_type {
                            Some(course_type) => records
                                .into_iter()
                                .map(|r| r.with(COURSE_TYPE_RECORD_FIELD, course_type.as_str()))
                                .collect(),
                            None => records,
                        };
                        state.cache.store_multi(mentee_id, record_type, records);
                        RECORDS_SAVED
                    }
                };
                if visible {
                    state.rebuild_form(mentee_id, record_type);
                }
                drop(state);
                tracing::info!("[LiveSession] Saved {} for mentee {}", record_type, mentee_id);
                self.prompter.alert(message).await;
                Ok(())
            }
            Err(e) => {
                if visible {
                    if let Some(form) = state.form.as_mut() {
                        form.submit_mut().finish();
                    }
                }
                drop(state);
                tracing::warn!(
                    "[LiveSession] Saving {} for mentee {} failed: {}",
                    record_type,
                    mentee_id,
                    e
                );
                let fallback = if record_type.is_multi_record() {
                    SAVE_MULTI_RECORD_FAILED
                } else {
                    SAVE_RECORD_FAILED
                };
                self.prompter.alert(&e.alert_message(fallback)).await;
                Err(e)
            }
        }
    }

    /// Collects and checks the form, then marks its submit control busy.
    fn prepare_save(form: &mut RecordForm) -> Result<PendingSave> {
        if form.submit().is_busy() {
            return Err(MentorlyError::invalid_state("a save is already in progress"));
        }
        if form.is_viewing() {
            return Err(MentorlyError::invalid_state(
                "the form shows saved data; use Edit first",
            ));
        }

        let pending = match &*form {
            RecordForm::Single(single) => {
                let record = single.collect();
                validate_record(single.schema(), &record)?;
                PendingSave::Single {
                    record_type: single.record_type(),
                    record,
                }
            }
            RecordForm::Multi(multi) => {
                let records = multi.collect();
                if records.is_empty() {
                    return Err(MentorlyError::validation("subjects", NO_SUBJECT_FILLED));
                }
                let course_type = multi.course_type().map(str::to_string);
                if multi.schema().has_course_type && course_type.is_none() {
                    return Err(MentorlyError::validation("course_type", NO_COURSE_TYPE));
                }
                PendingSave::Multi {
                    record_type: multi.record_type(),
                    records,
                    course_type,
                }
            }
        };
        form.submit_mut().begin()?;
        Ok(pending)
    }

    /// Alert for a submission stopped before any request.
    fn rejection_alert(err: &MentorlyError) -> Option<String> {
        match err {
            MentorlyError::Validation { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    // ========================================================================
    // Session termination
    // ========================================================================

    /// Ends the session after confirmation.
    ///
    /// Returns `Ok(false)` when the mentor declines. On success the prompter
    /// is asked to navigate to the completed sessions page.
    pub async fn handle_end_session(&self) -> Result<bool> {
        {
            let state = self.state.lock().await;
            state.ensure_active()?;
            if state.end_control.is_busy() {
                return Err(MentorlyError::invalid_state("session is already ending"));
            }
        }

        if !self.prompter.confirm(END_SESSION_CONFIRM).await {
            tracing::debug!("[LiveSession] End session declined");
            return Ok(false);
        }

        self.state.lock().await.end_control.begin()?;
        let result = self.gateway.end_session(self.session_id).await;

        {
            let mut state = self.state.lock().await;
            state.end_control.finish();
            if result.is_ok() {
                state.ended = true;
            }
        }

        match result {
            Ok(()) => {
                tracing::info!("[LiveSession] Session {} ended", self.session_id);
                self.prompter.alert(SESSION_ENDED).await;
                self.prompter.navigate(COMPLETED_SESSIONS_PATH).await;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("[LiveSession] Ending session {} failed: {}", self.session_id, e);
                self.prompter
                    .alert(&e.alert_message(END_SESSION_FAILED))
                    .await;
                Err(e)
            }
        }
    }
}
