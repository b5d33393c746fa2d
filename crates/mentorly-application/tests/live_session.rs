mod support;

use mentorly_application::FormRenderer;
use mentorly_application::live_session::messages;
use mentorly_core::MentorlyError;
use mentorly_core::form::{FormInput, RecordForm};
use mentorly_core::record::{FieldValue, Record, RecordType};
use mentorly_core::session::{AttendanceStatus, AttendanceToggle};
use support::{Call, Prompt, harness};

fn text(value: &str) -> FormInput {
    FormInput::text(value)
}

// ============================================================================
// Mentee selection
// ============================================================================

#[tokio::test]
async fn selecting_a_mentee_starts_session_and_loads_state() {
    let h = harness();
    h.gateway.with_attendance(1, false, false);

    h.controller.select_mentee(1).await.unwrap();

    assert_eq!(
        h.gateway.calls(),
        vec![Call::Start, Call::FetchRecords(1), Call::FetchAttendance(1)]
    );
    let snapshot = h.controller.snapshot().await;
    assert_eq!(snapshot.selected.unwrap().name, "A");
    assert!(!snapshot.attendance.checked);
    assert!(!snapshot.attendance.locked);
    assert!(snapshot.selector.enabled);
    assert_eq!(snapshot.selector.value, None);
    assert!(snapshot.form.is_none());
}

#[tokio::test]
async fn unknown_mentee_is_not_found() {
    let h = harness();
    let err = h.controller.select_mentee(99).await.unwrap_err();
    assert!(matches!(err, MentorlyError::NotFound { .. }));
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn start_signal_failure_is_ignored() {
    let h = harness();
    h.gateway.fail("start_session", MentorlyError::transport("down"));

    h.controller.select_mentee(1).await.unwrap();

    assert!(h.controller.snapshot().await.selector.enabled);
    assert!(h.prompter.prompts().is_empty());
}

#[tokio::test]
async fn mentee_on_leave_is_absent_and_locked() {
    let h = harness();

    h.controller.select_mentee(3).await.unwrap();

    assert_eq!(h.gateway.count("fetch_attendance"), 0);
    let snapshot = h.controller.snapshot().await;
    assert!(snapshot.attendance.checked && snapshot.attendance.locked);
    assert!(!snapshot.selector.enabled);
    assert_eq!(
        snapshot.leave_notice.as_deref(),
        Some("C has an approved leave for this session.")
    );

    let err = h.controller.handle_attendance_change(false).await.unwrap_err();
    assert!(err.is_invalid_state());
    assert!(
        h.controller
            .show_form(Some(RecordType::ResearchRecord))
            .await
            .unwrap_err()
            .is_invalid_state()
    );
}

#[tokio::test]
async fn leave_reported_by_attendance_endpoint_locks_toggle() {
    let h = harness();
    h.gateway.with_attendance(2, true, true);

    h.controller.select_mentee(2).await.unwrap();

    let snapshot = h.controller.snapshot().await;
    assert!(snapshot.attendance.locked);
    assert!(!snapshot.selector.enabled);
    assert!(snapshot.leave_notice.is_some());
}

#[tokio::test]
async fn switching_mentees_clears_form_and_selector() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::AwardsAchievements))
        .await
        .unwrap();
    h.controller.set_field("conducted_by", text("IEEE")).await.unwrap();

    h.controller.select_mentee(2).await.unwrap();

    let snapshot = h.controller.snapshot().await;
    assert!(snapshot.form.is_none());
    assert_eq!(snapshot.selector.value, None);

    h.controller
        .show_form(Some(RecordType::AwardsAchievements))
        .await
        .unwrap();
    let snapshot = h.controller.snapshot().await;
    let form = snapshot.form.unwrap();
    assert!(form.as_single().unwrap().fields().iter().all(|f| f.is_empty()));
}

#[tokio::test]
async fn record_fetch_failure_leaves_cache_empty() {
    let h = harness();
    h.gateway.with_records(
        1,
        RecordType::ResearchRecord,
        vec![Record::new().with("title", "Paper")],
    );
    h.gateway.fail("fetch_records", MentorlyError::transport("down"));

    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::ResearchRecord))
        .await
        .unwrap();

    let snapshot = h.controller.snapshot().await;
    assert!(snapshot.cached_types.is_empty());
    assert!(!snapshot.form.unwrap().is_viewing());
}

#[tokio::test]
async fn attendance_fetch_failure_treats_mentee_as_present() {
    let h = harness();
    h.gateway.fail("fetch_attendance", MentorlyError::transport("down"));

    h.controller.select_mentee(1).await.unwrap();

    assert!(h.prompter.prompts().is_empty());
    let snapshot = h.controller.snapshot().await;
    assert_eq!(snapshot.attendance, AttendanceToggle::default());
    assert!(snapshot.selector.enabled);
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
}

#[tokio::test]
async fn response_after_switch_does_not_touch_new_mentee() {
    let h = harness();
    h.gateway.with_attendance(1, true, false);
    h.gateway.with_attendance(2, false, false);
    let gate = h.gateway.hold("fetch_records");

    let controller = h.controller.clone();
    let first = tokio::spawn(async move { controller.select_mentee(1).await });
    gate.entered().await;

    h.controller.select_mentee(2).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();

    gate.release();
    first.await.unwrap().unwrap();

    let snapshot = h.controller.snapshot().await;
    assert_eq!(snapshot.selected.unwrap().id, 2);
    assert!(!snapshot.attendance.checked);
    assert!(snapshot.selector.enabled);
    assert_eq!(snapshot.selector.value, Some(RecordType::MentorMeetingDetails));
    assert!(snapshot.form.is_some());
}

#[tokio::test]
async fn records_from_superseded_selection_do_not_replace_newer_save() {
    let h = harness();
    let gate = h.gateway.hold("fetch_records");

    let controller = h.controller.clone();
    let first = tokio::spawn(async move { controller.select_mentee(1).await });
    gate.entered().await;

    h.controller.select_mentee(2).await.unwrap();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("points_discussed", text("x")).await.unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();
    h.controller.submit().await.unwrap();

    gate.release();
    first.await.unwrap().unwrap();

    let snapshot = h.controller.snapshot().await;
    assert_eq!(snapshot.cached_types, vec![RecordType::MentorMeetingDetails]);
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    assert!(h.controller.snapshot().await.form.unwrap().is_viewing());
}

// ============================================================================
// Form area
// ============================================================================

#[tokio::test]
async fn choosing_a_type_without_mentee_alerts() {
    let h = harness();

    let err = h
        .controller
        .show_form(Some(RecordType::ResearchRecord))
        .await
        .unwrap_err();

    assert!(err.is_invalid_state());
    assert_eq!(h.prompter.alerts(), vec![messages::SELECT_MENTEE_FIRST]);
    assert_eq!(h.controller.snapshot().await.selector.value, None);
}

#[tokio::test]
async fn blank_form_for_mentee_without_records() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();

    for record_type in [
        RecordType::PlacementInformation,
        RecordType::ResearchRecord,
        RecordType::MentorMeetingDetails,
        RecordType::InternshipInformation,
    ] {
        h.controller.show_form(Some(record_type)).await.unwrap();
        let form = h.controller.snapshot().await.form.unwrap();
        let single = form.as_single().unwrap();
        assert!(!form.is_viewing());
        assert!(single.fields().iter().all(|f| f.enabled && f.is_empty()));
    }

    h.controller.show_form(None).await.unwrap();
    assert!(h.controller.snapshot().await.form.is_none());
}

#[tokio::test]
async fn cached_single_record_renders_disabled_with_edit() {
    let h = harness();
    h.gateway.with_records(
        1,
        RecordType::InternshipInformation,
        vec![
            Record::new()
                .with("company_name", "Acme")
                .with("duration_from", "2024-06-01T00:00:00"),
        ],
    );
    h.controller.select_mentee(1).await.unwrap();

    h.controller
        .show_form(Some(RecordType::InternshipInformation))
        .await
        .unwrap();

    let form = h.controller.snapshot().await.form.unwrap();
    let single = form.as_single().unwrap();
    assert!(single.edit_control_visible());
    assert!(single.fields().iter().all(|f| !f.enabled));
    assert_eq!(
        single.field("duration_from").unwrap().value,
        FieldValue::text("2024-06-01")
    );

    h.controller.edit().await.unwrap();
    let form = h.controller.snapshot().await.form.unwrap();
    assert!(form.as_single().unwrap().fields().iter().all(|f| f.enabled));
    assert!(form.submit().is_visible());
}

#[tokio::test]
async fn cached_multi_records_rebuild_attempts() {
    let h = harness();
    h.gateway.with_records(
        1,
        RecordType::AcademicMarkDetails,
        vec![
            Record::new()
                .with("subject_code_name", "CS101")
                .with("ese_attempt_3", "44"),
            Record::new().with("subject_code_name", "CS102"),
        ],
    );
    h.controller.select_mentee(1).await.unwrap();

    h.controller
        .show_form(Some(RecordType::AcademicMarkDetails))
        .await
        .unwrap();

    let form = h.controller.snapshot().await.form.unwrap();
    let multi = form.as_multi().unwrap();
    assert_eq!(multi.subjects()[0].attempt_count(), 3);
    assert_eq!(multi.subjects()[1].attempt_count(), 1);
    assert!(multi.edit_control_visible());
    assert!(h.controller.add_subject().await.is_err());
}

#[tokio::test]
async fn fourth_ese_attempt_hides_the_control() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::AcademicMarkDetails))
        .await
        .unwrap();

    for _ in 0..3 {
        assert!(h.controller.add_ese_attempt(0).await.unwrap());
    }
    assert!(!h.controller.add_ese_attempt(0).await.unwrap());

    let form = h.controller.snapshot().await.form.unwrap();
    let subject = &form.as_multi().unwrap().subjects()[0];
    assert_eq!(subject.attempt_count(), 4);
    assert!(!subject.add_attempt_visible());
}

#[tokio::test]
async fn field_edits_are_checked_against_the_form_shape() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    assert!(h.controller.set_field("title", text("x")).await.unwrap_err().is_invalid_state());

    h.controller
        .show_form(Some(RecordType::ResearchRecord))
        .await
        .unwrap();
    assert!(h.controller.add_subject().await.unwrap_err().is_invalid_state());
    assert!(matches!(
        h.controller.set_field("nope", text("x")).await.unwrap_err(),
        MentorlyError::NotFound { .. }
    ));
}

// ============================================================================
// Attendance
// ============================================================================

#[tokio::test]
async fn marking_absent_disables_selector_and_clears_form() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::ResearchRecord))
        .await
        .unwrap();

    h.controller.handle_attendance_change(true).await.unwrap();

    let snapshot = h.controller.snapshot().await;
    assert!(snapshot.attendance.checked);
    assert!(!snapshot.selector.enabled);
    assert_eq!(snapshot.selector.value, None);
    assert!(snapshot.form.is_none());
    assert_eq!(
        h.gateway.calls().last(),
        Some(&Call::SetAttendance(1, AttendanceStatus::Absent))
    );

    h.controller.handle_attendance_change(false).await.unwrap();
    assert!(h.controller.snapshot().await.selector.enabled);
}

#[tokio::test]
async fn failed_attendance_post_reverts_toggle() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.gateway.fail(
        "set_attendance",
        MentorlyError::server(Some("nope".to_string())),
    );

    let err = h.controller.handle_attendance_change(true).await.unwrap_err();

    assert!(err.is_server());
    let snapshot = h.controller.snapshot().await;
    assert!(!snapshot.attendance.checked);
    assert!(snapshot.selector.enabled);
    assert_eq!(h.prompter.alerts(), vec![messages::ATTENDANCE_FAILED]);
}

#[tokio::test]
async fn failed_present_post_keeps_selector_disabled() {
    let h = harness();
    h.gateway.with_attendance(1, true, false);
    h.controller.select_mentee(1).await.unwrap();
    assert!(!h.controller.snapshot().await.selector.enabled);
    h.gateway.fail("set_attendance", MentorlyError::transport("down"));

    h.controller.handle_attendance_change(false).await.unwrap_err();

    let snapshot = h.controller.snapshot().await;
    assert!(snapshot.attendance.checked);
    assert!(!snapshot.selector.enabled);
}

#[tokio::test]
async fn attendance_needs_a_mentee() {
    let h = harness();
    let err = h.controller.handle_attendance_change(true).await.unwrap_err();
    assert!(err.is_invalid_state());
    assert!(h.gateway.calls().is_empty());
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn meeting_details_scenario() {
    let h = harness();
    let renderer = FormRenderer::new().unwrap();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("points_discussed", text("x")).await.unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();

    h.controller.submit().await.unwrap();

    let posts: Vec<_> = h
        .gateway
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::AddRecord { .. }))
        .collect();
    assert_eq!(
        posts,
        vec![Call::AddRecord {
            mentee_id: 1,
            record_type: RecordType::MentorMeetingDetails,
            record: Record::new()
                .with("points_discussed", "x")
                .with("remarks_given", "y"),
        }]
    );
    assert_eq!(h.prompter.alerts(), vec![messages::RECORD_SAVED]);

    h.controller.show_form(None).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    let form = h.controller.snapshot().await.form.unwrap();
    assert!(form.is_viewing());
    let single = form.as_single().unwrap();
    assert_eq!(single.field("points_discussed").unwrap().value, FieldValue::text("x"));
    assert_eq!(single.field("remarks_given").unwrap().value, FieldValue::text("y"));

    let html = renderer.render(&form).unwrap();
    assert!(html.contains(">x</textarea>"));
    assert!(html.contains(">y</textarea>"));
    assert!(html.contains(">Edit</button>"));
}

#[tokio::test]
async fn missing_required_field_is_rejected_locally() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();

    let err = h.controller.submit().await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(h.gateway.count("add_record"), 0);
    assert_eq!(
        h.prompter.alerts(),
        vec!["Error: 'Points Discussed' is a required field."]
    );
}

#[tokio::test]
async fn internship_with_reversed_dates_is_rejected_locally() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::InternshipInformation))
        .await
        .unwrap();
    for (name, value) in [
        ("company_name", "Acme"),
        ("duration_from", "2024-07-01"),
        ("duration_to", "2024-06-01"),
        ("sem", "6"),
        ("technology_domain", "Rust"),
        ("internship_status", "Completed"),
    ] {
        h.controller.set_field(name, text(value)).await.unwrap();
    }

    let err = h.controller.submit().await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(h.gateway.count("add_record"), 0);
    assert_eq!(
        h.prompter.last_alert().unwrap(),
        r#"Error: "Duration From" date cannot be after "Duration To" date."#
    );
}

#[tokio::test]
async fn blank_subjects_are_rejected_locally() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::AcademicMarkDetails))
        .await
        .unwrap();
    h.controller.add_subject().await.unwrap();
    h.controller
        .set_subject_field(1, "course_acceleration_deceleration", FormInput::Checked(true))
        .await
        .unwrap();

    let err = h.controller.submit().await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(h.gateway.count("add_multi_record"), 0);
    assert_eq!(h.prompter.alerts(), vec![messages::NO_SUBJECT_FILLED]);
}

#[tokio::test]
async fn academic_submit_posts_filled_subjects_only() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::AcademicMarkDetails))
        .await
        .unwrap();
    h.controller.set_subject_field(0, "grade", text("A")).await.unwrap();
    h.controller.add_subject().await.unwrap();

    h.controller.submit().await.unwrap();

    let Some(Call::AddMultiRecord {
        records,
        course_type,
        ..
    }) = h.gateway.calls().pop()
    else {
        panic!("expected a multi-record post");
    };
    assert_eq!(records.len(), 1);
    assert_eq!(course_type, None);
    assert_eq!(h.prompter.alerts(), vec![messages::RECORDS_SAVED]);

    let form = h.controller.snapshot().await.form.unwrap();
    let multi = form.as_multi().unwrap();
    assert!(multi.is_viewing());
    assert_eq!(multi.subjects().len(), 1);
}

#[tokio::test]
async fn honors_submit_requires_course_type_and_locks_it_after_save() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::HonorsMinorMarks))
        .await
        .unwrap();

    assert!(h.controller.add_subject().await.is_err());
    h.controller.set_course_type(Some("Honors")).await.unwrap();
    h.controller
        .set_subject_field(0, "subject_code_name", text("HN301"))
        .await
        .unwrap();
    h.controller.set_course_type(None).await.unwrap();

    let err = h.controller.submit().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(h.prompter.last_alert().unwrap(), messages::NO_SUBJECT_FILLED);

    h.controller.set_course_type(Some("Honors")).await.unwrap();
    h.controller
        .set_subject_field(0, "subject_code_name", text("HN301"))
        .await
        .unwrap();
    h.controller.submit().await.unwrap();

    assert!(matches!(
        h.gateway.calls().pop(),
        Some(Call::AddMultiRecord { course_type: Some(ref t), .. }) if t == "Honors"
    ));
    let form = h.controller.snapshot().await.form.unwrap();
    let multi = form.as_multi().unwrap();
    assert_eq!(multi.course_type(), Some("Honors"));
    assert!(multi.course_type_locked());
    assert!(h.controller.set_course_type(Some("Minors")).await.is_err());
}

#[tokio::test]
async fn honors_without_course_type_is_rejected() {
    let h = harness();
    h.gateway.with_records(
        1,
        RecordType::HonorsMinorMarks,
        vec![Record::new().with("subject_code_name", "HN1")],
    );
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::HonorsMinorMarks))
        .await
        .unwrap();
    h.controller.edit().await.unwrap();

    let err = h.controller.submit().await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(h.prompter.alerts(), vec![messages::NO_COURSE_TYPE]);
    assert_eq!(h.gateway.count("add_multi_record"), 0);
}

#[tokio::test]
async fn server_failure_surfaces_message_and_restores_control() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("points_discussed", text("x")).await.unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();
    h.gateway.fail(
        "add_record",
        MentorlyError::server(Some("Session is closed".to_string())),
    );

    h.controller.submit().await.unwrap_err();

    assert_eq!(h.prompter.alerts(), vec!["Error: Session is closed"]);
    let form = h.controller.snapshot().await.form.unwrap();
    assert!(!form.is_viewing());
    assert_eq!(form.submit().label(), "Save Record");
    assert!(form.submit().is_enabled());
    assert!(h.controller.snapshot().await.cached_types.is_empty());

    h.gateway.fail("add_record", MentorlyError::transport("reset"));
    h.controller.submit().await.unwrap_err();
    assert_eq!(h.prompter.last_alert().unwrap(), "Error: Failed to save record.");
}

#[tokio::test]
async fn multi_failure_uses_multi_fallback() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::AcademicMarkDetails))
        .await
        .unwrap();
    h.controller.set_subject_field(0, "grade", text("B")).await.unwrap();
    h.gateway.fail("add_multi_record", MentorlyError::server(None));

    h.controller.submit().await.unwrap_err();

    assert_eq!(
        h.prompter.last_alert().unwrap(),
        "Error: Failed to save multi-record."
    );
    let form = h.controller.snapshot().await.form.unwrap();
    assert_eq!(form.submit().label(), "Save All Academic Records");
}

#[tokio::test]
async fn second_submit_while_saving_is_rejected() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("points_discussed", text("x")).await.unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();
    let gate = h.gateway.hold("add_record");

    let controller = h.controller.clone();
    let first = tokio::spawn(async move { controller.submit().await });
    gate.entered().await;

    let form = h.controller.snapshot().await.form.unwrap();
    assert_eq!(form.submit().label(), "Saving...");
    assert!(!form.submit().is_enabled());
    assert!(h.controller.submit().await.unwrap_err().is_invalid_state());

    gate.release();
    first.await.unwrap().unwrap();
    assert_eq!(h.gateway.count("add_record"), 1);
}

#[tokio::test]
async fn reshowing_form_during_save_keeps_it_busy() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("points_discussed", text("x")).await.unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();
    let gate = h.gateway.hold("add_record");

    let controller = h.controller.clone();
    let first = tokio::spawn(async move { controller.submit().await });
    gate.entered().await;

    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    let form = h.controller.snapshot().await.form.unwrap();
    assert_eq!(form.submit().label(), "Saving...");

    h.controller.set_field("points_discussed", text("x2")).await.unwrap();
    h.controller.set_field("remarks_given", text("y2")).await.unwrap();
    assert!(h.controller.submit().await.unwrap_err().is_invalid_state());

    gate.release();
    first.await.unwrap().unwrap();

    assert_eq!(h.gateway.count("add_record"), 1);
    let form = h.controller.snapshot().await.form.unwrap();
    assert!(form.is_viewing());
    assert_eq!(form.submit().label(), "Save Record");
}

#[tokio::test]
async fn save_pending_across_reselection_blocks_second_save() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("points_discussed", text("x")).await.unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();
    let gate = h.gateway.hold("add_record");

    let controller = h.controller.clone();
    let first = tokio::spawn(async move { controller.submit().await });
    gate.entered().await;

    h.controller.select_mentee(2).await.unwrap();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("points_discussed", text("x")).await.unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();
    assert!(h.controller.submit().await.unwrap_err().is_invalid_state());

    gate.release();
    first.await.unwrap().unwrap();

    assert_eq!(h.gateway.count("add_record"), 1);
    let form = h.controller.snapshot().await.form.unwrap();
    assert!(!form.submit().is_busy());
    assert!(form.is_viewing());
}

#[tokio::test]
async fn save_finishing_after_switch_caches_for_previous_mentee() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::MentorMeetingDetails))
        .await
        .unwrap();
    h.controller.set_field("points_discussed", text("x")).await.unwrap();
    h.controller.set_field("remarks_given", text("y")).await.unwrap();
    let gate = h.gateway.hold("add_record");

    let controller = h.controller.clone();
    let save = tokio::spawn(async move { controller.submit().await });
    gate.entered().await;
    h.controller.select_mentee(2).await.unwrap();
    gate.release();
    save.await.unwrap().unwrap();

    let snapshot = h.controller.snapshot().await;
    assert_eq!(snapshot.selected.unwrap().id, 2);
    assert!(snapshot.form.is_none());
    assert!(snapshot.cached_types.is_empty());
}

#[tokio::test]
async fn saved_form_in_view_mode_cannot_be_submitted() {
    let h = harness();
    h.gateway.with_records(
        1,
        RecordType::ResearchRecord,
        vec![Record::new().with("title", "Paper")],
    );
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::ResearchRecord))
        .await
        .unwrap();

    assert!(h.controller.submit().await.unwrap_err().is_invalid_state());
    assert!(h.prompter.alerts().is_empty());
}

// ============================================================================
// Session termination
// ============================================================================

#[tokio::test]
async fn declined_end_does_nothing() {
    let h = harness();
    h.prompter.answer_confirm(false);

    assert!(!h.controller.handle_end_session().await.unwrap());

    assert_eq!(h.gateway.count("end_session"), 0);
    assert_eq!(
        h.prompter.prompts(),
        vec![Prompt::Confirm(messages::END_SESSION_CONFIRM.to_string())]
    );
}

#[tokio::test]
async fn confirmed_end_alerts_and_navigates() {
    let h = harness();

    assert!(h.controller.handle_end_session().await.unwrap());

    assert_eq!(
        h.prompter.prompts(),
        vec![
            Prompt::Confirm(messages::END_SESSION_CONFIRM.to_string()),
            Prompt::Alert(messages::SESSION_ENDED.to_string()),
            Prompt::Navigate("/mentor/completed_sessions".to_string()),
        ]
    );
    assert!(h.controller.snapshot().await.ended);
    assert!(h.controller.select_mentee(1).await.unwrap_err().is_invalid_state());
}

#[tokio::test]
async fn failed_end_restores_control_and_state() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.gateway.fail("end_session", MentorlyError::transport("down"));

    h.controller.handle_end_session().await.unwrap_err();

    assert_eq!(
        h.prompter.last_alert().unwrap(),
        "Error: Failed to end session."
    );
    let snapshot = h.controller.snapshot().await;
    assert!(!snapshot.ended);
    assert_eq!(snapshot.end_control.label(), "End Session");
    assert_eq!(snapshot.selected.unwrap().id, 1);
}

#[tokio::test]
async fn end_control_shows_busy_label_while_ending() {
    let h = harness();
    let gate = h.gateway.hold("end_session");

    let controller = h.controller.clone();
    let ending = tokio::spawn(async move { controller.handle_end_session().await });
    gate.entered().await;

    let snapshot = h.controller.snapshot().await;
    assert_eq!(snapshot.end_control.label(), "Ending Session...");
    assert!(h.controller.handle_end_session().await.unwrap_err().is_invalid_state());

    gate.release();
    assert!(ending.await.unwrap().unwrap());
}

#[tokio::test]
async fn snapshot_form_matches_rebuilt_form() {
    let h = harness();
    h.controller.select_mentee(1).await.unwrap();
    h.controller
        .show_form(Some(RecordType::CocurricularActivity))
        .await
        .unwrap();

    let form = h.controller.snapshot().await.form.unwrap();
    assert_eq!(form, RecordForm::build(RecordType::CocurricularActivity, None));
}
