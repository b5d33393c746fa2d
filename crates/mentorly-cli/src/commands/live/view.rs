//! Plain-text rendering of the live-session page.

use colored::Colorize;
use mentorly_application::LiveSessionSnapshot;
use mentorly_core::form::{FormField, MultiRecordForm, RecordForm, SingleRecordForm};
use mentorly_core::record::{FieldKind, FieldValue, RecordType};
use strum::IntoEnumIterator;

pub fn print_record_types() {
    for record_type in RecordType::iter() {
        let marker = if record_type.is_multi_record() {
            " (multi)"
        } else {
            ""
        };
        println!("  {}{}", record_type.as_str(), marker.bright_black());
    }
}

pub fn print_mentees(snapshot: &LiveSessionSnapshot) {
    let selected = snapshot.selected.as_ref().map(|m| m.id);
    for mentee in &snapshot.mentees {
        let line = format!("  {mentee}");
        let leave = if mentee.has_leave { " [leave]" } else { "" };
        if Some(mentee.id) == selected {
            println!("{}{}", line.bright_green().bold(), leave.yellow());
        } else {
            println!("{}{}", line, leave.yellow());
        }
    }
}

fn field_line(field: &FormField) -> String {
    let required = if field.spec.required { "*" } else { "" };
    let value = match (&field.spec.kind, &field.value) {
        (FieldKind::Checkbox, value) if value.is_truthy() => "[x]".to_string(),
        (FieldKind::Checkbox, _) => "[ ]".to_string(),
        (_, FieldValue::Text(s)) if s.is_empty() => "-".bright_black().to_string(),
        (_, value) => value.display_string(),
    };
    let line = format!(
        "    {:<28} {}",
        format!("{}{} ({})", field.spec.label, required, field.spec.name),
        value
    );
    if field.enabled {
        line
    } else {
        line.bright_black().to_string()
    }
}

fn print_single(form: &SingleRecordForm) {
    for field in form.fields() {
        println!("{}", field_line(field));
    }
    if form.edit_control_visible() {
        println!("    {}", "(saved, /edit to change)".bright_black());
    }
}

fn print_multi(form: &MultiRecordForm) {
    if form.record_type() == RecordType::HonorsMinorMarks {
        let course = form.course_type().unwrap_or("-- Select Type --");
        let lock = if form.course_type_locked() {
            " (locked)"
        } else {
            ""
        };
        println!("    Course type: {}{}", course, lock.bright_black());
    }
    for (index, subject) in form.subjects().iter().enumerate() {
        println!("  {}", format!("Subject {}", index + 1).bold());
        for field in subject.fields() {
            println!("{}", field_line(field));
        }
        if subject.add_attempt_visible() && form.actions_visible() {
            println!("    {}", "/attempt to add an ESE attempt".bright_black());
        }
    }
    if form.edit_control_visible() {
        println!("    {}", "(saved, /edit to change)".bright_black());
    }
}

pub fn print_form(form: &RecordForm) {
    let mode = if form.is_viewing() { " (viewing)" } else { "" };
    println!(
        "{}{}",
        format!("== {} ==", form.title()).bright_magenta().bold(),
        mode.bright_black()
    );
    match form {
        RecordForm::Single(single) => print_single(single),
        RecordForm::Multi(multi) => print_multi(multi),
    }
    let submit = form.submit();
    if submit.is_visible() {
        println!("  [{}]", submit.label().bright_cyan());
    }
}

pub fn print_snapshot(snapshot: &LiveSessionSnapshot) {
    println!(
        "{}",
        format!("Session #{}", snapshot.session_id)
            .bright_magenta()
            .bold()
    );
    if snapshot.ended {
        println!("{}", "Session ended.".bright_black());
        return;
    }

    let Some(mentee) = &snapshot.selected else {
        println!("{}", "No mentee selected (/select <id>).".bright_black());
        return;
    };
    println!("Mentee: {}", mentee.to_string().bright_green());

    if let Some(notice) = &snapshot.leave_notice {
        println!("{}", notice.yellow());
        return;
    }

    let attendance = &snapshot.attendance;
    let lock = if attendance.locked { " (locked)" } else { "" };
    println!("Attendance: {}{}", attendance.status(), lock.bright_black());

    let selector = match (&snapshot.selector.value, snapshot.selector.enabled) {
        (_, false) => "disabled".bright_black().to_string(),
        (Some(record_type), true) => record_type.as_str().to_string(),
        (None, true) => "-- select --".to_string(),
    };
    println!("Record type: {selector}");

    if !snapshot.cached_types.is_empty() {
        let saved: Vec<&str> = snapshot.cached_types.iter().map(|t| t.as_str()).collect();
        println!("Saved: {}", saved.join(", ").bright_black());
    }

    if let Some(form) = &snapshot.form {
        println!();
        print_form(form);
    }
}
