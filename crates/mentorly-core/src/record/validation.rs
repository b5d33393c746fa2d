//! Client-side validation run before any record is posted.

use super::record_type::RecordType;
use super::schema::{FieldKind, RecordSchema};
use super::value::{FieldValue, Record};
use crate::error::{MentorlyError, Result};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a stored or entered date.
///
/// Accepts `YYYY-MM-DD` optionally followed by a time part
/// (`2024-03-01T00:00:00`), which is how the server serializes dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = match (raw.get(..10), raw.get(10..)) {
        (Some(day), Some(rest)) if rest.is_empty() || rest.starts_with(['T', ' ']) => day,
        _ => raw,
    };
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// Formats a date value for a date input, dropping any time part.
///
/// Values that do not parse are returned unchanged.
pub fn date_input_value(value: &FieldValue) -> String {
    let shown = value.display_string();
    match parse_date(&shown) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => shown,
    }
}

fn required_message(label: &str) -> String {
    format!("Error: '{label}' is a required field.")
}

/// Validates a single record against its schema.
///
/// Fields are checked in display order and the first failure is reported.
/// Internship records additionally need `duration_from <= duration_to`.
pub fn validate_record(schema: &RecordSchema, record: &Record) -> Result<()> {
    for field in schema.fields {
        let value = record.value(field.name);
        if field.required && value.is_blank() {
            return Err(MentorlyError::validation(
                field.name,
                required_message(field.label),
            ));
        }
        if field.kind == FieldKind::Date && !value.is_blank() && parse_date(&value.display_string()).is_none() {
            return Err(MentorlyError::validation(
                field.name,
                format!("Error: '{}' is not a valid date.", field.label),
            ));
        }
    }

    if schema.record_type == RecordType::InternshipInformation {
        let from = parse_date(&record.value("duration_from").display_string());
        let to = parse_date(&record.value("duration_to").display_string());
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(MentorlyError::validation(
                    "duration_to",
                    "Error: \"Duration From\" date cannot be after \"Duration To\" date.",
                ));
            }
        }
    }

    Ok(())
}

/// Whether a collected subject entry has nothing typed into it.
///
/// Checkboxes do not count: an entry with only the acceleration box ticked
/// is still blank.
pub fn is_blank_subject(record: &Record) -> bool {
    record.iter().all(|(_, value)| match value {
        FieldValue::Text(text) => text.trim().is_empty(),
        _ => true,
    })
}
