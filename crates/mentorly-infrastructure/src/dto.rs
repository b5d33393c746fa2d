//! Wire DTOs of the mentor session API.
//!
//! Every response carries a `success` flag and an optional `message`;
//! anything but `success: true` is a failure.

use mentorly_core::record::{FieldValue, Record, RecordType};
use mentorly_core::session::{AttendanceInfo, AttendanceStatus, MenteeId, SessionId};
use mentorly_core::{MentorlyError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The common `{success, message}` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn into_result(self) -> Result<()> {
        check_success(self.success, self.message)
    }
}

fn check_success(success: Option<bool>, message: Option<String>) -> Result<()> {
    if success == Some(true) {
        Ok(())
    } else {
        Err(MentorlyError::server(message))
    }
}

/// Response of `get_records`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub records: BTreeMap<String, Vec<Map<String, Value>>>,
}

impl RecordsResponse {
    /// Converts the records map into typed groups.
    ///
    /// Keys that are not a known record type are skipped with a warning.
    pub fn into_records(self) -> Result<Vec<(RecordType, Vec<Record>)>> {
        check_success(self.success, self.message)?;

        let mut groups = Vec::with_capacity(self.records.len());
        for (key, rows) in self.records {
            let Ok(record_type) = RecordType::from_str(&key) else {
                tracing::warn!("[HttpGateway] Skipping unknown record type '{}'", key);
                continue;
            };
            groups.push((record_type, rows.into_iter().map(record_from_json).collect()));
        }
        Ok(groups)
    }
}

/// Builds a record from a JSON row, keeping scalar values only.
pub fn record_from_json(row: Map<String, Value>) -> Record {
    row.into_iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::Null => FieldValue::Null,
                Value::Bool(b) => FieldValue::Bool(b),
                Value::Number(n) => FieldValue::Number(n),
                Value::String(s) => FieldValue::Text(s),
                Value::Array(_) | Value::Object(_) => {
                    tracing::debug!("[HttpGateway] Dropping non-scalar field '{}'", name);
                    return None;
                }
            };
            Some((name, value))
        })
        .collect()
}

/// Response of `get_attendance`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_absent: bool,
    #[serde(default)]
    pub has_leave: bool,
}

impl AttendanceResponse {
    pub fn into_info(self) -> Result<AttendanceInfo> {
        check_success(self.success, self.message)?;
        Ok(AttendanceInfo {
            is_absent: self.is_absent,
            has_leave: self.has_leave,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRequest {
    pub session_id: SessionId,
    pub mentee_id: MenteeId,
    pub status: AttendanceStatus,
}

/// Body of `add_record`: the record fields with the routing keys on top.
///
/// Routing keys win over record fields of the same name.
pub fn add_record_body(
    session_id: SessionId,
    mentee_id: MenteeId,
    record_type: RecordType,
    record: &Record,
) -> Result<Value> {
    let mut body = match serde_json::to_value(record)? {
        Value::Object(map) => map,
        other => {
            return Err(MentorlyError::internal(format!(
                "record serialized to non-object {other}"
            )));
        }
    };
    body.insert("mentee_id".to_string(), Value::from(mentee_id));
    body.insert("session_id".to_string(), Value::from(session_id));
    body.insert("form_type".to_string(), Value::from(record_type.as_str()));
    Ok(Value::Object(body))
}

#[derive(Debug, Clone, Serialize)]
pub struct AddMultiRecordRequest<'a> {
    pub mentee_id: MenteeId,
    pub session_id: SessionId,
    pub form_type: RecordType,
    pub records: &'a [Record],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndSessionRequest {
    pub session_id: SessionId,
}
