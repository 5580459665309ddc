use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::models::MeetingRecord;
use crate::utils::generate_id;

/// Webhook payload keys, in the order they are checked. The first missing
/// one wins; errors are not aggregated.
const REQUIRED_FIELDS: [&str; 4] = [
    "organizador",
    "convidados",
    "data_reuniao",
    "horario_reuniao",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("field {0} is not a valid YYYY-MM-DD date")]
    InvalidDate(&'static str),
}

impl ValidationError {
    /// The webhook field the error refers to, for the `{"error": field}`
    /// response body.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(f) => f,
            ValidationError::InvalidDate(f) => f,
        }
    }
}

/// Validates an arbitrary webhook payload and normalizes it into a
/// [`MeetingRecord`]. Does not persist anything.
pub fn validate_payload(payload: &Value) -> Result<MeetingRecord, ValidationError> {
    for field in REQUIRED_FIELDS {
        if is_missing(payload.get(field)) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let meeting_date = payload
        .get("data_reuniao")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or(ValidationError::InvalidDate("data_reuniao"))?;

    let id = payload
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(generate_id);

    Ok(MeetingRecord {
        id,
        organizer: string_field(payload, "organizador"),
        participants: normalize_participants(&payload["convidados"]),
        meeting_date,
        meeting_time: string_field(payload, "horario_reuniao"),
        recording_url: string_field(payload, "link_gravacao"),
        transcript: string_field(payload, "transcricao"),
        summary: string_field(payload, "resumo"),
    })
}

/// Absent, null, and empty-string values all count as missing, matching how
/// the upstream collaboration tools treat blank form fields.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// A bare value is wrapped as a single-element list; list elements that are
/// not strings are stringified rather than dropped.
fn normalize_participants(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(value_to_string).collect(),
        other => vec![value_to_string(other)],
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_field(payload: &Value, key: &str) -> String {
    match payload.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(value) => value_to_string(value),
    }
}
