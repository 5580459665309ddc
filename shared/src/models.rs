use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single ingested meeting. Records are created by the webhook and read by
/// the query surface; they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub id: String,
    pub organizer: String,
    pub participants: Vec<String>,
    pub meeting_date: NaiveDate,
    /// Free-form time-of-day string, display-only.
    pub meeting_time: String,
    #[serde(default)]
    pub recording_url: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingStats {
    pub total: u64,
    pub this_week: u64,
    pub this_month: u64,
}
