use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MeetingRecord;

/// The search constraints applied by the query surface. Every dimension is
/// optional; set dimensions combine with logical AND.
///
/// The filter is a plain value so the same instance can be evaluated either
/// natively by a store backend (SQL / REST query parameters) or locally via
/// [`SearchFilter::matches`] against the fallback set. The two paths must
/// return the same records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Case-insensitive substring over `summary` OR `transcript`.
    pub query: Option<String>,
    /// Case-insensitive substring over `organizer`.
    pub organizer: Option<String>,
    /// Inclusive lower bound on `meeting_date`.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `meeting_date`.
    pub date_to: Option<NaiveDate>,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.organizer.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Local evaluator, used by the in-memory backend and the fallback path.
    pub fn matches(&self, record: &MeetingRecord) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let in_summary = record.summary.to_lowercase().contains(&needle);
            let in_transcript = record.transcript.to_lowercase().contains(&needle);
            if !in_summary && !in_transcript {
                return false;
            }
        }

        if let Some(organizer) = &self.organizer {
            if !record
                .organizer
                .to_lowercase()
                .contains(&organizer.to_lowercase())
            {
                return false;
            }
        }

        if let Some(from) = self.date_from {
            if record.meeting_date < from {
                return false;
            }
        }

        if let Some(to) = self.date_to {
            if record.meeting_date > to {
                return false;
            }
        }

        true
    }
}

/// Sorts into the canonical result order: `meeting_date` descending, `id`
/// ascending as the tie-break, so every backend and the fallback path agree.
pub fn sort_by_date(records: &mut [MeetingRecord], descending: bool) {
    records.sort_by(|a, b| {
        let ordering = if descending {
            b.meeting_date.cmp(&a.meeting_date)
        } else {
            a.meeting_date.cmp(&b.meeting_date)
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    });
}

/// Escapes LIKE/ILIKE metacharacters so a native pattern matches the same
/// literals as [`SearchFilter::matches`].
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
