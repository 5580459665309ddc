use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{MeetingRecord, MeetingStats};

/// Counts total / this-week / this-month meetings relative to a single `now`
/// reference. Both window boundaries are derived once from `now` so the two
/// counts stay consistent within one call.
///
/// The week starts on the most recent Sunday at or before `now`; the month
/// window starts on the first calendar day of `now`'s month.
pub fn compute_stats(records: &[MeetingRecord], now: NaiveDate) -> MeetingStats {
    let week_start = now - Duration::days(i64::from(now.weekday().num_days_from_sunday()));
    let month_start = now
        .with_day(1)
        .unwrap_or(now);

    let this_week = records
        .iter()
        .filter(|r| r.meeting_date >= week_start)
        .count() as u64;
    let this_month = records
        .iter()
        .filter(|r| r.meeting_date >= month_start)
        .count() as u64;

    MeetingStats {
        total: records.len() as u64,
        this_week,
        this_month,
    }
}
