use chrono::{DateTime, NaiveDate, Utc};

use super::Job;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Parses a posting date: an RFC 3339 timestamp, or a bare `YYYY-MM-DD`
/// taken as UTC midnight.
pub fn parse_posting_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Whole days until `deadline`, rounded up. Never negative.
pub fn days_left(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (deadline - now).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
}

/// Badge text for a deadline, e.g. "5 days left". Unparseable deadlines
/// read as "0 days left".
pub fn time_left_label(raw_deadline: &str, now: DateTime<Utc>) -> String {
    let days = parse_posting_date(raw_deadline)
        .map(|deadline| days_left(deadline, now))
        .unwrap_or(0);
    format!("{days} days left")
}

/// A posting is live when `now` falls inside `[startDate, lastDate]`.
/// A missing start date means the posting is already open.
pub fn is_live(job: &Job, now: DateTime<Utc>) -> bool {
    let started = match job.start_date.as_deref() {
        None => true,
        Some(raw) => parse_posting_date(raw).is_some_and(|start| start <= now),
    };
    started && parse_posting_date(&job.last_date).is_some_and(|end| end >= now)
}

pub fn live_jobs(jobs: Vec<Job>, now: DateTime<Utc>) -> Vec<Job> {
    jobs.into_iter().filter(|job| is_live(job, now)).collect()
}
