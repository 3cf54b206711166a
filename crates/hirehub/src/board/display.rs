use chrono::{DateTime, Utc};

use super::domain::JobPosting;

const CARD_TAG_LIMIT: usize = 3;

const TIME_UNITS: [(f64, &str); 5] = [
    (31_536_000.0, "years"),
    (2_592_000.0, "months"),
    (86_400.0, "days"),
    (3_600.0, "hours"),
    (60.0, "minutes"),
];

fn thousands(value: u32) -> u64 {
    (f64::from(value) / 1000.0).round() as u64
}

/// Compact range used on job cards, e.g. `$120k - $180k`.
pub fn salary_short(min: u32, max: u32) -> String {
    format!("${}k - ${}k", thousands(min), thousands(max))
}

/// Range used on the detail view, e.g. `$120,000 - $180,000`.
pub fn salary_long(min: u32, max: u32) -> String {
    format!("${},000 - ${},000", thousands(min), thousands(max))
}

/// Relative age of a posting, using the largest unit that exceeds one.
pub fn time_ago(posted: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - posted).num_seconds().max(0) as f64;
    for (unit_seconds, unit) in TIME_UNITS {
        let interval = seconds / unit_seconds;
        if interval > 1.0 {
            return format!("{} {unit} ago", interval.floor() as u64);
        }
    }
    format!("{} seconds ago", seconds as u64)
}

pub fn card_tags(job: &JobPosting) -> &[String] {
    &job.tags[..job.tags.len().min(CARD_TAG_LIMIT)]
}

pub fn jobs_found_label(count: usize) -> String {
    format!("{count} jobs found")
}
