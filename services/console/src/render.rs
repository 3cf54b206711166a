use chrono::{DateTime, Utc};
use hirehub::board::display::{card_tags, jobs_found_label, salary_long, salary_short, time_ago};
use hirehub::board::{parse_description, JobPosting, Notice, NoticeKind};
use serde::Serialize;
use std::fmt::Write;

pub(crate) const EMPTY_TITLE: &str = "No Jobs Found";
pub(crate) const EMPTY_HINT: &str = "Try adjusting your search or filters.";

/// Machine-readable listing for `--json`.
#[derive(Debug, Serialize)]
pub(crate) struct JobListing<'a> {
    pub(crate) count: usize,
    pub(crate) jobs: &'a [JobPosting],
}

pub(crate) fn job_card(job: &JobPosting, applied: bool, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let badge = if applied { "  [Applied]" } else { "" };
    let _ = writeln!(out, "{}{badge}", job.title);
    let _ = writeln!(out, "  {}", job.company);
    let _ = writeln!(
        out,
        "  {} | {} | {}",
        job.location,
        job.job_type,
        salary_short(job.salary_min, job.salary_max)
    );
    let tags = card_tags(job);
    if !tags.is_empty() {
        let _ = writeln!(out, "  {}", tags.join(" · "));
    }
    let _ = writeln!(out, "  {} (id {})", time_ago(job.date_posted, now), job.id);
    out
}

pub(crate) fn job_list(
    jobs: &[JobPosting],
    is_applied: impl Fn(&JobPosting) -> bool,
    now: DateTime<Utc>,
) -> String {
    if jobs.is_empty() {
        return format!("{EMPTY_TITLE}\n{EMPTY_HINT}\n");
    }

    let mut out = format!("{}\n", jobs_found_label(jobs.len()));
    for job in jobs {
        out.push('\n');
        out.push_str(&job_card(job, is_applied(job), now));
    }
    out
}

pub(crate) fn job_detail(job: &JobPosting, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", job.title);
    let _ = writeln!(out, "{}", job.company);
    let _ = writeln!(out);
    let _ = writeln!(out, "Location:   {}", job.location);
    let _ = writeln!(out, "Job Type:   {}", job.job_type);
    let _ = writeln!(out, "Experience: {}", job.experience_level);
    let _ = writeln!(
        out,
        "Salary:     {} per year",
        salary_long(job.salary_min, job.salary_max)
    );
    let _ = writeln!(out, "Posted:     {}", time_ago(job.date_posted, now));
    if !job.tags.is_empty() {
        let _ = writeln!(out, "Tags:       {}", job.tags.join(", "));
    }

    for section in parse_description(&job.description) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", section.title);
        for item in &section.items {
            let _ = writeln!(out, "  - {item}");
        }
    }
    out
}

pub(crate) fn notice_line(notice: &Notice) -> String {
    let marker = match notice.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    format!("[{marker}] {}", notice.message)
}
