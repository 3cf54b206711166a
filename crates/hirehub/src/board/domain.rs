use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Random token, independent of the posting date.
    pub fn generate() -> Self {
        JobId(format!("job-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        JobId(value.to_string())
    }
}

/// Employment arrangement advertised by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Remote")]
    Remote,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Remote,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Remote => "Remote",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobType {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full-time" | "fulltime" | "full_time" => Ok(JobType::FullTime),
            "part-time" | "parttime" | "part_time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "remote" => Ok(JobType::Remote),
            _ => Err(ParseLabelError::new("job type", value)),
        }
    }
}

/// Seniority band a posting targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    Entry,
    #[serde(rename = "Mid Level")]
    Mid,
    #[serde(rename = "Senior Level")]
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Mid => "Mid Level",
            ExperienceLevel::Senior => "Senior Level",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExperienceLevel {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "entry" | "entry level" => Ok(ExperienceLevel::Entry),
            "mid" | "mid level" => Ok(ExperienceLevel::Mid),
            "senior" | "senior level" => Ok(ExperienceLevel::Senior),
            _ => Err(ParseLabelError::new("experience level", value)),
        }
    }
}

/// Who is driving the session. Recruiters manage postings; job seekers apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "Recruiter")]
    Recruiter,
    #[default]
    #[serde(rename = "Job Seeker")]
    JobSeeker,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::Recruiter => "Recruiter",
            UserRole::JobSeeker => "Job Seeker",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UserRole {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "recruiter" => Ok(UserRole::Recruiter),
            "job seeker" | "job-seeker" | "jobseeker" | "seeker" => Ok(UserRole::JobSeeker),
            _ => Err(ParseLabelError::new("role", value)),
        }
    }
}

/// Raised when a categorical label does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A published job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub salary_min: u32,
    pub salary_max: u32,
    pub tags: Vec<String>,
    pub description: String,
    pub date_posted: DateTime<Utc>,
}

impl JobPosting {
    pub fn from_draft(id: JobId, draft: JobDraft, date_posted: DateTime<Utc>) -> Self {
        let JobDraft {
            title,
            company,
            location,
            job_type,
            experience_level,
            salary_min,
            salary_max,
            tags,
            description,
        } = draft;

        Self {
            id,
            title,
            company,
            location,
            job_type,
            experience_level,
            salary_min,
            salary_max,
            tags,
            description,
            date_posted,
        }
    }

    /// Overwrites every field except `id` and `date_posted`.
    pub fn apply_draft(&mut self, draft: JobDraft) {
        let id = self.id.clone();
        let date_posted = self.date_posted;
        *self = JobPosting::from_draft(id, draft, date_posted);
    }
}

/// Posting fields prior to id and date assignment; input to create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub salary_min: u32,
    pub salary_max: u32,
    pub tags: Vec<String>,
    pub description: String,
}

/// Resume attachment reference; only the file name is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ResumeRef {
    File(String),
    #[default]
    NotProvided,
}

impl ResumeRef {
    pub const SENTINEL: &'static str = "N/A";

    pub fn as_str(&self) -> &str {
        match self {
            ResumeRef::File(name) => name,
            ResumeRef::NotProvided => Self::SENTINEL,
        }
    }
}

impl From<String> for ResumeRef {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == Self::SENTINEL {
            ResumeRef::NotProvided
        } else {
            ResumeRef::File(trimmed.to_string())
        }
    }
}

impl From<ResumeRef> for String {
    fn from(value: ResumeRef) -> Self {
        value.as_str().to_string()
    }
}

/// One-shot application for a posting. Only `job_id` outlives the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub job_id: JobId,
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume: ResumeRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for job_type in JobType::ALL {
            assert_eq!(job_type.label().parse::<JobType>(), Ok(job_type));
        }
        for level in ExperienceLevel::ALL {
            assert_eq!(level.label().parse::<ExperienceLevel>(), Ok(level));
        }
        assert_eq!("senior".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Senior));
        assert_eq!("Job Seeker".parse::<UserRole>(), Ok(UserRole::JobSeeker));
    }

    #[test]
    fn unknown_label_names_the_kind() {
        let err = "freelance".parse::<JobType>().expect_err("not a job type");
        assert_eq!(err.to_string(), "unknown job type 'freelance'");
    }

    #[test]
    fn posting_serializes_with_camel_case_field_names() {
        let posting = JobPosting {
            id: JobId::from("7"),
            title: "Platform Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::Remote,
            experience_level: ExperienceLevel::Mid,
            salary_min: 100_000,
            salary_max: 140_000,
            tags: vec!["Rust".to_string()],
            description: String::new(),
            date_posted: "2024-07-22T10:00:00Z".parse().expect("valid timestamp"),
        };

        let value = serde_json::to_value(&posting).expect("serializes");
        assert_eq!(value["type"], "Remote");
        assert_eq!(value["experienceLevel"], "Mid Level");
        assert_eq!(value["salaryMax"], 140_000);
        assert_eq!(value["datePosted"], "2024-07-22T10:00:00Z");
    }

    #[test]
    fn resume_sentinel_maps_to_not_provided() {
        assert_eq!(ResumeRef::from("N/A".to_string()), ResumeRef::NotProvided);
        assert_eq!(ResumeRef::from("  ".to_string()), ResumeRef::NotProvided);
        assert_eq!(ResumeRef::NotProvided.as_str(), "N/A");
        assert_eq!(
            ResumeRef::from("cv.pdf".to_string()),
            ResumeRef::File("cv.pdf".to_string())
        );
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(JobId::generate(), JobId::generate());
    }
}
