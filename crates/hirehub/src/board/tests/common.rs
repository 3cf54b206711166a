use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::board::domain::{ExperienceLevel, JobDraft, JobId, JobPosting, JobType, UserRole};
use crate::board::generation::{DescriptionGateway, GenerationFailure};
use crate::board::registry::JobRegistry;
use crate::board::seed::starter_jobs;
use crate::board::session::BoardSession;
use crate::config::BoardConfig;

pub(super) fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("valid timestamp")
}

pub(super) fn posting(
    id: &str,
    job_type: JobType,
    location: &str,
    salary_max: u32,
    date_posted: &str,
) -> JobPosting {
    JobPosting {
        id: JobId::from(id),
        title: format!("Role {id}"),
        company: format!("Company {id}"),
        location: location.to_string(),
        job_type,
        experience_level: ExperienceLevel::Mid,
        salary_min: salary_max / 2,
        salary_max,
        tags: Vec::new(),
        description: String::new(),
        date_posted: at(date_posted),
    }
}

pub(super) fn draft(title: &str) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        company: "Ferrous Labs".to_string(),
        location: "Remote".to_string(),
        job_type: JobType::Remote,
        experience_level: ExperienceLevel::Senior,
        salary_min: 140_000,
        salary_max: 190_000,
        tags: vec!["Rust".to_string(), "Tokio".to_string()],
        description: "## Job Description\nBuild the board.".to_string(),
    }
}

pub(super) fn seeded_registry() -> JobRegistry {
    JobRegistry::with_jobs(starter_jobs()).expect("starter ids are unique")
}

pub(super) fn seeker_session() -> BoardSession {
    BoardSession::new(seeded_registry(), &BoardConfig::default())
}

pub(super) fn recruiter_session() -> BoardSession {
    let mut session = seeker_session();
    session.set_role(UserRole::Recruiter);
    session
}

pub(super) fn ids(jobs: &[JobPosting]) -> Vec<&str> {
    jobs.iter().map(|job| job.id.as_str()).collect()
}

/// Gateway returning a fixed description.
pub(super) struct StaticGateway(pub(super) &'static str);

#[async_trait]
impl DescriptionGateway for StaticGateway {
    async fn generate_description(
        &self,
        _title: &str,
        _keywords: &str,
    ) -> Result<String, GenerationFailure> {
        Ok(self.0.to_string())
    }
}

/// Gateway that always fails.
pub(super) struct FailingGateway;

#[async_trait]
impl DescriptionGateway for FailingGateway {
    async fn generate_description(
        &self,
        _title: &str,
        _keywords: &str,
    ) -> Result<String, GenerationFailure> {
        Err(GenerationFailure)
    }
}
