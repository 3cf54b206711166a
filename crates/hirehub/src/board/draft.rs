//! Typed form input for postings and applications.
//!
//! Forms hold raw text exactly as entered. `validate` runs the per-field parsers and turns the
//! form into a [`JobDraft`] or [`Application`].

use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ExperienceLevel, JobDraft, JobId, JobPosting, JobType, ParseLabelError,
    ResumeRef,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must be a non-negative whole number, got '{value}'")]
    InvalidSalary { field: &'static str, value: String },
    #[error("minimum salary {min} exceeds maximum salary {max}")]
    SalaryRangeInverted { min: u32, max: u32 },
    #[error(transparent)]
    InvalidLabel(#[from] ParseLabelError),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Raw posting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDraftForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub salary_min: String,
    pub salary_max: String,
    pub tags: String,
    pub description: String,
}

impl Default for JobDraftForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            job_type: JobType::FullTime.label().to_string(),
            experience_level: ExperienceLevel::Entry.label().to_string(),
            salary_min: "0".to_string(),
            salary_max: "0".to_string(),
            tags: String::new(),
            description: String::new(),
        }
    }
}

impl JobDraftForm {
    /// Pre-fills an edit form from an existing posting.
    pub fn from_posting(posting: &JobPosting) -> Self {
        Self {
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            job_type: posting.job_type.label().to_string(),
            experience_level: posting.experience_level.label().to_string(),
            salary_min: posting.salary_min.to_string(),
            salary_max: posting.salary_max.to_string(),
            tags: posting.tags.join(", "),
            description: posting.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<JobDraft, DraftError> {
        let title = parse_required_text("title", &self.title)?;
        let company = parse_required_text("company", &self.company)?;
        let location = parse_required_text("location", &self.location)?;
        let job_type = self.job_type.parse::<JobType>()?;
        let experience_level = self.experience_level.parse::<ExperienceLevel>()?;
        let salary_min = parse_salary("salary_min", &self.salary_min)?;
        let salary_max = parse_salary("salary_max", &self.salary_max)?;
        if salary_min > salary_max {
            return Err(DraftError::SalaryRangeInverted {
                min: salary_min,
                max: salary_max,
            });
        }

        Ok(JobDraft {
            title,
            company,
            location,
            job_type,
            experience_level,
            salary_min,
            salary_max,
            tags: parse_tags(&self.tags),
            description: self.description.clone(),
        })
    }
}

/// Raw application form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub portfolio: String,
    pub cover_letter: String,
    pub resume_file: Option<String>,
}

impl ApplicationForm {
    pub fn validate(&self, job_id: JobId) -> Result<Application, DraftError> {
        let applicant_name = parse_required_text("name", &self.name)?;
        let applicant_email = parse_email(&self.email)?;

        Ok(Application {
            job_id,
            applicant_name,
            applicant_email,
            phone: parse_optional_text(&self.phone),
            linkedin: parse_optional_text(&self.linkedin),
            portfolio: parse_optional_text(&self.portfolio),
            cover_letter: parse_optional_text(&self.cover_letter),
            resume: self
                .resume_file
                .clone()
                .map(ResumeRef::from)
                .unwrap_or_default(),
        })
    }
}

pub fn parse_required_text(field: &'static str, raw: &str) -> Result<String, DraftError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DraftError::MissingField { field });
    }
    Ok(value.to_string())
}

pub fn parse_optional_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn parse_salary(field: &'static str, raw: &str) -> Result<u32, DraftError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| DraftError::InvalidSalary {
            field,
            value: raw.to_string(),
        })
}

/// Comma separated; blanks dropped, order and duplicates kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_email(raw: &str) -> Result<String, DraftError> {
    let value = parse_required_text("email", raw)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(value),
        _ => Err(DraftError::InvalidEmail(value)),
    }
}
