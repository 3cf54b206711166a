//! Seed data for a fresh session: the built-in sample postings or a CSV export.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::domain::{ExperienceLevel, JobId, JobPosting, JobType, ParseLabelError};
use super::draft::parse_tags;

#[allow(clippy::too_many_arguments)]
fn starter(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    job_type: JobType,
    experience_level: ExperienceLevel,
    salary: (u32, u32),
    tags: &[&str],
    description: &str,
    date_posted: &str,
) -> JobPosting {
    JobPosting {
        id: JobId::from(id),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        job_type,
        experience_level,
        salary_min: salary.0,
        salary_max: salary.1,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        description: description.to_string(),
        date_posted: DateTime::parse_from_rfc3339(date_posted)
            .map(|date| date.with_timezone(&Utc))
            .unwrap_or_default(),
    }
}

/// The six sample postings every session starts with.
pub fn starter_jobs() -> Vec<JobPosting> {
    vec![
        starter(
            "1",
            "Senior Frontend Developer",
            "TechCorp Inc.",
            "San Francisco, CA",
            JobType::FullTime,
            ExperienceLevel::Senior,
            (120_000, 180_000),
            &["React", "TypeScript", "Next.js"],
            "## Job Description\nWe're looking for a skilled Senior Frontend Developer to join our dynamic team. You'll be responsible for building cutting-edge web applications using modern technologies and best practices.\n## Requirements\n- 5+ years of experience with React and modern JavaScript.\n- Strong knowledge of TypeScript and Next.js.\n- Experience with state management (Redux, Zustand).\n## Benefits\n- Competitive salary and equity package.\n- Health, dental, and vision insurance.\n- Flexible work arrangements.",
            "2024-07-22T10:00:00Z",
        ),
        starter(
            "2",
            "Product Manager",
            "InnovateLabs",
            "New York, NY",
            JobType::FullTime,
            ExperienceLevel::Mid,
            (130_000, 200_000),
            &["Strategy", "Analytics", "Leadership"],
            "## Job Description\nWe are seeking an experienced Product Manager to guide the development of our flagship product. You will work with cross-functional teams to design, build, and roll-out products that deliver the company’s vision and strategy.\n## Requirements\n- 4+ years of product management experience.\n- Proven track record of managing all aspects of a successful product throughout its lifecycle.\n## Benefits\n- A-class medical, dental, and vision insurance.\n- 401(k) with company match.\n- Generous vacation policy.",
            "2024-07-21T14:30:00Z",
        ),
        starter(
            "3",
            "UX Designer",
            "DesignStudio Pro",
            "Remote",
            JobType::Remote,
            ExperienceLevel::Mid,
            (80_000, 120_000),
            &["Figma", "User Research", "Prototyping"],
            "## Job Description\nJoin our fully remote team as a UX Designer to create intuitive and engaging user experiences. You will be responsible for the entire design process, from user research to final hand-off to engineering.\n## Requirements\n- 3+ years of UX design experience.\n- A strong portfolio showcasing your design process and projects.\n- Proficiency in Figma, Sketch, or Adobe XD.\n## Benefits\n- Fully remote work environment.\n- Flexible work hours.\n- Health and wellness stipend.",
            "2024-07-20T09:00:00Z",
        ),
        starter(
            "4",
            "Data Scientist",
            "DataFlow Analytics",
            "London, UK",
            JobType::FullTime,
            ExperienceLevel::Senior,
            (90_000, 130_000),
            &["Python", "Machine Learning", "SQL"],
            "## Job Description\nWe are looking for a Data Scientist to analyze large amounts of raw information to find patterns that will help improve our company. We will rely on you to build data products to extract valuable business insights.\n## Requirements\n- Proven experience as a Data Scientist or Data Analyst.\n- Experience in data mining and machine learning.\n## Benefits\n- Pension scheme.\n- Private health insurance.\n- Continuous learning opportunities.",
            "2024-07-19T11:00:00Z",
        ),
        starter(
            "5",
            "DevOps Engineer",
            "CloudTech Solutions",
            "Berlin, Germany",
            JobType::Contract,
            ExperienceLevel::Mid,
            (85_000, 120_000),
            &["AWS", "Docker", "Kubernetes"],
            "## Job Description\nAs a DevOps Engineer, you will be responsible for deploying, automating, maintaining, and managing our cloud-based production system, to ensure the availability, performance, scalability, and security of productions systems.\n## Requirements\n- 2+ years of experience in a DevOps role.\n- Strong experience with AWS or other cloud providers.\n## Benefits\n- Competitive contract rate.\n- Opportunity to work with modern technologies.",
            "2024-07-18T16:00:00Z",
        ),
        starter(
            "6",
            "Junior Software Engineer",
            "CodeCrafters",
            "New York, NY",
            JobType::FullTime,
            ExperienceLevel::Entry,
            (75_000, 95_000),
            &["JavaScript", "Node.js", "React"],
            "## Job Description\nWe are looking for a motivated Junior Software Engineer to join our growing team. You will have the opportunity to work on exciting projects and learn from experienced developers.\n## Requirements\n- Bachelor's degree in Computer Science or related field.\n- Solid understanding of fundamental web technologies.\n## Benefits\n- Mentorship program.\n- Comprehensive benefits package.\n- Opportunities for career growth.",
            "2024-07-23T08:00:00Z",
        ),
    ]
}

#[derive(Debug)]
pub enum JobImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { row: usize, message: String },
}

impl std::fmt::Display for JobImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobImportError::Io(err) => write!(f, "failed to read job export: {err}"),
            JobImportError::Csv(err) => write!(f, "invalid job CSV data: {err}"),
            JobImportError::InvalidRow { row, message } => {
                write!(f, "job CSV row {row}: {message}")
            }
        }
    }
}

impl std::error::Error for JobImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JobImportError::Io(err) => Some(err),
            JobImportError::Csv(err) => Some(err),
            JobImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for JobImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for JobImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobRow {
    id: String,
    title: String,
    company: String,
    location: String,
    #[serde(rename = "type")]
    job_type: String,
    experience_level: String,
    salary_min: u32,
    salary_max: u32,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    description: String,
    date_posted: String,
}

impl JobRow {
    fn into_posting(self, row: usize) -> Result<JobPosting, JobImportError> {
        let invalid_label = |err: ParseLabelError| JobImportError::InvalidRow {
            row,
            message: err.to_string(),
        };
        let job_type = self.job_type.parse::<JobType>().map_err(invalid_label)?;
        let experience_level = self
            .experience_level
            .parse::<ExperienceLevel>()
            .map_err(invalid_label)?;
        let date_posted = DateTime::parse_from_rfc3339(self.date_posted.trim())
            .map_err(|err| JobImportError::InvalidRow {
                row,
                message: format!("datePosted '{}' is not RFC 3339 ({err})", self.date_posted),
            })?
            .with_timezone(&Utc);
        if self.id.trim().is_empty() {
            return Err(JobImportError::InvalidRow {
                row,
                message: "id is required".to_string(),
            });
        }

        Ok(JobPosting {
            id: JobId(self.id.trim().to_string()),
            title: self.title,
            company: self.company,
            location: self.location,
            job_type,
            experience_level,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            tags: parse_tags(&self.tags.replace(';', ",")),
            description: self.description,
            date_posted,
        })
    }
}

/// Loads postings from a CSV export with the posting field names as headers.
///
/// `tags` are `;` separated and `datePosted` is RFC 3339.
pub struct JobCsvImporter;

impl JobCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<JobPosting>, JobImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<JobPosting>, JobImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut postings = Vec::new();

        for (index, record) in csv_reader.deserialize::<JobRow>().enumerate() {
            let row = record?;
            postings.push(row.into_posting(index + 1)?);
        }

        Ok(postings)
    }
}
