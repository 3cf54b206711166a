use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{ExperienceLevel, JobPosting, JobType};

/// Display order for the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Newest first by posting date.
    #[default]
    #[serde(rename = "date-desc")]
    DateDesc,
    /// Highest `salary_max` first.
    #[serde(rename = "salary-desc")]
    SalaryDesc,
}

impl SortKey {
    pub const fn key(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::SalaryDesc => "salary-desc",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SortKey::DateDesc => "Newest First",
            SortKey::SalaryDesc => "Salary: High to Low",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "date-desc" => Ok(SortKey::DateDesc),
            "salary-desc" => Ok(SortKey::SalaryDesc),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key '{0}' (expected date-desc or salary-desc)")]
pub struct UnknownSortKey(pub String);

/// Filter, search and sort settings for the job list. Empty selections mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub job_types: BTreeSet<JobType>,
    #[serde(default)]
    pub locations: BTreeSet<String>,
    #[serde(default)]
    pub experience_levels: BTreeSet<ExperienceLevel>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort: SortKey,
}

impl ViewConfig {
    pub fn toggle_job_type(&mut self, job_type: JobType) {
        toggle(&mut self.job_types, job_type);
    }

    pub fn toggle_location(&mut self, location: impl Into<String>) {
        toggle(&mut self.locations, location.into());
    }

    pub fn toggle_experience(&mut self, level: ExperienceLevel) {
        toggle(&mut self.experience_levels, level);
    }

    /// Drops the selection filters. Search term and sort order stay as they are.
    pub fn clear_filters(&mut self) {
        self.job_types.clear();
        self.locations.clear();
        self.experience_levels.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.job_types.is_empty()
            || !self.locations.is_empty()
            || !self.experience_levels.is_empty()
    }

    fn admits(&self, job: &JobPosting, needle: Option<&str>) -> bool {
        if !self.job_types.is_empty() && !self.job_types.contains(&job.job_type) {
            return false;
        }
        if !self.locations.is_empty() && !self.locations.contains(&job.location) {
            return false;
        }
        if !self.experience_levels.is_empty()
            && !self.experience_levels.contains(&job.experience_level)
        {
            return false;
        }
        match needle {
            Some(needle) => matches_search(job, needle),
            None => true,
        }
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

fn matches_search(job: &JobPosting, needle: &str) -> bool {
    job.title.to_lowercase().contains(needle)
        || job.company.to_lowercase().contains(needle)
        || job
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Computes the displayed postings: filters in any order, then a stable sort.
pub fn derive_view(jobs: &[JobPosting], config: &ViewConfig) -> Vec<JobPosting> {
    let needle = (!config.search.is_empty()).then(|| config.search.to_lowercase());

    let mut view: Vec<JobPosting> = jobs
        .iter()
        .filter(|job| config.admits(job, needle.as_deref()))
        .cloned()
        .collect();

    match config.sort {
        SortKey::DateDesc => view.sort_by(|a, b| b.date_posted.cmp(&a.date_posted)),
        SortKey::SalaryDesc => view.sort_by(|a, b| b.salary_max.cmp(&a.salary_max)),
    }

    view
}

/// Distinct locations across the full list, sorted for the location picker.
pub fn location_options(jobs: &[JobPosting]) -> Vec<String> {
    jobs.iter()
        .map(|job| job.location.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
