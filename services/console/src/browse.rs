use crate::infra::{
    description_gateway, load_registry, parse_experience, parse_job_type, parse_sort_key,
};
use crate::render::{job_detail, job_list, JobListing};
use chrono::Utc;
use clap::Args;
use hirehub::board::{
    derive_view, DescriptionGateway, ExperienceLevel, JobId, JobType, RegistryError,
    SessionError, SortKey, ViewConfig,
};
use hirehub::config::AppConfig;
use hirehub::error::AppError;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Only show this job type (repeatable)
    #[arg(long = "type", value_name = "TYPE", value_parser = parse_job_type)]
    pub(crate) job_types: Vec<JobType>,
    /// Only show this location (repeatable)
    #[arg(long = "location", value_name = "LOCATION")]
    pub(crate) locations: Vec<String>,
    /// Only show this experience level (repeatable)
    #[arg(long = "experience", value_name = "LEVEL", value_parser = parse_experience)]
    pub(crate) experience_levels: Vec<ExperienceLevel>,
    /// Case-insensitive match against title, company and tags
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Sort order: date-desc (default) or salary-desc
    #[arg(long, value_parser = parse_sort_key)]
    pub(crate) sort: Option<SortKey>,
    /// Print the listing as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Optional CSV export to seed the board instead of the sample postings
    #[arg(long)]
    pub(crate) jobs_csv: Option<PathBuf>,
}

impl ListArgs {
    fn view_config(&self) -> ViewConfig {
        ViewConfig {
            job_types: self.job_types.iter().copied().collect(),
            locations: self.locations.iter().cloned().collect(),
            experience_levels: self.experience_levels.iter().copied().collect(),
            search: self.search.clone().unwrap_or_default(),
            sort: self.sort.unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Posting id as shown in the listing
    pub(crate) id: String,
    /// Optional CSV export to seed the board instead of the sample postings
    #[arg(long)]
    pub(crate) jobs_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Job title the description is written for
    #[arg(long)]
    pub(crate) title: String,
    /// Free-form keywords to steer the description
    #[arg(long, default_value = "")]
    pub(crate) keywords: String,
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let registry = load_registry(args.jobs_csv.as_deref())?;
    let config = args.view_config();
    let jobs = derive_view(registry.jobs(), &config);
    info!(
        total = registry.len(),
        shown = jobs.len(),
        sort = %config.sort,
        "listing jobs"
    );

    if args.json {
        let listing = JobListing {
            count: jobs.len(),
            jobs: &jobs,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!(
            "{}",
            job_list(&jobs, |job| registry.has_applied(&job.id), Utc::now())
        );
    }

    Ok(())
}

pub(crate) fn run_show(args: ShowArgs) -> Result<(), AppError> {
    let registry = load_registry(args.jobs_csv.as_deref())?;
    let id = JobId::from(args.id.trim());
    let job = registry
        .get(&id)
        .ok_or_else(|| RegistryError::NotFound(id.clone()))?;

    print!("{}", job_detail(job, Utc::now()));
    Ok(())
}

pub(crate) async fn run_generate(args: GenerateArgs, config: &AppConfig) -> Result<(), AppError> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(SessionError::TitleRequired.into());
    }

    let gateway = description_gateway(&config.generation)?;
    let description = gateway
        .generate_description(title, args.keywords.trim())
        .await?;

    println!("{description}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_args_map_onto_view_config() {
        let args = ListArgs {
            job_types: vec![JobType::Remote, JobType::Remote, JobType::Contract],
            locations: vec!["Berlin, Germany".to_string()],
            search: Some("engineer".to_string()),
            sort: Some(SortKey::SalaryDesc),
            ..ListArgs::default()
        };

        let config = args.view_config();
        assert_eq!(config.job_types.len(), 2);
        assert!(config.locations.contains("Berlin, Germany"));
        assert!(config.experience_levels.is_empty());
        assert_eq!(config.search, "engineer");
        assert_eq!(config.sort, SortKey::SalaryDesc);
    }

    #[test]
    fn default_list_args_show_everything() {
        let config = ListArgs::default().view_config();
        assert_eq!(config, ViewConfig::default());
    }
}
