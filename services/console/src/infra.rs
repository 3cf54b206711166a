use hirehub::board::{
    starter_jobs, ExperienceLevel, GeminiGateway, JobCsvImporter, JobRegistry, JobType, SortKey,
};
use hirehub::config::GenerationConfig;
use hirehub::error::AppError;
use std::path::Path;
use tracing::info;

/// Seeds a registry from a CSV export, or from the built-in postings when no path is given.
pub(crate) fn load_registry(jobs_csv: Option<&Path>) -> Result<JobRegistry, AppError> {
    let jobs = match jobs_csv {
        Some(path) => {
            let jobs = JobCsvImporter::from_path(path)?;
            info!(path = %path.display(), count = jobs.len(), "imported job export");
            jobs
        }
        None => starter_jobs(),
    };

    Ok(JobRegistry::with_jobs(jobs)?)
}

pub(crate) fn description_gateway(config: &GenerationConfig) -> Result<GeminiGateway, AppError> {
    let gateway = GeminiGateway::from_config(config)?;
    info!(model = %config.model, "text generation gateway ready");
    Ok(gateway)
}

pub(crate) fn parse_job_type(raw: &str) -> Result<JobType, String> {
    raw.parse::<JobType>().map_err(|err| {
        format!("{err} (expected one of: Full-time, Part-time, Contract, Remote)")
    })
}

pub(crate) fn parse_experience(raw: &str) -> Result<ExperienceLevel, String> {
    raw.parse::<ExperienceLevel>().map_err(|err| {
        format!("{err} (expected one of: Entry Level, Mid Level, Senior Level)")
    })
}

pub(crate) fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    raw.parse::<SortKey>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirehub::board::JobId;

    #[test]
    fn label_parsers_accept_display_names() {
        assert_eq!(parse_job_type("Full-time"), Ok(JobType::FullTime));
        assert_eq!(parse_job_type("remote"), Ok(JobType::Remote));
        assert_eq!(
            parse_experience("Senior Level"),
            Ok(ExperienceLevel::Senior)
        );
        assert_eq!(parse_sort_key("salary-desc"), Ok(SortKey::SalaryDesc));
    }

    #[test]
    fn label_parsers_list_valid_choices() {
        let err = parse_job_type("Freelance").expect_err("not a job type");
        assert!(err.contains("Freelance"));
        assert!(err.contains("Part-time"));
        assert!(parse_sort_key("newest").is_err());
    }

    #[test]
    fn registry_defaults_to_starter_postings() {
        let registry = load_registry(None).expect("starter postings load");
        assert_eq!(registry.len(), 6);
        assert!(registry.contains(&JobId::from("1")));
    }

    #[test]
    fn missing_export_is_an_import_error() {
        let err = load_registry(Some(Path::new("/nonexistent/jobs.csv")))
            .expect_err("file does not exist");
        assert!(matches!(err, AppError::Import(_)));
    }
}
