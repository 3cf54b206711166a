use crate::infra::{description_gateway, load_registry};
use crate::render::{job_card, notice_line};
use chrono::{Duration, Utc};
use clap::Args;
use hirehub::board::display::{jobs_found_label, salary_long};
use hirehub::board::{
    ApplicationForm, BoardSession, DescriptionGateway, GenerationOutcome, JobDraftForm, JobType,
    SortKey, UserRole,
};
use hirehub::config::AppConfig;
use hirehub::error::AppError;
use std::path::PathBuf;
use tracing::info;

const DEMO_DESCRIPTION: &str = "## Job Description\nOwn the services that keep the board fast and reliable.\n## Requirements\n- 4+ years of production Rust.\n- Comfortable with async runtimes and tracing.\n## Benefits\n- Remote-first team.\n- Learning budget.";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Draft the posted job's description with the live text-generation service
    #[arg(long)]
    pub(crate) generate: bool,
    /// Keywords handed to the text-generation service
    #[arg(long, default_value = "async Rust, observability, mentoring")]
    pub(crate) keywords: String,
    /// Optional CSV export to seed the board instead of the sample postings
    #[arg(long)]
    pub(crate) jobs_csv: Option<PathBuf>,
}

pub(crate) async fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        generate,
        keywords,
        jobs_csv,
    } = args;

    let gateway = if generate {
        Some(description_gateway(&config.generation)?)
    } else {
        None
    };
    let registry = load_registry(jobs_csv.as_deref())?;
    let mut session = BoardSession::new(registry, &config.board);
    info!(jobs = session.registry().len(), "demo session started");

    println!("HireHub board demo");
    println!("{}", jobs_found_label(session.displayed_jobs().len()));
    if let Some(job) = session.selected_job() {
        println!("Selected: {} at {}", job.title, job.company);
    }

    println!("\nJob seeker applies");
    let first = session.displayed_jobs().first().map(|job| job.id.clone());
    if let Some(id) = first {
        let application = demo_application();
        session.apply(&id, &application)?;
        print_latest_notice(&session);
        session.apply(&id, &application)?;
        println!(
            "  applied set holds {} job(s) after applying twice; button shows {:?}",
            session.registry().applied().len(),
            session.apply_affordance(&id)
        );
    }
    if let Err(err) = session.open_new_draft() {
        println!("  posting is blocked: {err}");
    }

    println!("\nRecruiter posts a job");
    session.set_role(UserRole::Recruiter);
    session.open_new_draft()?;
    if let Some(form) = session.draft_form_mut() {
        *form = demo_job_form();
    }
    match &gateway {
        Some(gateway) => {
            let ticket = session.request_generation(&keywords)?;
            let result = gateway
                .generate_description(&ticket.title, &ticket.keywords)
                .await;
            match session.complete_generation(&ticket, result) {
                GenerationOutcome::Applied => println!("  description drafted by the gateway"),
                GenerationOutcome::Failed => print_latest_notice(&session),
                GenerationOutcome::Stale => println!("  generated description arrived too late"),
            }
        }
        None => {
            if let Some(form) = session.draft_form_mut() {
                form.description = DEMO_DESCRIPTION.to_string();
            }
        }
    }
    let posted = session.submit_draft()?;
    print_latest_notice(&session);
    for line in job_card(&posted, false, Utc::now()).lines() {
        println!("  {line}");
    }

    println!("\nRecruiter edits the posting");
    session.open_edit_draft(&posted.id)?;
    if let Some(form) = session.draft_form_mut() {
        form.salary_max = "210000".to_string();
    }
    let updated = session.submit_draft()?;
    print_latest_notice(&session);
    println!(
        "  {} now pays {}",
        updated.title,
        salary_long(updated.salary_min, updated.salary_max)
    );

    println!("\nFilters and sorting");
    println!("  locations: {}", session.location_options().join(", "));
    session.view_config_mut().toggle_job_type(JobType::Remote);
    let remote = session.displayed_jobs();
    println!("  type = Remote: {}", jobs_found_label(remote.len()));
    for job in &remote {
        println!("    - {} ({})", job.title, job.company);
    }
    session.view_config_mut().clear_filters();
    session.view_config_mut().sort = SortKey::SalaryDesc;
    if !session.view_config().has_active_filters() {
        println!("  filters cleared");
    }
    println!("  sorted by {}:", SortKey::SalaryDesc.label());
    for job in session.displayed_jobs().iter().take(3) {
        println!(
            "    - {} {}",
            job.title,
            salary_long(job.salary_min, job.salary_max)
        );
    }

    println!("\nRecruiter deletes the selected posting");
    session.select(&updated.id);
    session.delete_job(&updated.id)?;
    print_latest_notice(&session);
    match session.selected_job() {
        Some(job) => println!("  selection moved to {}", job.title),
        None => println!("  board is empty; nothing selected"),
    }

    println!("\nNotices");
    let now = Utc::now();
    for notice in session.notices().active(now) {
        println!("  {}", notice_line(notice));
    }
    let ttl = config.board.notice_ttl.as_secs();
    let dismissed = session
        .notices_mut()
        .prune(now + Duration::seconds(ttl as i64));
    println!("  {dismissed} notice(s) auto-dismiss after {ttl}s");

    Ok(())
}

fn print_latest_notice(session: &BoardSession) {
    if let Some(notice) = session.notices().latest() {
        println!("  {}", notice_line(notice));
    }
}

fn demo_application() -> ApplicationForm {
    ApplicationForm {
        name: "Alex Rivera".to_string(),
        email: "alex.rivera@example.com".to_string(),
        linkedin: "https://www.linkedin.com/in/alex-rivera".to_string(),
        cover_letter: "I'd love to help ship this product.".to_string(),
        resume_file: Some("alex-rivera-resume.pdf".to_string()),
        ..ApplicationForm::default()
    }
}

fn demo_job_form() -> JobDraftForm {
    JobDraftForm {
        title: "Senior Rust Engineer".to_string(),
        company: "HireHub".to_string(),
        location: "Remote".to_string(),
        job_type: JobType::Remote.label().to_string(),
        experience_level: "Senior Level".to_string(),
        salary_min: "150000".to_string(),
        salary_max: "195000".to_string(),
        tags: "Rust, Tokio, Tracing, Postgres".to_string(),
        description: String::new(),
    }
}
