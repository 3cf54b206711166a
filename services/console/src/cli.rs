use crate::browse::{run_generate, run_list, run_show, GenerateArgs, ListArgs, ShowArgs};
use crate::demo::{run_demo, DemoArgs};
use clap::{Parser, Subcommand};
use hirehub::config::AppConfig;
use hirehub::error::AppError;
use hirehub::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "HireHub",
    about = "Browse, post and apply to jobs on the HireHub board from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List postings with filters, search and sorting (default command)
    List(ListArgs),
    /// Show the detail view of a single posting
    Show(ShowArgs),
    /// Draft a job description with the configured text-generation service
    Generate(GenerateArgs),
    /// Run a scripted recruiter and job seeker walkthrough
    Demo(DemoArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::List(ListArgs::default()));

    match command {
        Command::List(args) => run_list(args),
        Command::Show(args) => run_show(args),
        Command::Generate(args) => run_generate(args, &config).await,
        Command::Demo(args) => run_demo(args, &config).await,
    }
}
