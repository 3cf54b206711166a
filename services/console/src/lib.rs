mod browse;
mod cli;
mod demo;
mod infra;
mod render;

use hirehub::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
