mod cli;
mod compare;
mod infra;
mod routes;
mod server;

use clarity::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
