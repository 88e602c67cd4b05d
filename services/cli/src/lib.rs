mod assess;
mod batch;
mod cli;
mod infra;
mod schema;

use heart_risk::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
