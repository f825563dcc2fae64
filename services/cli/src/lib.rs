mod cli;
mod commands;
mod infra;

use betterschool::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
