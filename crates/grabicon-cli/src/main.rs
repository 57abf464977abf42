//! grabicon CLI - find every favicon of a webpage
//!
//! Thin entry point; everything lives in the library so integration tests
//! and the binary share one code path.

use colored::Colorize;
use grabicon_cli::error::category_from_error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match grabicon_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            category_from_error(&err).as_exit_code()
        },
    }
}
