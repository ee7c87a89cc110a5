//! replcheck - black-box test harness for line-oriented database REPLs
//!
//! Drives a child program through its stdin/stdout, compares the captured
//! output against literal expectations, and reports pass/fail with timing.

use std::process::ExitCode;

use clap::Parser;
use replcheck::common::logging;
use replcheck::{cli, commands::Commands};

#[derive(Parser)]
#[command(
    name = "replcheck",
    about = "Black-box test harness for line-oriented database REPLs"
)]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();

    match cli::dispatch(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
