//! CLI command handling
//!
//! Builds the driver and scenario list from arguments and configuration,
//! hands them to the suite runner, and turns the summary into an exit code.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use tokio::io::AsyncReadExt;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::harness::{Driver, Fixture, ScriptRunner};
use crate::suite::{self, builtin, RunOptions, Scenario, ScenarioFile};

/// Dispatch a CLI command, returning the process exit code
pub async fn dispatch(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Run {
            program,
            db,
            scenario_files,
            no_builtin,
            filter,
            timeout,
            exit_zero,
            json,
            config,
        } => {
            let config = Config::load(config.as_deref())?;
            let driver = build_driver(&config, program.as_deref(), db, timeout)?;
            let scenarios = gather_scenarios(&scenario_files, no_builtin)?;

            let options = RunOptions {
                filter,
                quiet: json,
            };
            let summary = suite::run(&driver, &scenarios, &options).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!();
                print!("{}", summary.render());
            }

            if summary.passed() || exit_zero {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(1))
            }
        }

        Commands::List {
            scenario_files,
            no_builtin,
        } => {
            let scenarios = gather_scenarios(&scenario_files, no_builtin)?;
            for scenario in &scenarios {
                if scenario.skip {
                    println!("{} (skip)", scenario.name);
                } else {
                    println!("{}", scenario.name);
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Exec {
            program,
            db,
            script,
            persistent,
            timeout,
            config,
        } => {
            let config = Config::load(config.as_deref())?;
            let driver = build_driver(&config, program.as_deref(), db, timeout)?;

            let text = match script {
                Some(path) => {
                    std::fs::read_to_string(&path).map_err(|e| Error::file_read(&path, &e))?
                }
                None => {
                    let mut buf = String::new();
                    tokio::io::stdin().read_to_string(&mut buf).await?;
                    buf
                }
            };

            let capture = if persistent {
                driver.run_persistent(&text).await?
            } else {
                driver.run_script(&text).await?
            };
            print!("{}", capture);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Assemble the driver from CLI arguments and configuration
fn build_driver(
    config: &Config,
    program: Option<&Path>,
    db: Option<PathBuf>,
    timeout: Option<u64>,
) -> Result<Driver> {
    let program = config.resolve_program(program)?;
    let fixture = Fixture::new(db.unwrap_or_else(|| config.fixture.path.clone()));
    let timeout = timeout
        .or(config.timeouts.run_secs)
        .map(Duration::from_secs);
    Ok(Driver::new(program, fixture).with_timeout(timeout))
}

/// Built-in suite plus any scenario files, in that order
fn gather_scenarios(files: &[PathBuf], no_builtin: bool) -> Result<Vec<Scenario>> {
    let mut scenarios = if no_builtin {
        Vec::new()
    } else {
        builtin::scenarios()
    };
    for path in files {
        scenarios.extend(ScenarioFile::load(path)?.into_scenarios());
    }
    Ok(scenarios)
}
