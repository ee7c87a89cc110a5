//! CLI command definitions
//!
//! Defines the clap commands for the harness CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run scenarios against a child program and report results
    Run {
        /// Child program to drive (falls back to child.program from config)
        program: Option<PathBuf>,

        /// Fixture file handed to the child (default: test.db)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Scenario file(s) to run after the built-in suite
        /// Can be specified multiple times: --scenarios a.yaml --scenarios b.yaml
        #[arg(long = "scenarios", value_name = "FILE")]
        scenario_files: Vec<PathBuf>,

        /// Skip the built-in suite, run only scenario files
        #[arg(long)]
        no_builtin: bool,

        /// Only run scenarios whose name contains this substring
        #[arg(long)]
        filter: Option<String>,

        /// Kill a child run after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Exit 0 even when checks failed (failures stay visible in the report)
        #[arg(long)]
        exit_zero: bool,

        /// Print the summary as JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Path to a configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List scenario names without running anything
    List {
        /// Scenario file(s) to include
        #[arg(long = "scenarios", value_name = "FILE")]
        scenario_files: Vec<PathBuf>,

        /// Leave out the built-in suite
        #[arg(long)]
        no_builtin: bool,
    },

    /// Run one script against the child and print the raw capture
    Exec {
        /// Child program to drive (falls back to child.program from config)
        program: Option<PathBuf>,

        /// Fixture file handed to the child (default: test.db)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Read the script from this file instead of stdin
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Leave the fixture file in place afterwards
        #[arg(long)]
        persistent: bool,

        /// Kill the run after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Path to a configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
