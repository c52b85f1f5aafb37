//! Strata - incremental analysis-store manager
//!
//! A build-time orchestrator that keeps the layered background-knowledge
//! stores of an external success-typing analyzer in sync with a project's
//! transitive dependency closure, then runs whole-program analysis over the
//! project's own compiled artifacts.

use clap::Parser;

mod analysis;
mod artifact;
mod cli;
mod commands;
mod config;
mod engine;
mod error;
mod layer;
mod manifest;
mod path_utils;
mod progress;
mod resolver;
mod store;
mod temp;
mod ui;
mod workspace;

use cli::{Cli, Commands};

/// Exit status when the analysis verb produced findings.
///
/// Distinct from fatal errors (exit 1): the invocation itself succeeded,
/// the project just has findings to fix.
const FINDINGS_STATUS: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyse(args) => {
            match commands::analyse::run(cli.workspace, cli.verbose, args) {
                Ok(0) => Ok(()),
                Ok(_) => std::process::exit(FINDINGS_STATUS),
                Err(e) => Err(e),
            }
        }
        Commands::Check => commands::check::run(cli.workspace, cli.verbose),
        Commands::Stores => commands::stores::run(cli.workspace, cli.verbose),
        Commands::Clean(args) => commands::clean::run(cli.workspace, cli.verbose, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
