//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - analyse: Analyse command arguments
//! - clean: Clean command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod analyse;
pub mod clean;
pub mod completions;

pub use analyse::AnalyseArgs;
pub use clean::CleanArgs;
pub use completions::CompletionsArgs;

/// Strata - incremental analysis-store manager
///
/// Keeps layered analysis stores in sync with a project's dependency closure
/// and runs whole-program success-typing analysis against them.
#[derive(Parser, Debug)]
#[command(
    name = "strata",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Incremental analysis-store manager for whole-program success-typing analysis",
    long_about = "Strata resolves a project's transitive dependency closure, keeps the layered \
                  background-knowledge stores of an external success-typing analyzer up to date \
                  with minimal add/remove/verify operations, and runs whole-program analysis \
                  over the project's own compiled artifacts.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  strata analyse                    \x1b[90m# Reconcile stores, then analyse the project\x1b[0m\n   \
                  strata analyse -W unknown-calls   \x1b[90m# Enable an extra warning category\x1b[0m\n   \
                  strata analyse --no-check         \x1b[90m# Analyse against existing stores as-is\x1b[0m\n   \
                  strata check                      \x1b[90m# Only bring the stores up to date\x1b[0m\n   \
                  strata stores                     \x1b[90m# Show this environment's store files\x1b[0m\n   \
                  strata clean --yes                \x1b[90m# Delete this environment's store files\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "STRATA_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile the analysis stores and run whole-program analysis
    Analyse(AnalyseArgs),

    /// Bring the analysis stores up to date without analysing
    Check,

    /// Show this environment's store files and their contents
    Stores,

    /// Delete this environment's store files
    Clean(CleanArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
