use clap::Parser;

/// Arguments for the clean command
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
