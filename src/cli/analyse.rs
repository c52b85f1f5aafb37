use clap::Parser;

/// Arguments for the analyse command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Full run (compile, reconcile stores, analyse):\n    strata analyse\n\n\
                   Extra warning categories on top of strata.yaml:\n    \
                   strata analyse -W unknown-calls -W underspecs\n\n\
                   Skip the configured compile step:\n    strata analyse --no-compile\n\n\
                   Analyse against the stores as they are:\n    strata analyse --no-check")]
pub struct AnalyseArgs {
    /// Skip the configured compile step
    #[arg(long)]
    pub no_compile: bool,

    /// Skip store reconciliation; fail if a store is missing
    #[arg(long)]
    pub no_check: bool,

    /// Warning categories to enable, in addition to those in strata.yaml
    #[arg(short = 'W', long = "warning", value_name = "CATEGORY")]
    pub warnings: Vec<String>,
}
