//! Console output for status lines, module reports and diagnostics

use console::style;

use crate::engine::Diagnostic;
use crate::store::reconcile::{Created, ReconcileOutcome};

/// Styled console writer.
///
/// Status and reports go to stderr; diagnostics go to stdout so they can be
/// piped. The quiet mode silences everything except diagnostics, for tests.
#[derive(Debug, Clone, Copy)]
pub struct Ui {
    verbose: bool,
    quiet: bool,
}

impl Ui {
    /// Create a writer; `verbose` enables per-layer detail lines
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
        }
    }

    /// A writer that only emits diagnostics (used by unit tests)
    pub fn silent() -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    /// A top-level status line
    pub fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", style(message).cyan().bold());
        }
    }

    /// A secondary line, only shown with --verbose
    pub fn detail(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("  {message}");
        }
    }

    /// Report a module with no artifact on the search path (non-fatal)
    pub fn unknown_module(&self, module: &str) {
        if !self.quiet {
            eprintln!(
                "{} no artifact found for module '{}'",
                style("warning:").yellow().bold(),
                module
            );
        }
    }

    /// Summarize what one store reconciliation did
    pub fn reconcile_summary(&self, layer: &str, outcome: &ReconcileOutcome) {
        if self.quiet {
            return;
        }
        let creation = match outcome.created {
            Created::Existing => None,
            Created::Built => Some("built fresh"),
            Created::Copied => Some("copied from previous layer"),
        };
        if let Some(how) = creation {
            eprintln!("  store {}", how);
        }
        eprintln!(
            "  {}: {} removed, {} verified, {} added",
            style(layer).bold(),
            outcome.plan.remove.len(),
            outcome.plan.verify.len(),
            outcome.plan.add.len()
        );
    }

    /// Print one engine diagnostic
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        println!("{diagnostic}");
    }

    /// Final summary after the analysis verb ran
    pub fn analysis_summary(&self, count: usize) {
        if self.quiet {
            return;
        }
        if count == 0 {
            eprintln!("{}", style("done (no findings)").green().bold());
        } else {
            let noun = if count == 1 { "finding" } else { "findings" };
            eprintln!("{}", style(format!("{count} {noun}")).red().bold());
        }
    }
}
