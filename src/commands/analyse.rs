//! Analyse command implementation
//!
//! The full pipeline:
//! 1. Locate the workspace and read its configuration
//! 2. Run the configured compile step (unless --no-compile)
//! 3. Reconcile every store layer (unless --no-check)
//! 4. Resolve the project's own artifacts
//! 5. Check for module-name collisions against the background stores
//! 6. Invoke the engine's analysis verb and print its diagnostics
//!
//! Returns the number of diagnostics printed; the caller maps a non-zero
//! count to a distinct, non-fatal exit status.

use std::path::PathBuf;

use crate::analysis;
use crate::cli::AnalyseArgs;
use crate::error::Result;
use crate::layer;
use crate::progress::ProgressDisplay;

use super::helpers;

/// Run the analyse command; returns the number of diagnostics
pub fn run(workspace: Option<PathBuf>, verbose: bool, args: AnalyseArgs) -> Result<usize> {
    let session = helpers::open(workspace, verbose)?;

    let mut warnings = session.workspace.config.warnings.clone();
    for warning in &args.warnings {
        if !warnings.contains(warning) {
            warnings.push(warning.clone());
        }
    }
    analysis::validate_warnings(&warnings)?;

    if !args.no_compile {
        helpers::run_compile(&session)?;
    }

    let roots = helpers::root_components(&session)?;
    let plan = helpers::layer_plan(&session, &roots)?;

    let stores = if args.no_check {
        helpers::stores_as_recorded(&session, &plan)?
    } else {
        let progress = ProgressDisplay::new(plan.layers.len() as u64);
        let outcome = layer::drive(
            &plan,
            &session.engine,
            &session.reader,
            &session.index,
            &session.ui,
            Some(&progress),
        )
        .inspect_err(|_| progress.abandon())?;
        outcome.stores
    };

    let located = analysis::project_artifacts(&session.index, &roots);
    for module in &located.missing {
        session.ui.unknown_module(module);
    }

    session.ui.status("Analysing project artifacts");
    let diagnostics = analysis::run(&session.engine, &stores, &located.artifacts, &warnings)?;

    for diagnostic in &diagnostics {
        session.ui.diagnostic(diagnostic);
    }
    session.ui.analysis_summary(diagnostics.len());

    Ok(diagnostics.len())
}
