//! Check command implementation
//!
//! Brings every store layer up to date without running the analysis verb.

use std::path::PathBuf;

use crate::error::Result;
use crate::layer;
use crate::progress::ProgressDisplay;

use super::helpers;

/// Run the check command
pub fn run(workspace: Option<PathBuf>, verbose: bool) -> Result<()> {
    let session = helpers::open(workspace, verbose)?;
    let roots = helpers::root_components(&session)?;
    let plan = helpers::layer_plan(&session, &roots)?;

    let progress = ProgressDisplay::new(plan.layers.len() as u64);
    layer::drive(
        &plan,
        &session.engine,
        &session.reader,
        &session.index,
        &session.ui,
        Some(&progress),
    )
    .inspect_err(|_| progress.abandon())?;

    session.ui.status("Stores up to date");
    Ok(())
}
