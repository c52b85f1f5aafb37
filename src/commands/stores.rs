//! Stores command implementation
//!
//! Shows each layer's store path, whether it exists, and how many artifacts
//! it records.

use std::path::PathBuf;

use crate::engine::Engine;
use crate::error::Result;

use super::helpers;

/// Run the stores command
pub fn run(workspace: Option<PathBuf>, verbose: bool) -> Result<()> {
    let session = helpers::open(workspace, verbose)?;
    let roots = helpers::root_components(&session)?;
    let plan = helpers::layer_plan(&session, &roots)?;

    println!("Analysis stores:");
    for layer in &plan.layers {
        match session.engine.list(&layer.store)? {
            Some(artifacts) => {
                println!(
                    "  {} ({} artifacts)",
                    layer.store.display(),
                    artifacts.len()
                );
            }
            None => {
                println!("  {} (absent)", layer.store.display());
            }
        }
    }

    Ok(())
}
