//! Clean command implementation
//!
//! Deletes this environment's store files so the next check rebuilds them
//! from scratch. Destructive, so it asks first unless --yes is passed.

use std::path::PathBuf;

use inquire::Confirm;

use crate::cli::CleanArgs;
use crate::error::Result;

use super::helpers;

/// Run the clean command
pub fn run(workspace: Option<PathBuf>, verbose: bool, args: CleanArgs) -> Result<()> {
    let session = helpers::open(workspace, verbose)?;
    let roots = helpers::root_components(&session)?;
    let plan = helpers::layer_plan(&session, &roots)?;

    let existing: Vec<_> = plan
        .layers
        .iter()
        .filter(|layer| layer.store.exists())
        .collect();

    if existing.is_empty() {
        println!("No store files to remove.");
        return Ok(());
    }

    if !args.yes {
        for layer in &existing {
            println!("  {}", layer.store.display());
        }
        let confirmed = Confirm::new(&format!(
            "Remove {} store file(s)? They will be rebuilt on the next check.",
            existing.len()
        ))
        .with_default(false)
        .prompt()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    for layer in &existing {
        std::fs::remove_file(&layer.store)?;
        println!("Removed {}", layer.store.display());
    }

    Ok(())
}
