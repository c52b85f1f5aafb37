//! Collision check and whole-program analysis
//!
//! Runs after every store layer is reconciled: the project's own artifacts
//! are resolved, checked for module-name collisions against everything the
//! background stores now record, and only then handed to the engine's
//! analysis verb together with the store set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::artifact::{ArtifactIndex, Located};
use crate::engine::{Diagnostic, Engine};
use crate::error::{Result, StrataError, config as config_error};
use crate::layer::ReconciledStore;
use crate::manifest::Component;

/// Warning categories the analysis verb understands
pub const WARNING_CATEGORIES: &[&str] = &[
    "error-handling",
    "extra-returns",
    "improper-lists",
    "missing-returns",
    "overspecs",
    "underspecs",
    "unknown-calls",
    "unmatched-returns",
];

/// Validate caller-selected warning categories against the recognized set
pub fn validate_warnings(warnings: &[String]) -> Result<()> {
    for warning in warnings {
        if !WARNING_CATEGORIES.contains(&warning.as_str()) {
            return Err(config_error::invalid(format!(
                "unknown warning category '{warning}' (recognized: {})",
                WARNING_CATEGORIES.join(", ")
            )));
        }
    }
    Ok(())
}

/// Locate the project's own modules' artifacts.
///
/// Only the root components themselves count as "under analysis"; their
/// dependencies are background knowledge. Modules without artifacts are
/// reported by the caller, not fatal.
pub fn project_artifacts(index: &ArtifactIndex, roots: &[Component]) -> Located {
    let modules: BTreeSet<String> = roots
        .iter()
        .flat_map(|component| component.modules.iter().cloned())
        .collect();
    index.locate(&modules, &BTreeSet::new())
}

fn module_name(artifact: &Path) -> Option<&str> {
    artifact.file_stem().and_then(|stem| stem.to_str())
}

/// Module names shared between the project's artifacts and any store.
///
/// The check is by module name, not by path: a component cannot be
/// simultaneously under analysis and background knowledge, whichever store
/// layer holds the background copy.
pub fn collisions(
    project_artifacts: &BTreeSet<PathBuf>,
    stores: &[ReconciledStore],
) -> Vec<String> {
    let stored_modules: BTreeSet<&str> = stores
        .iter()
        .flat_map(|store| store.artifacts.iter())
        .filter_map(|artifact| module_name(artifact))
        .collect();

    project_artifacts
        .iter()
        .filter_map(|artifact| module_name(artifact))
        .filter(|module| stored_modules.contains(module))
        .map(ToString::to_string)
        .collect()
}

/// Run the whole-program analysis over the project's artifacts.
///
/// A module-name collision is fatal and the analysis verb is never invoked.
/// An empty project artifact set short-circuits to an empty diagnostics
/// list. Diagnostics come back in engine order.
pub fn run(
    engine: &dyn Engine,
    stores: &[ReconciledStore],
    project_artifacts: &BTreeSet<PathBuf>,
    warnings: &[String],
) -> Result<Vec<Diagnostic>> {
    let collided = collisions(project_artifacts, stores);
    if !collided.is_empty() {
        return Err(StrataError::ModuleCollision {
            modules: collided.join(", "),
        });
    }

    if project_artifacts.is_empty() {
        return Ok(Vec::new());
    }

    let store_paths: Vec<PathBuf> = stores.iter().map(|store| store.path.clone()).collect();
    engine.analyse(&store_paths, project_artifacts, warnings)
}
