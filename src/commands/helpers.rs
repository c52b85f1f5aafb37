//! Shared setup for command implementations

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::Command;

use crate::artifact::ArtifactIndex;
use crate::engine::{Engine, ProcessEngine};
use crate::error::{Result, StrataError, store as store_error};
use crate::layer::{LayerPlan, ReconciledStore};
use crate::manifest::{Component, ManifestReader};
use crate::ui::Ui;
use crate::workspace::Workspace;

/// Everything a command needs for one invocation
pub struct Session {
    pub workspace: Workspace,
    pub reader: ManifestReader,
    pub index: ArtifactIndex,
    pub engine: ProcessEngine,
    pub ui: Ui,
}

/// Locate the workspace and wire up the reader, index and engine
pub fn open(workspace_arg: Option<PathBuf>, verbose: bool) -> Result<Session> {
    let workspace = Workspace::locate(workspace_arg)?;
    let search_dirs = workspace.search_dirs();
    let reader = ManifestReader::new(search_dirs.clone());
    let index = ArtifactIndex::scan(&search_dirs);
    let engine = ProcessEngine::new(workspace.engine_program());

    Ok(Session {
        workspace,
        reader,
        index,
        engine,
        ui: Ui::new(verbose),
    })
}

/// Read the root components' manifests once per invocation
pub fn root_components(session: &Session) -> Result<Vec<Component>> {
    let roots = session.workspace.roots();
    session.reader.read_many(&roots)
}

/// Build the standard layer plan from the roots' declared dependencies
pub fn layer_plan(session: &Session, roots: &[Component]) -> Result<LayerPlan> {
    let root_names = session.workspace.roots();
    let root_deps: BTreeSet<String> = roots
        .iter()
        .flat_map(|component| component.dependencies.iter().cloned())
        .collect();

    LayerPlan::standard(
        &root_names,
        &root_deps,
        &session.workspace.config.runtime_version,
        &session.workspace.config.profile,
    )
}

/// Read the stores as they are, without reconciling.
///
/// Used by `analyse --no-check`: a store that does not exist is fatal here,
/// since nothing is going to create it.
pub fn stores_as_recorded(session: &Session, plan: &LayerPlan) -> Result<Vec<ReconciledStore>> {
    plan.layers
        .iter()
        .map(|layer| {
            let recorded = session
                .engine
                .list(&layer.store)?
                .ok_or_else(|| store_error::missing(layer.store.display().to_string()))?;
            Ok(ReconciledStore {
                layer: layer.name.clone(),
                path: layer.store.clone(),
                artifacts: recorded,
            })
        })
        .collect()
}

/// Run the configured compile command, if any
pub fn run_compile(session: &Session) -> Result<()> {
    let Some(command) = session.workspace.config.compile.clone() else {
        return Ok(());
    };

    session.ui.status(&format!("Compiling ({command})"));

    let mut shell = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C");
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c");
        c
    };

    let status = shell
        .arg(&command)
        .current_dir(&session.workspace.root)
        .status()
        .map_err(|e| StrataError::CompileFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(StrataError::CompileFailed {
            command,
            reason: format!("exited with {status}"),
        });
    }

    Ok(())
}
