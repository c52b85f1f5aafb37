//! Store layer planning
//!
//! The background knowledge for an analysis run is split across an ordered
//! list of stores: the base runtime layer changes almost never, the language
//! runtime layer rarely, the project-dependencies layer often. Iterating
//! outer-to-inner with a cumulative cache and artifact set means a change in
//! the outer layer never rebuilds the inner ones, and an artifact registered
//! by an earlier layer is never registered again by a later one.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::artifact::ArtifactIndex;
use crate::engine::Engine;
use crate::error::Result;
use crate::manifest::ManifestReader;
use crate::progress::ProgressDisplay;
use crate::resolver::{self, ResolutionCache};
use crate::store;
use crate::ui::Ui;

/// Base runtime components; always background knowledge
pub const CORE_COMPONENTS: &[&str] = &["core", "sys"];

/// Language runtime components layered on top of the base runtime
pub const LANG_COMPONENTS: &[&str] = &["std", "compiler"];

/// One analysis store plus the component set it is responsible for
#[derive(Debug, Clone)]
pub struct StoreLayer {
    /// Layer name; also the first segment of the store file name
    pub name: String,

    /// Deterministic store path for this environment
    pub store: PathBuf,

    /// Components whose artifacts belong in this store
    pub components: BTreeSet<String>,
}

/// The ordered list of store layers for one invocation
#[derive(Debug, Clone)]
pub struct LayerPlan {
    pub layers: Vec<StoreLayer>,
}

impl LayerPlan {
    /// The standard three-layer plan: core runtime, language runtime,
    /// project dependencies.
    ///
    /// Ownership sets are disjoint: each layer owns exactly what no nearer
    /// layer already owns, and the project's own components never appear in
    /// any layer. Only the innermost store is qualified by the build
    /// profile.
    pub fn standard(
        roots: &[String],
        root_deps: &BTreeSet<String>,
        runtime_version: &str,
        profile: &str,
    ) -> Result<Self> {
        let core: BTreeSet<String> = CORE_COMPONENTS.iter().map(ToString::to_string).collect();
        let lang: BTreeSet<String> = LANG_COMPONENTS
            .iter()
            .map(ToString::to_string)
            .filter(|name| !core.contains(name))
            .collect();
        let deps: BTreeSet<String> = root_deps
            .iter()
            .filter(|name| {
                !core.contains(*name) && !lang.contains(*name) && !roots.contains(*name)
            })
            .cloned()
            .collect();

        let layers = vec![
            StoreLayer {
                name: "core".to_string(),
                store: store::store_path("core", runtime_version, None)?,
                components: core,
            },
            StoreLayer {
                name: "lang".to_string(),
                store: store::store_path("lang", runtime_version, None)?,
                components: lang,
            },
            StoreLayer {
                name: "deps".to_string(),
                store: store::store_path("deps", runtime_version, Some(profile))?,
                components: deps,
            },
        ];

        Ok(Self { layers })
    }
}

/// One reconciled store, ready to serve as background knowledge
#[derive(Debug, Clone)]
pub struct ReconciledStore {
    /// Layer name
    pub layer: String,

    /// Store path
    pub path: PathBuf,

    /// Artifacts the store records after reconciliation
    pub artifacts: BTreeSet<PathBuf>,
}

/// Everything the layer pass produced, carried into the analysis step
#[derive(Debug)]
pub struct DriveOutcome {
    /// Reconciled stores in layer order
    pub stores: Vec<ReconciledStore>,

    /// The resolution cache accumulated across all layers
    pub cache: ResolutionCache,

    /// Every artifact registered across all layers
    pub artifacts: BTreeSet<PathBuf>,
}

/// Reconcile every layer of `plan`, outer-to-inner.
///
/// The accumulator threaded through the loop is the pair (resolution cache,
/// cumulative artifact set): each layer resolves its components against the
/// cache carried from earlier layers, takes only the modules of components
/// that resolution newly introduced, locates their artifacts excluding
/// everything already materialized, and reconciles its store against that
/// per-layer set. The previous layer's store is offered to the reconciler as
/// bootstrap state for stores that do not exist yet.
pub fn drive(
    plan: &LayerPlan,
    engine: &dyn Engine,
    reader: &ManifestReader,
    index: &ArtifactIndex,
    ui: &Ui,
    progress: Option<&ProgressDisplay>,
) -> Result<DriveOutcome> {
    let mut cache = ResolutionCache::new();
    let mut cumulative: BTreeSet<PathBuf> = BTreeSet::new();
    let mut previous: Option<PathBuf> = None;
    let mut stores = Vec::with_capacity(plan.layers.len());

    for layer in &plan.layers {
        if let Some(progress) = progress {
            progress.update_layer(&layer.name);
        }
        ui.status(&format!("Checking '{}' store", layer.name));

        let introduced = resolver::resolve(&layer.components, &mut cache, reader)?;
        let new_modules = resolver::modules_of(&cache, &introduced);
        ui.detail(&format!(
            "{} components, {} new modules",
            introduced.len(),
            new_modules.len()
        ));

        let located = index.locate(&new_modules, &cumulative);
        for module in &located.missing {
            ui.unknown_module(module);
        }

        let outcome = store::reconcile(engine, &layer.store, &located.artifacts, previous.as_deref())?;
        ui.reconcile_summary(&layer.name, &outcome);

        cumulative.extend(located.artifacts);
        previous = Some(layer.store.clone());
        stores.push(ReconciledStore {
            layer: layer.name.clone(),
            path: layer.store.clone(),
            artifacts: outcome.recorded,
        });

        if let Some(progress) = progress {
            progress.inc_layer();
        }
    }

    if let Some(progress) = progress {
        progress.finish();
    }

    Ok(DriveOutcome {
        stores,
        cache,
        artifacts: cumulative,
    })
}
