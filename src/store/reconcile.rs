//! Store reconciliation
//!
//! Brings one store's recorded artifact set into agreement with a freshly
//! computed desired set via the minimal add/remove/verify operations.
//! Stores are mutated only through engine verbs; the single exception is the
//! byte-level bootstrap copy when a store is first created from the previous
//! layer's store.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::engine::Engine;
use crate::error::Result;

use super::bootstrap_copy;

/// How a previously absent store was created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    /// Store already existed; no bootstrap happened
    Existing,
    /// Fresh store built by the engine
    Built,
    /// Initial state copied from the previous layer's store
    Copied,
}

/// The minimal operation sets for one reconciliation.
///
/// `remove`, `verify` and `add` are pairwise disjoint;
/// `verify ∪ add` equals the desired set and `verify ∪ remove` the old set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub remove: BTreeSet<PathBuf>,
    pub verify: BTreeSet<PathBuf>,
    pub add: BTreeSet<PathBuf>,
}

impl ReconcilePlan {
    /// Partition `old` against `desired` into the three operation sets
    pub fn partition(old: &BTreeSet<PathBuf>, desired: &BTreeSet<PathBuf>) -> Self {
        Self {
            remove: old.difference(desired).cloned().collect(),
            verify: desired.intersection(old).cloned().collect(),
            add: desired.difference(old).cloned().collect(),
        }
    }

    /// True when the store already matches the desired set
    pub fn is_noop(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }
}

/// The result of reconciling one store
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// The store's recorded artifact set after reconciliation
    pub recorded: BTreeSet<PathBuf>,

    /// The operation sets that were issued
    pub plan: ReconcilePlan,

    /// How the store came into existence this run
    pub created: Created,
}

/// Reconcile one store against `desired`.
///
/// An absent store is created first: copied byte-for-byte from
/// `bootstrap` when a previous layer's store exists, otherwise built fresh
/// by the engine from the minimal base set. The diff is then issued as
/// remove → verify → add, in that order, so the store's module set never
/// transiently exceeds what is needed and verify only runs against
/// artifacts confirmed still relevant. Each set is skipped when empty.
pub fn reconcile(
    engine: &dyn Engine,
    store: &Path,
    desired: &BTreeSet<PathBuf>,
    bootstrap: Option<&Path>,
) -> Result<ReconcileOutcome> {
    let mut created = Created::Existing;

    let old = match engine.list(store)? {
        Some(recorded) => recorded,
        None => {
            match bootstrap {
                Some(previous) if previous.exists() => {
                    bootstrap_copy(previous, store)?;
                    created = Created::Copied;
                }
                _ => {
                    // The engine writes the store file itself; its directory
                    // must exist first
                    if let Some(dir) = store.parent() {
                        std::fs::create_dir_all(dir)?;
                    }
                    engine.build(store, &BTreeSet::new())?;
                    created = Created::Built;
                }
            }
            engine.list(store)?.unwrap_or_default()
        }
    };

    let plan = ReconcilePlan::partition(&old, desired);

    if !plan.remove.is_empty() {
        engine.remove(store, &plan.remove)?;
    }
    if !plan.verify.is_empty() {
        engine.verify(store, &plan.verify)?;
    }
    if !plan.add.is_empty() {
        engine.add(store, &plan.add)?;
    }

    Ok(ReconcileOutcome {
        recorded: desired.clone(),
        plan,
        created,
    })
}
