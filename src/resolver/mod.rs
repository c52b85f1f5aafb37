//! Dependency closure resolution
//!
//! Expands a set of root component names into the transitive closure of
//! everything they depend on, reading each manifest at most once per
//! invocation. The cache is carried across store layers so a later layer
//! never re-reads what an earlier layer already resolved.

use std::collections::{BTreeSet, HashMap};

use crate::error::Result;
use crate::manifest::{Component, ManifestReader};

/// Cache of resolved component descriptors, scoped to one invocation.
///
/// Once a component is present it is never re-read or overwritten, which
/// bounds the closure computation to one manifest read per distinct component.
pub type ResolutionCache = HashMap<String, Component>;

/// Resolve the transitive closure of `roots` into `cache`.
///
/// Components already cached are reused; only still-unknown names are read,
/// level by level, until no new names appear. Returns the names of the
/// components added to the cache by this call, so callers can tell which
/// modules a resolution step introduced.
///
/// A missing or unparseable manifest anywhere in the closure is fatal.
pub fn resolve(
    roots: &BTreeSet<String>,
    cache: &mut ResolutionCache,
    reader: &ManifestReader,
) -> Result<BTreeSet<String>> {
    let mut added = BTreeSet::new();
    let mut pending: BTreeSet<String> = roots
        .iter()
        .filter(|name| !cache.contains_key(*name))
        .cloned()
        .collect();

    while !pending.is_empty() {
        let batch = reader.read_many(&pending)?;

        let mut next = BTreeSet::new();
        for component in batch {
            for dep in &component.dependencies {
                if !cache.contains_key(dep) && !pending.contains(dep) {
                    next.insert(dep.clone());
                }
            }
            added.insert(component.name.clone());
            cache.insert(component.name.clone(), component);
        }

        next.retain(|name| !cache.contains_key(name));
        pending = next;
    }

    Ok(added)
}

/// Union of the modules declared by the given components.
///
/// Names absent from the cache are skipped; the resolver has already
/// guaranteed that everything reachable is present.
pub fn modules_of<'a, I>(cache: &ResolutionCache, components: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    components
        .into_iter()
        .filter_map(|name| cache.get(name))
        .flat_map(|component| component.modules.iter().cloned())
        .collect()
}
