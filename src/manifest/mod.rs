//! Component manifests (manifest.yaml)
//!
//! A component is a directory on the search path holding a `manifest.yaml`
//! that declares the component's modules and dependencies, next to the
//! compiled artifact for each module. The reader flattens the three
//! dependency kinds (regular, included, runtime) into one normalized set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, manifest as manifest_error};

/// Manifest file name inside a component directory
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// On-disk manifest shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ManifestData {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    modules: Vec<String>,

    #[serde(default)]
    dependencies: Vec<String>,

    /// Components bundled into this one; analysed as if they were dependencies
    #[serde(default)]
    included: Vec<String>,

    /// Runtime dependencies, possibly version-qualified (`sys-2.1`)
    #[serde(default)]
    runtime: Vec<String>,
}

/// A component descriptor read from its manifest
///
/// Immutable once read; owned by the resolution cache for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Component name
    pub name: String,

    /// Modules this component compiles
    pub modules: BTreeSet<String>,

    /// Union of regular, included and runtime dependencies, version suffixes stripped
    pub dependencies: BTreeSet<String>,
}

/// Strip a trailing `-<version>` qualifier from a runtime dependency name.
///
/// `sys-2.1` becomes `sys`; names without a digit-led suffix are unchanged,
/// so `my-lib` stays `my-lib`.
pub fn strip_version_suffix(name: &str) -> &str {
    match name.rfind('-') {
        Some(idx)
            if name[idx + 1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit()) =>
        {
            &name[..idx]
        }
        _ => name,
    }
}

/// Reads component manifests off a fixed search path.
///
/// The search order is significant: the first directory containing
/// `<name>/manifest.yaml` wins, mirroring the artifact lookup order.
#[derive(Debug, Clone)]
pub struct ManifestReader {
    search_dirs: Vec<PathBuf>,
}

impl ManifestReader {
    /// Create a reader over the given component directories
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Directories this reader searches, in order
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Locate the manifest file for a component, if present anywhere on the path
    pub fn manifest_path(&self, name: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(name).join(MANIFEST_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Read one component descriptor.
    ///
    /// A missing or unparseable manifest is fatal: the dependency closure
    /// cannot be constructed without it.
    pub fn read(&self, name: &str) -> Result<Component> {
        let path = self
            .manifest_path(name)
            .ok_or_else(|| manifest_error::not_found(name))?;
        read_manifest_file(name, &path)
    }

    /// Read a batch of component descriptors in one pass
    pub fn read_many<'a, I>(&self, names: I) -> Result<Vec<Component>>
    where
        I: IntoIterator<Item = &'a String>,
    {
        names.into_iter().map(|name| self.read(name)).collect()
    }
}

fn read_manifest_file(name: &str, path: &Path) -> Result<Component> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| manifest_error::parse_failed(path.display().to_string(), e.to_string()))?;
    let data: ManifestData = serde_yaml::from_str(&content)
        .map_err(|e| manifest_error::parse_failed(path.display().to_string(), e.to_string()))?;

    let mut dependencies: BTreeSet<String> = data.dependencies.into_iter().collect();
    dependencies.extend(data.included);
    dependencies.extend(
        data.runtime
            .iter()
            .map(|dep| strip_version_suffix(dep).to_string()),
    );

    Ok(Component {
        name: data.name.unwrap_or_else(|| name.to_string()),
        modules: data.modules.into_iter().collect(),
        dependencies,
    })
}
