//! Compiled artifact location
//!
//! Maps module names to the absolute paths of their compiled artifacts via a
//! search-path lookup. The index is built once per invocation by scanning
//! every component directory on the search path; lookups after that never
//! touch the filesystem.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::path_utils;

/// File extension of compiled module artifacts
pub const ARTIFACT_EXT: &str = "bc";

/// The outcome of locating a set of modules.
///
/// Unresolved modules are reported, never fatal: they are excluded from the
/// artifact set and listed in `missing` for the caller to surface.
#[derive(Debug, Default)]
pub struct Located {
    /// Normalized absolute artifact paths, excluding anything already known
    pub artifacts: BTreeSet<PathBuf>,

    /// Modules with no artifact anywhere on the search path
    pub missing: Vec<String>,
}

/// Search-path index from module name to compiled artifact path.
#[derive(Debug)]
pub struct ArtifactIndex {
    by_module: HashMap<String, PathBuf>,
}

impl ArtifactIndex {
    /// Scan the search directories and build the index.
    ///
    /// Each search directory holds one subdirectory per component; artifacts
    /// sit inside those. Earlier search directories win on duplicate module
    /// names, matching the manifest lookup order. Directories that do not
    /// exist are skipped.
    pub fn scan(search_dirs: &[PathBuf]) -> Self {
        let mut by_module = HashMap::new();

        for dir in search_dirs {
            if !dir.is_dir() {
                continue;
            }
            for entry in WalkDir::new(dir)
                .max_depth(2)
                .sort_by_file_name()
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXT) {
                    continue;
                }
                let Some(module) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                by_module
                    .entry(module.to_string())
                    .or_insert_with(|| path_utils::normalize(path));
            }
        }

        Self { by_module }
    }

    /// Look up a single module's artifact
    pub fn find(&self, module: &str) -> Option<&Path> {
        self.by_module.get(module).map(PathBuf::as_path)
    }

    /// Locate artifacts for `modules`, excluding anything already in `prior`.
    ///
    /// Pure over its inputs: repeated calls across store layers are cumulative
    /// rather than redundant, and an earlier layer's artifact never reappears
    /// in a later layer's result.
    pub fn locate(&self, modules: &BTreeSet<String>, prior: &BTreeSet<PathBuf>) -> Located {
        let mut located = Located::default();

        for module in modules {
            match self.find(module) {
                Some(path) => {
                    if !prior.contains(path) {
                        located.artifacts.insert(path.to_path_buf());
                    }
                }
                None => located.missing.push(module.clone()),
            }
        }

        located
    }

    /// Number of indexed modules
    pub fn len(&self) -> usize {
        self.by_module.len()
    }

    /// Whether the index found no artifacts at all
    pub fn is_empty(&self) -> bool {
        self.by_module.is_empty()
    }
}
