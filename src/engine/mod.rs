//! External analysis engine boundary
//!
//! The engine is a small fixed verb set behind a trait so the reconciliation
//! logic stays engine-agnostic: the production implementation shells out to
//! the analyzer binary ([`process::ProcessEngine`]), tests use an in-memory
//! fake.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

pub mod process;

#[cfg(test)]
pub mod memory;

pub use process::ProcessEngine;

/// One finding produced by the analysis verb.
///
/// The engine emits one JSON object per line; lines that fail to decode are
/// carried verbatim so nothing the engine said is dropped. Engine order is
/// preserved, never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Diagnostic {
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default)]
    pub line: Option<u64>,

    #[serde(default)]
    pub kind: Option<String>,

    pub message: String,
}

impl Diagnostic {
    /// An opaque diagnostic carrying a raw engine output line
    pub fn opaque(message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            kind: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
            write!(f, ": ")?;
        }
        if let Some(kind) = &self.kind {
            write!(f, "[{kind}] ")?;
        }
        write!(f, "{}", self.message)
    }
}

/// Decode engine analysis output into diagnostics, one per non-empty line.
pub fn parse_diagnostics(output: &str) -> Vec<Diagnostic> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).unwrap_or_else(|_| Diagnostic::opaque(line)))
        .collect()
}

/// The fixed verb set of the external analysis engine.
///
/// Every call is blocking and sequential; the on-disk store file is a shared
/// stateful resource that must not be mutated concurrently. Each verb may
/// fail with an engine-specific error that is fatal to the invocation.
pub trait Engine {
    /// Create a fresh store holding the given initial artifacts
    fn build(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()>;

    /// Register artifacts in an existing store
    fn add(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()>;

    /// Remove artifacts from a store
    fn remove(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()>;

    /// Revalidate artifacts already registered in a store
    fn verify(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()>;

    /// The artifacts a store currently records, or `None` if the store does not exist
    fn list(&self, store: &Path) -> Result<Option<BTreeSet<PathBuf>>>;

    /// Whole-program analysis of `artifacts` with `stores` as background knowledge
    fn analyse(
        &self,
        stores: &[PathBuf],
        artifacts: &BTreeSet<PathBuf>,
        warnings: &[String],
    ) -> Result<Vec<Diagnostic>>;
}
