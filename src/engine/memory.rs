//! In-memory fake engine for unit tests
//!
//! Records every verb invocation in order so tests can assert on exactly
//! what the reconciler issued, and keeps store contents in a plain map.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{Result, engine as engine_error};

use super::{Diagnostic, Engine};

/// One recorded engine invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Build(PathBuf, BTreeSet<PathBuf>),
    Add(PathBuf, BTreeSet<PathBuf>),
    Remove(PathBuf, BTreeSet<PathBuf>),
    Verify(PathBuf, BTreeSet<PathBuf>),
    Analyse(Vec<PathBuf>, BTreeSet<PathBuf>, Vec<String>),
}

impl Op {
    /// Short verb name, handy for asserting on operation order
    pub fn verb(&self) -> &'static str {
        match self {
            Op::Build(..) => "build",
            Op::Add(..) => "add",
            Op::Remove(..) => "remove",
            Op::Verify(..) => "verify",
            Op::Analyse(..) => "analyse",
        }
    }
}

/// Fake engine with in-memory stores and an operation log
#[derive(Debug, Default)]
pub struct MemoryEngine {
    stores: RefCell<BTreeMap<PathBuf, BTreeSet<PathBuf>>>,
    log: RefCell<Vec<Op>>,
    diagnostics: Vec<Diagnostic>,
    fail_verb: Option<&'static str>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose analyse verb returns the given findings
    pub fn with_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            ..Self::default()
        }
    }

    /// Engine whose named verb fails, for error-path tests
    pub fn failing_on(verb: &'static str) -> Self {
        Self {
            fail_verb: Some(verb),
            ..Self::default()
        }
    }

    /// Pre-seed a store's recorded contents
    pub fn seed_store(&self, store: &Path, artifacts: BTreeSet<PathBuf>) {
        self.stores.borrow_mut().insert(store.to_path_buf(), artifacts);
    }

    /// All invocations so far, in issue order
    pub fn ops(&self) -> Vec<Op> {
        self.log.borrow().clone()
    }

    /// Verb names of all invocations, in issue order
    pub fn verbs(&self) -> Vec<&'static str> {
        self.log.borrow().iter().map(Op::verb).collect()
    }

    fn check_failure(&self, verb: &str) -> Result<()> {
        if self.fail_verb == Some(verb) {
            return Err(engine_error::failed(verb, "injected failure"));
        }
        Ok(())
    }
}

impl Engine for MemoryEngine {
    fn build(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()> {
        self.check_failure("build")?;
        self.log
            .borrow_mut()
            .push(Op::Build(store.to_path_buf(), artifacts.clone()));
        self.stores
            .borrow_mut()
            .insert(store.to_path_buf(), artifacts.clone());
        Ok(())
    }

    fn add(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()> {
        self.check_failure("add")?;
        self.log
            .borrow_mut()
            .push(Op::Add(store.to_path_buf(), artifacts.clone()));
        self.stores
            .borrow_mut()
            .entry(store.to_path_buf())
            .or_default()
            .extend(artifacts.iter().cloned());
        Ok(())
    }

    fn remove(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()> {
        self.check_failure("remove")?;
        self.log
            .borrow_mut()
            .push(Op::Remove(store.to_path_buf(), artifacts.clone()));
        if let Some(recorded) = self.stores.borrow_mut().get_mut(store) {
            recorded.retain(|artifact| !artifacts.contains(artifact));
        }
        Ok(())
    }

    fn verify(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()> {
        self.check_failure("verify")?;
        self.log
            .borrow_mut()
            .push(Op::Verify(store.to_path_buf(), artifacts.clone()));
        Ok(())
    }

    fn list(&self, store: &Path) -> Result<Option<BTreeSet<PathBuf>>> {
        self.check_failure("list")?;
        if let Some(recorded) = self.stores.borrow().get(store) {
            return Ok(Some(recorded.clone()));
        }
        // A store file materialized by the bootstrap copy: read it the way
        // the real engine reads its own database (one path per line)
        if store.exists() {
            let content = std::fs::read_to_string(store)?;
            let artifacts: BTreeSet<PathBuf> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .collect();
            self.stores
                .borrow_mut()
                .insert(store.to_path_buf(), artifacts.clone());
            return Ok(Some(artifacts));
        }
        Ok(None)
    }

    fn analyse(
        &self,
        stores: &[PathBuf],
        artifacts: &BTreeSet<PathBuf>,
        warnings: &[String],
    ) -> Result<Vec<Diagnostic>> {
        self.check_failure("analyse")?;
        self.log.borrow_mut().push(Op::Analyse(
            stores.to_vec(),
            artifacts.clone(),
            warnings.to_vec(),
        ));
        Ok(self.diagnostics.clone())
    }
}
