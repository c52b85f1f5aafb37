//! Subprocess-backed analysis engine
//!
//! Invokes the configured analyzer binary once per verb. The store file is
//! the engine's own on-disk database; this module never touches its contents
//! directly.
//!
//! ## Invocation protocol
//!
//! ```text
//! styper --build-store <store> <artifact>...
//! styper --add <store> <artifact>...
//! styper --remove <store> <artifact>...
//! styper --verify <store> <artifact>...
//! styper --list <store>                 # one absolute path per line
//! styper --analyse --store <store>... [-W <warning>]... <artifact>...
//! ```
//!
//! The analyse verb exits 0 with no findings, or with [`DIAGNOSTIC_STATUS`]
//! when findings were emitted; any other non-zero status is an engine
//! failure carrying captured stderr.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Result, engine as engine_error};
use crate::path_utils;

use super::{Diagnostic, Engine, parse_diagnostics};

/// Exit status the engine uses to signal "analysis ran, findings emitted"
pub const DIAGNOSTIC_STATUS: i32 = 2;

/// Analysis engine invoked as a subprocess
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: PathBuf,
}

impl ProcessEngine {
    /// Create an engine wrapper around the given analyzer binary
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The analyzer binary this engine invokes
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn invoke(&self, args: Vec<OsString>) -> Result<Output> {
        let output = Command::new(&self.program).args(args).output().map_err(|e| {
            engine_error::spawn_failed(self.program.display().to_string(), e.to_string())
        })?;
        Ok(output)
    }

    fn invoke_ok(&self, verb: &str, args: Vec<OsString>) -> Result<Output> {
        let output = self.invoke(args)?;
        if !output.status.success() {
            return Err(engine_error::failed(verb, stderr_reason(&output)));
        }
        Ok(output)
    }

    fn store_op(
        &self,
        flag: &str,
        verb: &str,
        store: &Path,
        artifacts: &BTreeSet<PathBuf>,
    ) -> Result<()> {
        let mut args: Vec<OsString> = vec![flag.into(), store.into()];
        args.extend(artifacts.iter().map(OsString::from));
        self.invoke_ok(verb, args)?;
        Ok(())
    }
}

fn stderr_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        format!("exited with {}", output.status)
    } else {
        trimmed.to_string()
    }
}

impl Engine for ProcessEngine {
    fn build(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()> {
        self.store_op("--build-store", "build", store, artifacts)
    }

    fn add(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()> {
        self.store_op("--add", "add", store, artifacts)
    }

    fn remove(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()> {
        self.store_op("--remove", "remove", store, artifacts)
    }

    fn verify(&self, store: &Path, artifacts: &BTreeSet<PathBuf>) -> Result<()> {
        self.store_op("--verify", "verify", store, artifacts)
    }

    fn list(&self, store: &Path) -> Result<Option<BTreeSet<PathBuf>>> {
        // Absence is expected, not an error: it triggers the bootstrap path
        if !store.exists() {
            return Ok(None);
        }

        let args: Vec<OsString> = vec!["--list".into(), store.into()];
        let output = self.invoke_ok("list", args)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let artifacts = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| path_utils::normalize(Path::new(line)))
            .collect();
        Ok(Some(artifacts))
    }

    fn analyse(
        &self,
        stores: &[PathBuf],
        artifacts: &BTreeSet<PathBuf>,
        warnings: &[String],
    ) -> Result<Vec<Diagnostic>> {
        let mut args: Vec<OsString> = vec!["--analyse".into()];
        for store in stores {
            args.push("--store".into());
            args.push(store.into());
        }
        for warning in warnings {
            args.push("-W".into());
            args.push(warning.into());
        }
        args.extend(artifacts.iter().map(OsString::from));

        let output = self.invoke(args)?;
        let findings_emitted = output.status.code() == Some(DIAGNOSTIC_STATUS);
        if !output.status.success() && !findings_emitted {
            return Err(engine_error::failed("analyse", stderr_reason(&output)));
        }

        Ok(parse_diagnostics(&String::from_utf8_lossy(&output.stdout)))
    }
}
