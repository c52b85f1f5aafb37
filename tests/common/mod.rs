//! Shared fixtures for CLI integration tests
//!
//! Builds a throwaway workspace with a project component, a library search
//! path, and (on unix) a fake engine script that implements the analyzer's
//! verb protocol over plain text files, logging every invocation.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary strata workspace with its own store directory and fake engine
pub struct TestWorkspace {
    temp: TempDir,
    /// Workspace root (holds strata.yaml)
    pub root: PathBuf,
    /// Library search path directory
    pub lib_dir: PathBuf,
    /// Store directory passed via STRATA_STORE_DIR
    pub store_dir: PathBuf,
    /// Fake engine binary path
    pub engine: PathBuf,
    /// File the fake engine appends one line per invocation to
    pub engine_log: PathBuf,
    /// File with canned analysis output; created on demand
    pub diagnostics_file: PathBuf,
}

impl TestWorkspace {
    /// A workspace with the standard runtime components and one project
    /// component `myapp` declaring modules `myapp_server` and `myapp_sup`.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("project");
        let lib_dir = temp.path().join("lib");
        let store_dir = temp.path().join("stores");
        let engine = temp.path().join("fake-engine");
        let engine_log = temp.path().join("engine.log");
        let diagnostics_file = temp.path().join("diagnostics.jsonl");

        std::fs::create_dir_all(&root).expect("mkdir root");
        std::fs::create_dir_all(&lib_dir).expect("mkdir lib");

        let workspace = Self {
            temp,
            root,
            lib_dir,
            store_dir,
            engine,
            engine_log,
            diagnostics_file,
        };

        workspace.write_config(None);
        workspace.write_runtime_components();
        workspace.add_project_component("myapp", &["myapp_server", "myapp_sup"], &[]);
        #[cfg(unix)]
        workspace.write_fake_engine();

        workspace
    }

    /// Write strata.yaml; `deps` become the project component's dependencies
    pub fn write_config(&self, extra: Option<&str>) {
        let yaml = format!(
            "\
project: myapp
search_path:
  - {}
runtime_version: \"1.4\"
engine_bin: {}
{}",
            self.lib_dir.display(),
            self.engine.display(),
            extra.unwrap_or("")
        );
        std::fs::write(self.root.join("strata.yaml"), yaml).expect("write strata.yaml");
    }

    /// The components every standard layer plan expects to find
    fn write_runtime_components(&self) {
        self.add_lib_component("core", &["core_init"], &[]);
        self.add_lib_component("sys", &["sys_boot"], &[]);
        self.add_lib_component("std", &["std_lists"], &["core"]);
        self.add_lib_component("compiler", &["compiler_parse"], &["std"]);
    }

    /// Add a component (manifest + artifacts) under the library search path
    pub fn add_lib_component(&self, name: &str, modules: &[&str], deps: &[&str]) {
        write_component(&self.lib_dir, name, modules, deps);
    }

    /// Add a component under the project's build output directory
    pub fn add_project_component(&self, name: &str, modules: &[&str], deps: &[&str]) {
        write_component(&self.root.join("_build").join("dev"), name, modules, deps);
    }

    /// Write canned engine findings; the fake engine emits them and exits 2
    pub fn set_diagnostics(&self, jsonl: &str) {
        std::fs::write(&self.diagnostics_file, jsonl).expect("write diagnostics");
    }

    /// Invocation log lines recorded by the fake engine so far
    pub fn engine_log_lines(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.engine_log) {
            Ok(content) => content.lines().map(ToString::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Clear the invocation log between runs
    pub fn clear_engine_log(&self) {
        let _ = std::fs::remove_file(&self.engine_log);
    }

    /// Store files currently present in the store directory
    pub fn store_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(&self.store_dir) {
            Ok(entries) => entries
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("store"))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Content of the store file whose name starts with `layer-`
    pub fn store_content(&self, layer: &str) -> String {
        let path = self
            .store_files()
            .into_iter()
            .find(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&format!("{layer}-")))
            })
            .unwrap_or_else(|| panic!("no store file for layer '{layer}'"));
        std::fs::read_to_string(path).expect("read store")
    }

    /// An assert_cmd command for the real strata binary, wired to this workspace
    pub fn cmd(&self) -> assert_cmd::Command {
        // Temporary fix for deprecated cargo_bin - will be updated when
        // build-dir issues are resolved
        #[allow(deprecated)]
        let mut cmd = assert_cmd::Command::cargo_bin("strata").expect("strata binary");
        cmd.current_dir(&self.root)
            .env("STRATA_STORE_DIR", &self.store_dir)
            .env("FAKE_ENGINE_LOG", &self.engine_log)
            .env("FAKE_ENGINE_DIAGS", &self.diagnostics_file)
            .env_remove("STRATA_WORKSPACE")
            .env_remove("STRATA_ENGINE");
        cmd
    }

    /// Write the fake engine shell script implementing the verb protocol
    #[cfg(unix)]
    fn write_fake_engine(&self) {
        use std::os::unix::fs::PermissionsExt;

        let script = r#"#!/bin/sh
# Fake analyzer: stores are plain text files, one artifact path per line.
log() {
    if [ -n "$FAKE_ENGINE_LOG" ]; then
        echo "$@" >> "$FAKE_ENGINE_LOG"
    fi
}

cmd="$1"
shift
case "$cmd" in
    --build-store)
        store="$1"; shift
        log "build $(basename "$store") $#"
        : > "$store"
        for artifact in "$@"; do
            echo "$artifact" >> "$store"
        done
        ;;
    --add)
        store="$1"; shift
        log "add $(basename "$store") $#"
        for artifact in "$@"; do
            echo "$artifact" >> "$store"
        done
        ;;
    --remove)
        store="$1"; shift
        log "remove $(basename "$store") $#"
        for artifact in "$@"; do
            grep -F -x -v -- "$artifact" "$store" > "$store.tmp" || true
            mv "$store.tmp" "$store"
        done
        ;;
    --verify)
        store="$1"; shift
        log "verify $(basename "$store") $#"
        for artifact in "$@"; do
            if [ ! -f "$artifact" ]; then
                echo "stale artifact: $artifact" >&2
                exit 1
            fi
        done
        ;;
    --list)
        cat "$1"
        ;;
    --analyse)
        artifacts=0
        while [ $# -gt 0 ]; do
            case "$1" in
                --store|-W) shift 2 ;;
                *) artifacts=$((artifacts + 1)); shift ;;
            esac
        done
        log "analyse $artifacts"
        if [ -n "$FAKE_ENGINE_DIAGS" ] && [ -f "$FAKE_ENGINE_DIAGS" ]; then
            cat "$FAKE_ENGINE_DIAGS"
            exit 2
        fi
        ;;
    *)
        echo "unknown verb: $cmd" >&2
        exit 64
        ;;
esac
exit 0
"#;
        std::fs::write(&self.engine, script).expect("write fake engine");
        let mut perms = std::fs::metadata(&self.engine).expect("stat").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&self.engine, perms).expect("chmod");
    }
}

fn write_component(base: &Path, name: &str, modules: &[&str], deps: &[&str]) {
    let component_dir = base.join(name);
    std::fs::create_dir_all(&component_dir).expect("mkdir component");
    let yaml = format!(
        "name: {name}\nmodules: [{}]\ndependencies: [{}]\n",
        modules.join(", "),
        deps.join(", ")
    );
    std::fs::write(component_dir.join("manifest.yaml"), yaml).expect("write manifest");
    for module in modules {
        std::fs::write(component_dir.join(format!("{module}.bc")), b"\0bc\n")
            .expect("write artifact");
    }
}
