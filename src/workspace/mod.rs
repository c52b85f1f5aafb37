//! Workspace management for Strata
//!
//! A workspace is the directory tree rooted at the nearest ancestor holding a
//! `strata.yaml`. The workspace assembles the component search path: the
//! project's own build output directory first, then the configured library
//! directories.
//!
//! ## Workspace Structure
//!
//! ```text
//! project/
//! ├── strata.yaml            # Workspace configuration
//! └── _build/
//!     └── dev/               # One directory per component, per profile
//!         └── myapp/
//!             ├── manifest.yaml
//!             └── myapp_server.bc
//! ```

use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE, ProjectConfig};
use crate::error::{Result, StrataError};

/// Environment variable overriding the configured engine binary
pub const ENGINE_ENV: &str = "STRATA_ENGINE";

/// Represents a Strata workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (where strata.yaml is located)
    pub root: PathBuf,

    /// Workspace configuration (strata.yaml)
    pub config: ProjectConfig,
}

impl Workspace {
    /// Find the workspace root by walking up from `start` until a strata.yaml appears
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        let mut current = Some(start);
        while let Some(dir) = current {
            if dir.join(CONFIG_FILE).is_file() {
                return Some(dir.to_path_buf());
            }
            current = dir.parent();
        }
        None
    }

    /// Open a workspace at a known root
    pub fn open(root: &Path) -> Result<Self> {
        let config = ProjectConfig::load(&root.join(CONFIG_FILE))?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Locate and open the workspace for an invocation.
    ///
    /// Starts from the explicit `--workspace` path when given, otherwise from
    /// the current directory, and walks upward.
    pub fn locate(explicit: Option<PathBuf>) -> Result<Self> {
        let start = match explicit {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let root = Self::find_from(&start).ok_or_else(|| StrataError::WorkspaceNotFound {
            path: start.display().to_string(),
        })?;
        Self::open(&root)
    }

    /// The directory holding the project's own compiled components for the active profile
    pub fn build_profile_dir(&self) -> PathBuf {
        self.root
            .join(&self.config.build_dir)
            .join(&self.config.profile)
    }

    /// Component search path: project build output first, then configured library dirs.
    ///
    /// Relative configured entries are taken relative to the workspace root.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.build_profile_dir()];
        for entry in &self.config.search_path {
            if entry.is_absolute() {
                dirs.push(entry.clone());
            } else {
                dirs.push(self.root.join(entry));
            }
        }
        dirs
    }

    /// The engine binary to invoke, honoring the STRATA_ENGINE override
    pub fn engine_program(&self) -> PathBuf {
        match std::env::var(ENGINE_ENV) {
            Ok(program) if !program.is_empty() => PathBuf::from(program),
            _ => PathBuf::from(&self.config.engine_bin),
        }
    }

    /// Root component names for this workspace
    pub fn roots(&self) -> Vec<String> {
        self.config.roots()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_workspace(yaml: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).expect("temp dir");
        std::fs::write(temp.path().join(CONFIG_FILE), yaml).expect("write config");
        let root = temp.path().to_path_buf();
        (temp, root)
    }

    #[test]
    fn test_find_from_root() {
        let (_temp, root) = create_test_workspace("project: myapp\n");
        assert_eq!(Workspace::find_from(&root), Some(root));
    }

    #[test]
    fn test_find_from_nested() {
        let (_temp, root) = create_test_workspace("project: myapp\n");
        let nested = root.join("deep/nested/dir");
        std::fs::create_dir_all(&nested).expect("mkdir");
        assert_eq!(Workspace::find_from(&nested), Some(root));
    }

    #[test]
    fn test_find_from_no_workspace() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).expect("temp dir");
        assert_eq!(Workspace::find_from(temp.path()), None);
    }

    #[test]
    fn test_open_reads_config() {
        let (_temp, root) = create_test_workspace("project: myapp\nprofile: prod\n");
        let workspace = Workspace::open(&root).expect("open");
        assert_eq!(workspace.roots(), vec!["myapp"]);
        assert!(workspace.build_profile_dir().ends_with("_build/prod"));
    }

    #[test]
    fn test_locate_explicit_missing() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).expect("temp dir");
        let result = Workspace::locate(Some(temp.path().to_path_buf()));
        assert!(matches!(
            result.unwrap_err(),
            StrataError::WorkspaceNotFound { .. }
        ));
    }

    #[test]
    fn test_search_dirs_order_and_relative_entries() {
        let yaml = "\
project: myapp
search_path:
  - libs
  - /opt/runtime/lib
";
        let (_temp, root) = create_test_workspace(yaml);
        let workspace = Workspace::open(&root).expect("open");
        let dirs = workspace.search_dirs();
        assert_eq!(dirs.len(), 3);
        assert_eq!(dirs[0], workspace.build_profile_dir());
        assert_eq!(dirs[1], root.join("libs"));
        assert_eq!(dirs[2], PathBuf::from("/opt/runtime/lib"));
    }

    #[test]
    fn test_engine_program_from_config() {
        let (_temp, root) = create_test_workspace("project: myapp\nengine_bin: /bin/styper\n");
        let workspace = Workspace::open(&root).expect("open");
        // Only meaningful when the override is unset, which is the default in tests
        if std::env::var(ENGINE_ENV).is_err() {
            assert_eq!(workspace.engine_program(), PathBuf::from("/bin/styper"));
        }
    }
}
