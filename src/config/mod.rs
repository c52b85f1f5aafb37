//! Workspace configuration (strata.yaml)
//!
//! The configuration file lives at the workspace root and declares the root
//! components, where compiled artifacts are found, and how the external
//! analysis engine is invoked.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error};

/// Configuration file name at the workspace root
pub const CONFIG_FILE: &str = "strata.yaml";

fn default_build_dir() -> String {
    "_build".to_string()
}

fn default_profile() -> String {
    "dev".to_string()
}

fn default_runtime_version() -> String {
    "0".to_string()
}

fn default_engine_bin() -> String {
    "styper".to_string()
}

/// Workspace configuration from strata.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Root component name (single-component projects)
    #[serde(default)]
    pub project: Option<String>,

    /// Root component names (multi-component projects; overrides `project` if both set)
    #[serde(default)]
    pub apps: Vec<String>,

    /// Directory with compiled artifacts, relative to the workspace root
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Build profile; qualifies the innermost store so profiles never share one
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Directories containing library components (each holds `<name>/manifest.yaml`)
    #[serde(default)]
    pub search_path: Vec<PathBuf>,

    /// Language runtime version; qualifies every store path
    #[serde(default = "default_runtime_version")]
    pub runtime_version: String,

    /// Analysis engine binary; may also be overridden with STRATA_ENGINE
    #[serde(default = "default_engine_bin")]
    pub engine_bin: String,

    /// Default warning categories passed to the analysis verb
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Optional shell command that compiles the project before analysis
    #[serde(default)]
    pub compile: Option<String>,
}

impl ProjectConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file path
    pub fn load(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Err(config_error::not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| config_error::parse_failed(path.display().to_string(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.project.is_none() && self.apps.is_empty() {
            return Err(config_error::invalid(
                "either 'project' or 'apps' must name at least one root component",
            ));
        }
        if self
            .apps
            .iter()
            .chain(self.project.iter())
            .any(|name| name.trim().is_empty())
        {
            return Err(config_error::invalid("component names must not be empty"));
        }
        if self.build_dir.trim().is_empty() {
            return Err(config_error::invalid("'build_dir' must not be empty"));
        }
        Ok(())
    }

    /// Root component names, in declaration order
    pub fn roots(&self) -> Vec<String> {
        if self.apps.is_empty() {
            self.project.iter().cloned().collect()
        } else {
            self.apps.clone()
        }
    }
}
