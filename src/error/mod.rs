//! Error types and handling for Strata
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`manifest`]: Component manifest errors
//! - [`config`]: Workspace configuration errors
//! - [`store`]: Analysis store errors
//! - [`engine`]: External analysis engine errors
//! - [`fs`]: File system errors

// Declare submodules
pub mod config;
pub mod engine;
pub mod fs;
pub mod manifest;
pub mod store;

// Re-export convenience constructors from submodules
#[allow(unused_imports)]
pub use config::{
    invalid as config_invalid, not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
#[allow(unused_imports)]
pub use engine::{failed as engine_failed, spawn_failed as engine_spawn_failed};
#[allow(unused_imports)]
pub use fs::{io_error, read_failed as file_read_failed, write_failed as file_write_failed};
#[allow(unused_imports)]
pub use manifest::{not_found as manifest_not_found, parse_failed as manifest_parse_failed};
#[allow(unused_imports)]
pub use store::{
    copy_failed as store_copy_failed, dir_unavailable as store_dir_unavailable,
    missing as store_missing, unreadable as store_unreadable,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Strata operations
#[derive(Error, Diagnostic, Debug)]
pub enum StrataError {
    // Manifest errors
    #[error("Component manifest for '{name}' not found")]
    #[diagnostic(
        code(strata::manifest::not_found),
        help("Check that the component name is correct and its directory is on the search path")
    )]
    ManifestNotFound { name: String },

    #[error("Failed to parse component manifest: {path}")]
    #[diagnostic(code(strata::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    // Workspace errors
    #[error("No strata workspace found from: {path}")]
    #[diagnostic(
        code(strata::workspace::not_found),
        help("Create a strata.yaml at the project root to define a workspace")
    )]
    WorkspaceNotFound { path: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(strata::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(strata::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(strata::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(strata::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Store errors
    #[error("Analysis store missing: {path}")]
    #[diagnostic(
        code(strata::store::missing),
        help("Run 'strata check' to build the analysis stores for this environment")
    )]
    StoreMissing { path: String },

    #[error("Failed to read analysis store: {path}")]
    #[diagnostic(code(strata::store::unreadable))]
    StoreUnreadable { path: String, reason: String },

    #[error("Failed to copy analysis store from '{from}' to '{to}'")]
    #[diagnostic(code(strata::store::copy_failed))]
    StoreCopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Could not determine analysis store directory: {message}")]
    #[diagnostic(
        code(strata::store::dir_unavailable),
        help("Set STRATA_STORE_DIR to a writable directory")
    )]
    StoreDirUnavailable { message: String },

    // Engine errors
    #[error("Failed to start analysis engine '{program}': {reason}")]
    #[diagnostic(
        code(strata::engine::spawn_failed),
        help("Check the 'engine_bin' setting in strata.yaml and that the binary is on PATH")
    )]
    EngineSpawnFailed { program: String, reason: String },

    #[error("Analysis engine '{verb}' operation failed: {reason}")]
    #[diagnostic(code(strata::engine::failed))]
    EngineFailed { verb: String, reason: String },

    // Analysis errors
    #[error("Project modules collide with background stores: {modules}")]
    #[diagnostic(
        code(strata::analysis::collision),
        help(
            "A module cannot be analysed while a copy of it is background knowledge. \
             Remove the component from the dependency list or rename the module."
        )
    )]
    ModuleCollision { modules: String },

    #[error("Compile step failed: {command}")]
    #[diagnostic(code(strata::compile::failed))]
    CompileFailed { command: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(strata::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(strata::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(strata::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for StrataError {
    fn from(err: std::io::Error) -> Self {
        StrataError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StrataError {
    fn from(err: serde_yaml::Error) -> Self {
        StrataError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for StrataError {
    fn from(err: inquire::InquireError) -> Self {
        StrataError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, StrataError>;
