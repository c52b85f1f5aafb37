//! Analysis store identity and on-disk management
//!
//! Store paths are deterministic and version-qualified: host platform,
//! language runtime version and (for the innermost layer) the build profile
//! all appear in the file name, so incompatible environments never collide
//! on the same store.

use std::path::{Path, PathBuf};

use crate::error::{Result, store as store_error};
use crate::path_utils;

pub mod reconcile;

pub use reconcile::{ReconcileOutcome, ReconcilePlan, reconcile};

/// Environment variable overriding the store directory
pub const STORE_DIR_ENV: &str = "STRATA_STORE_DIR";

/// Store directory name under the user's cache directory
const STORE_DIR: &str = "strata";

/// Store file extension
pub const STORE_EXT: &str = "store";

/// Get the store directory path.
///
/// Uses the platform's standard cache location (e.g. XDG on Linux,
/// Library/Caches on macOS) with a `strata` subdirectory. Can be overridden
/// with the `STRATA_STORE_DIR` environment variable.
pub fn store_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(STORE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::cache_dir()
        .ok_or_else(|| store_error::dir_unavailable("could not determine cache directory"))?;

    Ok(base.join(STORE_DIR))
}

/// Deterministic store file name for a layer.
///
/// `<layer>-<os>-<arch>-<runtime_version>[-<profile>].store`; only the
/// innermost layer passes a profile.
pub fn store_file_name(layer: &str, runtime_version: &str, profile: Option<&str>) -> String {
    let mut name = format!(
        "{layer}-{}-{}-{}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        path_utils::safe_segment(runtime_version)
    );
    if let Some(profile) = profile {
        name.push('-');
        name.push_str(&path_utils::safe_segment(profile));
    }
    name.push('.');
    name.push_str(STORE_EXT);
    name
}

/// Absolute path of a layer's store for this environment
pub fn store_path(layer: &str, runtime_version: &str, profile: Option<&str>) -> Result<PathBuf> {
    Ok(store_dir()?.join(store_file_name(layer, runtime_version, profile)))
}

/// Copy a previous layer's store byte-for-byte as the initial state of `to`.
///
/// Stages through a temporary file in the destination directory and persists
/// it, so a crash mid-copy never leaves a truncated store at the canonical
/// path.
pub fn bootstrap_copy(from: &Path, to: &Path) -> Result<()> {
    let fail = |reason: String| {
        store_error::copy_failed(
            from.display().to_string(),
            to.display().to_string(),
            reason,
        )
    };

    let dir = to.parent().ok_or_else(|| {
        fail("destination has no parent directory".to_string())
    })?;
    std::fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))?;

    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| fail(e.to_string()))?;
    let mut source = std::fs::File::open(from).map_err(|e| fail(e.to_string()))?;
    std::io::copy(&mut source, &mut staged).map_err(|e| fail(e.to_string()))?;
    staged.persist(to).map_err(|e| fail(e.to_string()))?;

    Ok(())
}
