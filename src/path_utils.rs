//! Cross-platform path utilities for Strata
//!
//! Artifact paths recorded in analysis stores must be stable across invocations,
//! so every path that reaches a store goes through [`normalize`] first.

use std::path::{Path, PathBuf};

use normpath::PathExt;

/// Characters that are unsafe in store file name segments
/// Replaced with hyphens and collapsed: `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`
const PATH_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Normalize a path to an absolute form with symlinks and `.`/`..` segments resolved.
///
/// Uses `normpath` for the resolution and `dunce` to simplify Windows UNC prefixes,
/// so the same artifact always yields the same recorded path. Falls back to the
/// input joined onto the current directory when the path does not exist yet.
pub fn normalize(path: &Path) -> PathBuf {
    match path.normalize() {
        Ok(normalized) => dunce::simplified(normalized.as_path()).to_path_buf(),
        Err(_) => {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        }
    }
}

/// Make a version or profile string safe for use in a store file name.
///
/// Replaces unsafe characters (including `/`, `\`, and `:`) with hyphens.
/// Collapses consecutive hyphens and removes leading/trailing hyphens.
/// Returns "unknown" if the result is empty.
pub fn safe_segment(value: &str) -> String {
    let key: String = value
        .chars()
        .map(|c| {
            if PATH_UNSAFE_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();

    let key = key
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches('-')
        .to_string();

    if key.is_empty() {
        "unknown".to_string()
    } else {
        key
    }
}
