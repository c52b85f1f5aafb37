//! Component manifest errors

use super::StrataError;

/// Creates a manifest not found error
pub fn not_found(name: impl Into<String>) -> StrataError {
    StrataError::ManifestNotFound { name: name.into() }
}

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> StrataError {
    StrataError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
