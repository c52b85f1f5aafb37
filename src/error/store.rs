//! Analysis store errors

use super::StrataError;

/// Creates a store missing error
pub fn missing(path: impl Into<String>) -> StrataError {
    StrataError::StoreMissing { path: path.into() }
}

/// Creates a store unreadable error
pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> StrataError {
    StrataError::StoreUnreadable {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a store copy failed error
pub fn copy_failed(
    from: impl Into<String>,
    to: impl Into<String>,
    reason: impl Into<String>,
) -> StrataError {
    StrataError::StoreCopyFailed {
        from: from.into(),
        to: to.into(),
        reason: reason.into(),
    }
}

/// Creates a store directory unavailable error
pub fn dir_unavailable(message: impl Into<String>) -> StrataError {
    StrataError::StoreDirUnavailable {
        message: message.into(),
    }
}
