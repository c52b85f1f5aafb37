//! External analysis engine errors

use super::StrataError;

/// Creates an engine spawn failed error
pub fn spawn_failed(program: impl Into<String>, reason: impl Into<String>) -> StrataError {
    StrataError::EngineSpawnFailed {
        program: program.into(),
        reason: reason.into(),
    }
}

/// Creates an engine operation failed error
pub fn failed(verb: impl Into<String>, reason: impl Into<String>) -> StrataError {
    StrataError::EngineFailed {
        verb: verb.into(),
        reason: reason.into(),
    }
}
