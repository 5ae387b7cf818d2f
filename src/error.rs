use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a search or preview request.
///
/// Missing directories, a missing remote index and undecodable remote
/// records are not errors; they are logged and absorbed where they occur.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("failed to read descriptor {path:?}: {source}")]
    UnreadableDescriptor {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("host rejected result: {0}")]
    Emit(String),

    #[error("preview failed: {0}")]
    Preview(String),
}

pub type Result<T> = std::result::Result<T, ScopeError>;
