use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that fail a call before any mutation has happened.
///
/// Per-entry failures during commit or restore are never raised; they are
/// accumulated into the error list of the batch result instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("mode must be 'before' or 'after', got '{0}'")]
    InvalidRestoreMode(String),

    #[error("duplicate operation step: {0}")]
    DuplicateStep(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::FolderNotFound(PathBuf::from("/no/such/dir"));
        assert!(err.to_string().contains("/no/such/dir"));

        let err = Error::InvalidRestoreMode("sideways".to_string());
        assert!(err.to_string().contains("sideways"));
        assert!(err.to_string().contains("before"));
    }
}
