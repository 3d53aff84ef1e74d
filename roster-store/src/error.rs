//! Error types for roster-store.

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from registry store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A record file exists but does not parse.
    #[error("failed to parse record at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Refused to persist a name that is not a valid project identifier.
    #[error("invalid project name '{name}'")]
    InvalidName { name: String },

    /// Something other than a regular file sits at a record path.
    #[error("{path} exists but is not a record file")]
    NotARecord { path: PathBuf },
}

impl StoreError {
    /// Whether retrying the same operation may succeed.
    ///
    /// Only I/O conditions that clear on their own count; permission and
    /// parse failures do not.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Io { source, .. } => matches!(
                source.kind(),
                ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut
            ),
            StoreError::Yaml(_)
            | StoreError::Parse { .. }
            | StoreError::InvalidName { .. }
            | StoreError::NotARecord { .. } => false,
        }
    }
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_io_is_transient() {
        let err = io_err("/tmp/x", std::io::Error::from(ErrorKind::Interrupted));
        assert!(err.is_transient());
    }

    #[test]
    fn permission_denied_is_not_transient() {
        let err = io_err("/tmp/x", std::io::Error::from(ErrorKind::PermissionDenied));
        assert!(!err.is_transient());
        assert!(err.to_string().contains("/tmp/x"));
    }
}
