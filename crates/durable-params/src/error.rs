//! Error types for durable-params.
//!
//! Every fallible operation returns [`ParamsError`]. Filesystem failures keep
//! the underlying [`std::io::Error`] so callers can inspect the OS error code
//! (for example to tell a missing key apart from a permission problem).

use std::path::PathBuf;

/// Parameter store error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error(
        "Failed to ensure params path {}: {source} (errno={})",
        .path.display(),
        .source.raw_os_error().unwrap_or(0)
    )]
    Provision {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Unknown lifecycle flag: {0}")]
    InvalidFlag(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParamsError {
    /// The OS error code behind this error, if there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            ParamsError::Provision { source, .. } | ParamsError::Lock { source, .. } => {
                source.raw_os_error()
            }
            ParamsError::Io(e) => e.raw_os_error(),
            _ => None,
        }
    }

    /// True when the error is an I/O `NotFound`, e.g. removing an absent key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ParamsError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, ParamsError>;
