//! Error types for the scanverdict library.
//!
//! Lookup misses are not errors: they are an ordinary [`LookupOutcome`] and
//! drive the heuristic fallback. `ScanError` covers what is left: I/O while
//! reading file content, configuration mistakes, and unexpected failures that
//! the engine turns into an error-classified result at its boundary.
//!
//! [`LookupOutcome`]: crate::core::LookupOutcome

use crate::core::types::Stage;
use thiserror::Error;

/// The error type for engine operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An I/O error occurred while reading file content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found at the specified path.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An internal error occurred.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },

    /// A pipeline stage panicked and was contained at the engine boundary.
    #[error("classification failed during {stage}: {message}")]
    Panicked {
        /// Stage the pipeline had reached.
        stage: Stage,
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl ScanError {
    /// Returns `true` if this error came from reading the file's bytes.
    ///
    /// Hashing failures are recovered by the engine as an unreachable lookup.
    pub fn is_hashing_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::FileNotFound { .. })
    }

    /// Creates a `FileNotFound` error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Maps an I/O error on `path`, distinguishing a missing file.
    pub(crate) fn from_path_io(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Self::file_not_found(path.display().to_string())
        } else {
            Self::Io(e)
        }
    }
}

/// A specialized `Result` type for engine operations.
pub type EngineResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_failure_classification() {
        let io = ScanError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(io.is_hashing_failure());
        assert!(ScanError::file_not_found("/missing").is_hashing_failure());
        assert!(!ScanError::internal("bug").is_hashing_failure());
        assert!(!ScanError::configuration("bad").is_hashing_failure());
    }

    #[test]
    fn test_from_path_io_not_found() {
        let path = std::path::Path::new("/nope/file.bin");
        let err = ScanError::from_path_io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::FileNotFound { .. }));
        assert!(err.to_string().contains("/nope/file.bin"));
    }

    #[test]
    fn test_panicked_display_names_stage() {
        let err = ScanError::Panicked {
            stage: Stage::Lookup,
            message: "index out of bounds".into(),
        };
        assert_eq!(
            err.to_string(),
            "classification failed during lookup: index out of bounds"
        );
    }
}
