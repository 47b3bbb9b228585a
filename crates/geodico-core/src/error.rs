//! Custom error types for `geodico` operations.
//!
//! Most conditions met while reading a container are absorbed into the report
//! as markers or fallback values. The types here cover what does surface: an
//! unreadable container when the caller asks for a hard failure, and file
//! statistics that cannot be collected.

use std::path::PathBuf;
use thiserror::Error;

use crate::diagnostics::ErrorCategory;

/// Main error type for `geodico` operations.
#[derive(Debug, Error)]
pub enum GeoDicoError {
    /// I/O errors (file statistics)
    #[error(transparent)]
    Io(#[from] IoError),

    /// The container could not be opened and the report is error-shaped
    #[error("Container '{path}' could not be read ({category:?}: {message})")]
    Corrupt {
        /// The requested path
        path: PathBuf,
        /// Category of the last library diagnostic
        category: ErrorCategory,
        /// Message of the last library diagnostic
        message: String,
    },
}

/// I/O related errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// Failed to stat a path
    #[error("Failed to read metadata of '{path}': {source}")]
    Metadata {
        /// The path
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Results using `GeoDicoError`.
pub type Result<T> = std::result::Result<T, GeoDicoError>;

impl GeoDicoError {
    /// Get a user-friendly error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(IoError::Metadata { path, .. }) => {
                format!("Cannot read file information for {}", path.display())
            },
            Self::Corrupt { path, message, .. } if message.is_empty() => {
                format!("Could not open {}", path.display())
            },
            Self::Corrupt { path, message, .. } => {
                format!("Could not open {}: {message}", path.display())
            },
        }
    }

    /// Get recovery suggestions if available.
    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Corrupt { .. } => Some(
                "Check that the file exists and is a spatial database, then run \
                 'geodico drivers' to see which formats this GDAL build can open."
                    .to_string(),
            ),
            Self::Io(_) => {
                Some("Check that the file path is correct and readable.".to_string())
            },
        }
    }
}
