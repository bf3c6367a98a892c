//! Error types for grid configuration, reconciliation and host operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all grid operations
#[derive(Debug)]
pub enum GridError {
    /// A configuration value is outside its allowed range
    InvalidConfiguration {
        /// Name of the rejected option
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The tile collection disagrees with the scene it was built in
    ///
    /// Raised when an indexed tile is no longer live in the host or the grid
    /// root has disappeared. The manager answers it with a full teardown and
    /// rebuild instead of an incremental patch.
    StructuralInconsistency {
        /// Description of the mismatch
        reason: String,
    },

    /// The scene host refused an object creation or destruction
    HostOperationFailed {
        /// Host operation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Failed to save an exported lock map to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A command-line argument could not be interpreted
    InvalidArgument {
        /// Name of the argument
        argument: &'static str,
        /// Explanation of the problem
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid configuration '{parameter}' = '{value}': {reason}")
            }
            Self::StructuralInconsistency { reason } => {
                write!(f, "Grid structure is inconsistent: {reason}")
            }
            Self::HostOperationFailed { operation, reason } => {
                write!(f, "Scene host failed during {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidArgument { argument, reason } => {
                write!(f, "Invalid argument '{argument}': {reason}")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

/// Create an invalid configuration error
pub fn invalid_configuration(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a host failure error
pub fn host_failure(operation: &'static str, reason: &impl ToString) -> GridError {
    GridError::HostOperationFailed {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a structural inconsistency error
pub fn inconsistency(reason: &impl ToString) -> GridError {
    GridError::StructuralInconsistency {
        reason: reason.to_string(),
    }
}

impl GridError {
    /// Whether the error leaves the grid recoverable by a full rebuild
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::StructuralInconsistency { .. })
    }
}
