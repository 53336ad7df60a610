//! Error kinds for archviz operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to decide how to report a failure; the CLI maps
/// it straight to a process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Invalid configuration or parameters
    ConfigInvalid,

    // =========================================================================
    // Input errors
    // =========================================================================
    /// The input document is not structured data of the expected shape
    InvalidFormat,

    /// A required record field is absent
    MissingField,

    /// A field value cannot be interpreted as the required type
    FieldCoercion,

    /// Nothing renderable remains after normalization
    EmptyGraph,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Output errors
    // =========================================================================
    /// Rasterisation or image encoding failed
    RenderFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Process exit status for a run that failed with this kind.
    ///
    /// An empty graph is an expected outcome and gets its own status.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::EmptyGraph => 2,
            _ => 1,
        }
    }
}
