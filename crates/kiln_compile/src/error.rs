//! Error types for request validation and workspace handling.

/// Client-side request faults, rejected before the compiler runs.
///
/// Each variant's display text is the exact message the HTTP layer
/// returns with status 400.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    /// The `files` mapping was missing or empty.
    #[error("No files provided")]
    NoFiles,

    /// No file could be chosen as the compilation entry point.
    #[error("No .cpp or .c entry point found")]
    NoEntryPoint,

    /// A supplied path would resolve outside the workspace root.
    #[error("Unsafe file path: {0}")]
    UnsafePath(String),
}

/// Faults while creating or populating the disposable workspace.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// Creating a directory or writing a file failed.
    #[error("workspace I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A client path escaped the workspace root.
    #[error("unsafe file path: {0}")]
    UnsafePath(String),
}
