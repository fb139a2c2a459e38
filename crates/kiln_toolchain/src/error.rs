//! Error types for toolchain discovery and config persistence.

use std::path::PathBuf;

/// Errors that can occur while probing a wasi-sdk root or persisting
/// the toolchain record.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// An I/O error occurred while reading or writing the config file.
    #[error("failed to access toolchain config: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse toolchain config: {0}")]
    Parse(String),

    /// The record could not be serialized to TOML.
    #[error("failed to encode toolchain config: {0}")]
    Encode(String),

    /// The sdk root has no clang driver at the expected location.
    #[error("no clang driver at {}", .0.display())]
    MissingCompiler(PathBuf),

    /// The sdk root has no wasi-sysroot directory.
    #[error("no wasi-sysroot directory at {}", .0.display())]
    MissingSysroot(PathBuf),
}
