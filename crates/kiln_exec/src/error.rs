//! Error types for bounded process execution.

use std::path::PathBuf;

/// Errors that can occur when spawning or supervising a child process.
///
/// A nonzero exit, a signal death, or a timeout are not errors; they are
/// outcomes reported through [`ExecOutput`](crate::ExecOutput). This enum
/// covers the cases where no outcome could be produced at all.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The program could not be started (missing binary, permissions).
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        /// The program that was asked for.
        program: PathBuf,
        /// The underlying OS error.
        source: std::io::Error,
    },

    /// Waiting on the child or draining its pipes failed after a
    /// successful spawn.
    #[error("failed while running {}: {source}", program.display())]
    Runtime {
        /// The program that was running.
        program: PathBuf,
        /// The underlying OS error.
        source: std::io::Error,
    },
}

impl ExecError {
    /// True when the failure was the program not existing at all, as
    /// opposed to permissions or a broken pipe. Callers use this to turn
    /// a missing `git` into its conventional exit code 127.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ExecError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
