//! Error type for server startup.

use thiserror::Error;

/// Failure raised while bringing the HTTP listener up.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen socket could not be bound.
    #[error("failed to bind {addr}: {reason}")]
    Bind {
        /// Address the server attempted to listen on.
        addr: String,
        /// Underlying socket error, stringified by the HTTP library.
        reason: String,
    },
}
