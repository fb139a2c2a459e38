//! Bounded execution of external processes.
//!
//! Both the compiler and the git proxy shell out to programs the server
//! does not control, so every invocation runs under a hard wall-clock
//! deadline with both output streams captured. On expiry the whole child
//! process tree is killed, not just the direct child, so a compiler that
//! forks helpers cannot outlive its request.
//!
//! # Modules
//!
//! - `error` — Spawn and runtime error types
//! - `output` — Captured output and exit classification
//! - `command` — The [`BoundedCommand`] builder and runner

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod output;

pub use command::BoundedCommand;
pub use error::ExecError;
pub use output::ExecOutput;
