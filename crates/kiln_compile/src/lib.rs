//! The compile-request pipeline: sources in, WebAssembly out.
//!
//! One request carries a set of named source files plus compile options.
//! The pipeline materializes the files into a disposable workspace,
//! resolves which file is the entry point, builds a deterministic clang
//! invocation against the configured wasi-sdk, runs it under a hard
//! deadline, and classifies whatever happened into a [`CompileOutcome`].
//! The workspace is removed on every exit path, including panics.
//!
//! # Modules
//!
//! - `error` — Request validation and workspace error types
//! - `request` — The deserialized request contract and its defaults
//! - `entry` — Entry-point resolution and dialect inference
//! - `workspace` — The disposable on-disk project tree
//! - `command` — The compiler invocation builder
//! - `outcome` — Terminal classification of one request
//! - `pipeline` — Orchestration of the stages above

#![warn(missing_docs)]

pub mod command;
pub mod entry;
pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod request;
pub mod workspace;

pub use command::{CompileCommand, TARGET_TRIPLE};
pub use entry::{resolve_entry, Dialect, ResolvedEntry};
pub use error::{RequestError, WorkspaceError};
pub use outcome::CompileOutcome;
pub use pipeline::{compile, compile_with_timeout, CompileResult, COMPILE_TIMEOUT};
pub use request::CompileRequest;
pub use workspace::{Workspace, ARTIFACT_FILE};
