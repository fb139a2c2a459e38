//! wasi-sdk discovery and persisted toolchain configuration.
//!
//! The compile pipeline needs three verified paths: the clang driver, the
//! derived clang++ driver, and the WASI sysroot. This crate locates them
//! under a wasi-sdk installation root ([`probe`]), persists the verified
//! record as TOML so later server starts skip the setup wizard ([`store`]),
//! and exposes the record as [`ToolchainConfig`].

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod probe;
pub mod store;

pub use config::ToolchainConfig;
pub use error::ToolchainError;
pub use probe::probe;
pub use store::{load, load_from_str, save, CONFIG_FILE};
