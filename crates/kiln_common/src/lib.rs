//! Shared foundational types for the Kiln development server.
//!
//! This crate provides primitives used by more than one crate in the
//! workspace. Currently that is path containment: both the compile
//! workspace materializer and the static asset server take paths from
//! the network and must confine them to a directory they own.

#![warn(missing_docs)]

pub mod path;

pub use path::safe_join;
