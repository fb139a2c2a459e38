//! HTTP front end for the kiln development server.
//!
//! A single-threaded [`tiny_http`] loop routes three kinds of request:
//!
//! - `POST /compile` hands the request body to [`kiln_compile`] and encodes
//!   the outcome ([`api`]).
//! - `POST /git` proxies a denylist-filtered git invocation against the
//!   repository root ([`git`]).
//! - `GET` requests resolve static editor assets under the site root
//!   ([`assets`]).
//!
//! Every response carries the cross-origin isolation headers
//! (`Cross-Origin-Opener-Policy`, `Cross-Origin-Embedder-Policy`) so the
//! editor can run threaded wasm, plus permissive CORS headers for local
//! tooling.

#![warn(missing_docs)]

pub mod api;
pub mod assets;
pub mod error;
pub mod git;
pub mod server;

pub use api::{handle_compile, CompileResponse, ErrorResponse, JsonReply};
pub use assets::load_asset;
pub use error::ServerError;
pub use git::{handle_git, GitRequest, GitResponse, BLOCKED_ARGS, GIT_TIMEOUT};
pub use server::{HttpServer, ServerConfig, ShutdownHandle};
