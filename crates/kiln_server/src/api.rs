//! JSON encoding for the `/compile` endpoint.
//!
//! The browser editor posts a [`CompileRequest`](kiln_compile::CompileRequest)
//! body and receives one of:
//!
//! - `200` with `success: true`, the artifact as base64 `wasm`, compiler
//!   diagnostics in `stderr`, and the resolved `entry`;
//! - `200` with `success: false` plus `exit_code` and `stderr` when the
//!   compiler itself rejected the sources (a normal outcome for the caller);
//! - `200` with `success: false` and a timeout notice in `stderr` when the
//!   compile ran past its wall-clock limit;
//! - `400` with `{"error": ...}` when the request was malformed or unsafe;
//! - `500` with `success: false` when the server could not run the compile
//!   at all.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use kiln_compile::{compile_with_timeout, CompileOutcome, CompileResult, COMPILE_TIMEOUT};
use kiln_toolchain::ToolchainConfig;
use log::{error, info};
use serde::Serialize;

/// HTTP status code paired with a serialized JSON body.
pub type JsonReply = (u16, String);

/// Wire shape of every `/compile` reply that reached the pipeline.
#[derive(Debug, Serialize)]
pub struct CompileResponse {
    /// Whether an artifact was produced.
    pub success: bool,
    /// Base64-encoded wasm module, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wasm: Option<String>,
    /// Compiler exit code, present only when the compiler failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Diagnostics, timeout notice, or server fault description.
    pub stderr: String,
    /// Entry file the build used, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

/// Wire shape of request-level rejections, also used for unknown routes.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason the request was refused.
    pub error: String,
}

/// Builds a `{"error": ...}` reply with the given status.
pub fn error_reply(status: u16, message: impl Into<String>) -> JsonReply {
    let body = ErrorResponse {
        error: message.into(),
    };
    json_reply(status, &body)
}

/// Runs one compile request end to end and encodes the reply.
pub fn handle_compile(toolchain: &ToolchainConfig, body: &str) -> JsonReply {
    handle_compile_with_timeout(toolchain, body, COMPILE_TIMEOUT)
}

/// [`handle_compile`] with an explicit wall-clock limit. Tests inject a
/// short limit here so a hanging compiler does not stall the suite.
pub fn handle_compile_with_timeout(
    toolchain: &ToolchainConfig,
    body: &str,
    limit: Duration,
) -> JsonReply {
    let request = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => return error_reply(400, format!("Invalid request body: {err}")),
    };
    match compile_with_timeout(toolchain, &request, limit) {
        Ok(result) => encode_result(result, limit),
        Err(err) => {
            info!("compile rejected: {err}");
            error_reply(400, err.to_string())
        }
    }
}

fn encode_result(result: CompileResult, limit: Duration) -> JsonReply {
    info!("compile {}: {}", result.entry, result.outcome.label());
    match result.outcome {
        CompileOutcome::Success {
            artifact,
            diagnostics,
        } => json_reply(
            200,
            &CompileResponse {
                success: true,
                wasm: Some(STANDARD.encode(artifact)),
                exit_code: None,
                stderr: diagnostics,
                entry: Some(result.entry),
            },
        ),
        CompileOutcome::CompilerFailure {
            exit_code,
            diagnostics,
        } => json_reply(
            200,
            &CompileResponse {
                success: false,
                wasm: None,
                exit_code: Some(exit_code),
                stderr: diagnostics,
                entry: None,
            },
        ),
        CompileOutcome::Timeout => json_reply(
            200,
            &CompileResponse {
                success: false,
                wasm: None,
                exit_code: None,
                stderr: timeout_message(limit),
                entry: None,
            },
        ),
        CompileOutcome::Infrastructure { message } => {
            error!("compile fault: {message}");
            json_reply(
                500,
                &CompileResponse {
                    success: false,
                    wasm: None,
                    exit_code: None,
                    stderr: message,
                    entry: None,
                },
            )
        }
    }
}

fn timeout_message(limit: Duration) -> String {
    format!("Compilation timed out ({}s limit)", limit.as_secs())
}

fn json_reply(status: u16, body: &impl Serialize) -> JsonReply {
    (status, serde_json::to_string(body).unwrap_or_default())
}
