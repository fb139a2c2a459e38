//! The `/git` proxy endpoint.
//!
//! The editor drives its source control UI through this endpoint instead of
//! shipping a git implementation to the browser. Every reply, including
//! rejections, uses the same envelope so the client has exactly one decode
//! path: `{ok, stdout, stderr, code}`.
//!
//! Arguments are passed through verbatim except for a small denylist of
//! flags that would let a crafted request execute arbitrary programs
//! through git's transport helpers.

use std::path::Path;
use std::time::Duration;

use kiln_exec::BoundedCommand;
use log::error;
use serde::{Deserialize, Serialize};

use crate::api::JsonReply;

/// Flags the proxy refuses, matched exactly or as a `flag=value` prefix.
pub const BLOCKED_ARGS: [&str; 3] = ["--exec", "--upload-pack", "--receive-pack"];

/// Wall-clock limit for one proxied git command.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a `/git` request.
#[derive(Debug, Deserialize)]
pub struct GitRequest {
    /// Argument vector handed to `git`, without the program name.
    #[serde(default)]
    pub args: Vec<String>,
    /// Text piped to git's stdin, for commands like `apply` or `commit -F -`.
    #[serde(default)]
    pub input: String,
}

/// Envelope every `/git` reply uses.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitResponse {
    /// Whether git ran and exited zero.
    pub ok: bool,
    /// Captured stdout, untrimmed.
    pub stdout: String,
    /// Captured stderr, or the proxy's own refusal text.
    pub stderr: String,
    /// Git's exit code; `1` for proxy-level failures, `127` when git is
    /// not installed.
    pub code: i32,
}

impl GitResponse {
    fn refusal(message: impl Into<String>) -> GitResponse {
        GitResponse {
            ok: false,
            stdout: String::new(),
            stderr: message.into(),
            code: 1,
        }
    }
}

/// Runs one proxied git command inside `repo_root` and encodes the reply.
pub fn handle_git(repo_root: &Path, body: &str) -> JsonReply {
    let request: GitRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => {
            return reply(
                400,
                &GitResponse::refusal(format!("Invalid request body: {err}")),
            )
        }
    };
    if request.args.is_empty() {
        return reply(400, &GitResponse::refusal("No git args provided"));
    }
    if let Some(arg) = request.args.iter().find(|arg| is_blocked(arg)) {
        return reply(400, &GitResponse::refusal(format!("Blocked argument: {arg}")));
    }

    let run = BoundedCommand::new("git")
        .args(&request.args)
        .current_dir(repo_root)
        .stdin(request.input)
        .timeout(GIT_TIMEOUT)
        .run();
    match run {
        Ok(output) if output.timed_out => reply(
            200,
            &GitResponse::refusal(format!(
                "git command timed out ({}s)",
                GIT_TIMEOUT.as_secs()
            )),
        ),
        Ok(output) => {
            let ok = output.success();
            let code = output.exit_code();
            reply(
                200,
                &GitResponse {
                    ok,
                    stdout: output.stdout,
                    stderr: output.stderr,
                    code,
                },
            )
        }
        Err(err) if err.is_not_found() => reply(
            200,
            &GitResponse {
                ok: false,
                stdout: String::new(),
                stderr: "git not found: is Git installed and on your PATH?".to_string(),
                code: 127,
            },
        ),
        Err(err) => {
            error!("git proxy fault: {err}");
            reply(500, &GitResponse::refusal(err.to_string()))
        }
    }
}

fn is_blocked(arg: &str) -> bool {
    BLOCKED_ARGS
        .iter()
        .any(|blocked| arg == *blocked || arg.starts_with(&format!("{blocked}=")))
}

fn reply(status: u16, body: &GitResponse) -> JsonReply {
    (status, serde_json::to_string(body).unwrap_or_default())
}
