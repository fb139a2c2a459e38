//! Orchestration of one compile request, start to finish.

use crate::command::CompileCommand;
use crate::entry::{resolve_entry, ResolvedEntry};
use crate::error::{RequestError, WorkspaceError};
use crate::outcome::CompileOutcome;
use crate::request::CompileRequest;
use crate::workspace::Workspace;
use kiln_exec::BoundedCommand;
use kiln_toolchain::ToolchainConfig;
use std::time::Duration;

/// Wall-clock limit for one compiler invocation.
pub const COMPILE_TIMEOUT: Duration = Duration::from_secs(30);

/// The resolved entry point plus the terminal outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    /// The workspace-relative path that was compiled.
    pub entry: String,
    /// What happened.
    pub outcome: CompileOutcome,
}

/// Runs one request through the full pipeline under the standard
/// 30 second deadline.
///
/// `Err` means the request itself was rejected (400 class); `Ok` carries
/// every other outcome including faults, so the caller can map status
/// codes without re-classifying anything.
pub fn compile(
    config: &ToolchainConfig,
    request: &CompileRequest,
) -> Result<CompileResult, RequestError> {
    compile_with_timeout(config, request, COMPILE_TIMEOUT)
}

/// [`compile`] with an injectable deadline so tests are not stuck for
/// half a minute behind a deliberately hanging stub compiler.
pub fn compile_with_timeout(
    config: &ToolchainConfig,
    request: &CompileRequest,
    timeout: Duration,
) -> Result<CompileResult, RequestError> {
    request.validate()?;
    let entry = resolve_entry(&request.files, request.entry.as_deref())?;

    let workspace = match Workspace::create() {
        Ok(workspace) => workspace,
        Err(err) => {
            return Ok(CompileResult {
                entry: entry.path,
                outcome: CompileOutcome::infrastructure(err),
            })
        }
    };

    // The workspace is dropped when this function returns, on every
    // branch below and on unwind, which is the cleanup guarantee.
    let outcome = run_build(config, &workspace, &entry, request, timeout)?;
    Ok(CompileResult {
        entry: entry.path,
        outcome,
    })
}

/// Materialize, build the command, run it, classify, read the artifact.
fn run_build(
    config: &ToolchainConfig,
    workspace: &Workspace,
    entry: &ResolvedEntry,
    request: &CompileRequest,
    timeout: Duration,
) -> Result<CompileOutcome, RequestError> {
    match workspace.materialize(&request.files) {
        Ok(()) => {}
        Err(WorkspaceError::UnsafePath(path)) => return Err(RequestError::UnsafePath(path)),
        Err(err) => return Ok(CompileOutcome::infrastructure(err)),
    }

    let entry_abs = match workspace.resolve(&entry.path) {
        Ok(path) => path,
        Err(WorkspaceError::UnsafePath(path)) => return Err(RequestError::UnsafePath(path)),
        Err(err) => return Ok(CompileOutcome::infrastructure(err)),
    };

    let command = CompileCommand::build(
        config,
        workspace.root(),
        &entry_abs,
        entry.dialect,
        &request.std,
        &request.opt,
        &request.flags,
    );

    let output = match BoundedCommand::new(&command.program)
        .args(&command.args)
        .timeout(timeout)
        .run()
    {
        Ok(output) => output,
        Err(err) => return Ok(CompileOutcome::infrastructure(err)),
    };

    if output.timed_out {
        return Ok(CompileOutcome::Timeout);
    }

    let diagnostics = output.combined_output();
    if !output.success() {
        return Ok(CompileOutcome::CompilerFailure {
            exit_code: output.exit_code(),
            diagnostics,
        });
    }

    let artifact = match std::fs::read(workspace.artifact_path()) {
        Ok(bytes) => bytes,
        Err(err) => {
            return Ok(CompileOutcome::infrastructure(format!(
                "compiler exited 0 but produced no artifact: {err}"
            )))
        }
    };

    Ok(CompileOutcome::Success {
        artifact,
        diagnostics,
    })
}
