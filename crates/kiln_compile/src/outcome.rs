//! Terminal classification of one compile request.

use std::fmt::Display;

/// What one trip through the pipeline produced.
///
/// Exactly one variant per request. Request-shape faults (no files, no
/// entry point, unsafe paths) never reach this type; they are rejected
/// as [`RequestError`](crate::RequestError) before a workspace exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The compiler exited 0 and the artifact was read back.
    Success {
        /// The compiled WebAssembly module.
        artifact: Vec<u8>,
        /// Compiler chatter, typically warnings, possibly empty.
        diagnostics: String,
    },
    /// The compiler ran to completion and rejected the input.
    CompilerFailure {
        /// The compiler's exit code (negative for a signal death).
        exit_code: i32,
        /// The compiler's combined stdout and stderr.
        diagnostics: String,
    },
    /// The wall-clock deadline expired and the compiler was killed.
    Timeout,
    /// The pipeline itself broke: spawn failure, unreadable artifact,
    /// workspace I/O. The message is logged and surfaced as a 500.
    Infrastructure {
        /// Description of the fault.
        message: String,
    },
}

impl CompileOutcome {
    /// Shorthand for an [`Infrastructure`](Self::Infrastructure) outcome.
    pub fn infrastructure(message: impl Display) -> CompileOutcome {
        CompileOutcome::Infrastructure {
            message: message.to_string(),
        }
    }

    /// One word for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            CompileOutcome::Success { .. } => "success",
            CompileOutcome::CompilerFailure { .. } => "compiler-failure",
            CompileOutcome::Timeout => "timeout",
            CompileOutcome::Infrastructure { .. } => "infrastructure-fault",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infrastructure_from_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no clang");
        let outcome = CompileOutcome::infrastructure(io);
        match outcome {
            CompileOutcome::Infrastructure { message } => assert!(message.contains("no clang")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            CompileOutcome::Success {
                artifact: Vec::new(),
                diagnostics: String::new()
            }
            .label(),
            "success"
        );
        assert_eq!(CompileOutcome::Timeout.label(), "timeout");
    }
}
