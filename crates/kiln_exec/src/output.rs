//! Captured output and exit classification for a supervised child.

/// Everything observed from one child process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code, when the child exited normally.
    pub code: Option<i32>,
    /// Terminating signal, when the child was signalled (unix only).
    pub signal: Option<i32>,
    /// Whether the wall-clock deadline expired and the process tree was
    /// killed, either before the child exited or while stragglers still
    /// held the output pipes open.
    pub timed_out: bool,
    /// Captured standard output, decoded lossily as UTF-8.
    pub stdout: String,
    /// Captured standard error, decoded lossily as UTF-8.
    pub stderr: String,
}

impl ExecOutput {
    /// True only for a clean exit 0 within the deadline.
    pub fn success(&self) -> bool {
        !self.timed_out && self.code == Some(0)
    }

    /// Collapses the exit state to one number: the exit code when there
    /// is one, otherwise the negated terminating signal, otherwise -1.
    pub fn exit_code(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => -signal,
            (None, None) => -1,
        }
    }

    /// Diagnostic text for humans: stdout then stderr, each trimmed,
    /// joined with a single newline, empty halves dropped.
    pub fn combined_output(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{stdout}\n{stderr}"),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (true, true) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_output(code: Option<i32>, signal: Option<i32>) -> ExecOutput {
        ExecOutput {
            code,
            signal,
            timed_out: false,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    #[test]
    fn success_requires_exit_zero() {
        assert!(make_output(Some(0), None).success());
        assert!(!make_output(Some(1), None).success());
        assert!(!make_output(None, Some(9)).success());
    }

    #[test]
    fn timed_out_is_never_success() {
        let mut out = make_output(Some(0), None);
        out.timed_out = true;
        assert!(!out.success());
    }

    #[test]
    fn exit_code_prefers_real_code() {
        assert_eq!(make_output(Some(3), None).exit_code(), 3);
        assert_eq!(make_output(Some(0), Some(9)).exit_code(), 0);
    }

    #[test]
    fn exit_code_negates_signal() {
        assert_eq!(make_output(None, Some(9)).exit_code(), -9);
    }

    #[test]
    fn exit_code_fallback() {
        assert_eq!(make_output(None, None).exit_code(), -1);
    }

    #[test]
    fn combined_output_joins_both_streams() {
        let mut out = make_output(Some(0), None);
        out.stdout = "note: building\n".to_string();
        out.stderr = "warning: unused variable\n".to_string();
        assert_eq!(
            out.combined_output(),
            "note: building\nwarning: unused variable"
        );
    }

    #[test]
    fn combined_output_drops_empty_halves() {
        let mut out = make_output(Some(0), None);
        out.stderr = "  warning: shadowed\n".to_string();
        assert_eq!(out.combined_output(), "warning: shadowed");

        out.stderr.clear();
        out.stdout = "all good".to_string();
        assert_eq!(out.combined_output(), "all good");
    }

    #[test]
    fn combined_output_empty_when_silent() {
        let out = make_output(Some(0), None);
        assert_eq!(out.combined_output(), "");
    }
}
