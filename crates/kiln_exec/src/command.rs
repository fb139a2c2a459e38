//! Building and running a deadline-bounded child process.

use crate::error::ExecError;
use crate::output::ExecOutput;
use std::ffi::{OsStr, OsString};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often the runner polls `try_wait` while the child is alive.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A child-process invocation with a hard wall-clock deadline.
///
/// Built once, run once. Both output streams are drained on dedicated
/// threads while the caller's thread polls for exit, so a child that
/// fills a pipe can never deadlock the server.
#[derive(Debug, Clone)]
pub struct BoundedCommand {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    stdin: Option<String>,
    timeout: Duration,
}

impl BoundedCommand {
    /// Starts describing an invocation of `program` with a 30 second
    /// default deadline.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            stdin: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Appends arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Sets the child's working directory. Left unset, the child
    /// inherits the server's.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Feeds `text` to the child's stdin and closes it. Without this the
    /// child gets a closed stdin, never the server's terminal.
    pub fn stdin(mut self, text: impl Into<String>) -> Self {
        self.stdin = Some(text.into());
        self
    }

    /// Replaces the default deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the child to completion or to the deadline.
    ///
    /// Expiry kills the whole child process tree (the child is spawned
    /// as its own process group leader on unix) and still reaps the
    /// child, so no zombie survives a timeout. The same deadline bounds
    /// the output drain: a descendant that outlives the child while
    /// holding the pipes open is killed too, instead of stalling the
    /// caller until its EOF. The timeout is reported in
    /// [`ExecOutput::timed_out`], not as an error.
    pub fn run(&self) -> Result<ExecOutput, ExecError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|source| ExecError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdin_thread = match (&self.stdin, child.stdin.take()) {
            (Some(text), Some(mut pipe)) => {
                let text = text.clone();
                Some(thread::spawn(move || {
                    // The child may exit without reading; a broken pipe
                    // here is not an error worth reporting.
                    let _ = pipe.write_all(text.as_bytes());
                }))
            }
            _ => None,
        };
        let stdout_thread = child.stdout.take().map(spawn_reader);
        let stderr_thread = child.stderr.take().map(spawn_reader);

        let deadline = Instant::now().checked_add(self.timeout);
        let (status, mut timed_out) = self.wait_with_deadline(&mut child, deadline)?;

        // The child can exit in time while a forked descendant still
        // holds its end of the pipes; the pipe threads would then block
        // until that orphan exits on its own. The deadline covers the
        // drain too: on expiry the surviving group members are killed,
        // which closes the pipes and lets the joins finish.
        let drained = finished_by(&stdin_thread, deadline)
            && finished_by(&stdout_thread, deadline)
            && finished_by(&stderr_thread, deadline);
        if !drained {
            kill_tree(&mut child);
            timed_out = true;
        }

        if let Some(handle) = stdin_thread {
            let _ = handle.join();
        }
        let stdout = join_reader(stdout_thread);
        let stderr = join_reader(stderr_thread);

        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal: Option<i32> = None;

        Ok(ExecOutput {
            code: status.code(),
            signal,
            timed_out,
            stdout,
            stderr,
        })
    }

    /// Polls for exit until the deadline, then kills and reaps.
    fn wait_with_deadline(
        &self,
        child: &mut Child,
        deadline: Option<Instant>,
    ) -> Result<(ExitStatus, bool), ExecError> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok((status, false)),
                Ok(None) => {}
                Err(source) => return Err(self.runtime(source)),
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                kill_tree(child);
                let status = child.wait().map_err(|source| self.runtime(source))?;
                return Ok((status, true));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn runtime(&self, source: std::io::Error) -> ExecError {
        ExecError::Runtime {
            program: self.program.clone(),
            source,
        }
    }
}

/// Drains a pipe to the end on its own thread.
fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn join_reader(handle: Option<thread::JoinHandle<Vec<u8>>>) -> String {
    let bytes = handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Polls until the pipe thread finishes or the deadline passes.
/// Returns false on expiry without joining, so the caller can kill the
/// pipe holders first and join afterwards.
fn finished_by<T>(handle: &Option<thread::JoinHandle<T>>, deadline: Option<Instant>) -> bool {
    let Some(handle) = handle else {
        return true;
    };
    loop {
        if handle.is_finished() {
            return true;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return false;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kills the child and, on unix, every descendant in its process group.
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    // process_group(0) at spawn made the child the group leader, so the
    // negative pgid reaches forked grandchildren too.
    let pgid = child.id() as i32;
    unsafe {
        libc::kill(-pgid, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> BoundedCommand {
        BoundedCommand::new("sh").args(["-c", script])
    }

    #[test]
    fn captures_stdout() {
        let out = sh("printf hello").run().unwrap();
        assert!(out.success());
        assert_eq!(out.code, Some(0));
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "");
        assert!(!out.timed_out);
    }

    #[test]
    fn captures_stderr_and_exit_code() {
        let out = sh("printf oops >&2; exit 3").run().unwrap();
        assert!(!out.success());
        assert_eq!(out.code, Some(3));
        assert_eq!(out.exit_code(), 3);
        assert_eq!(out.stderr, "oops");
    }

    #[test]
    fn pipes_stdin_through() {
        let out = sh("cat").stdin("ping").run().unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "ping");
    }

    #[test]
    fn stdin_closed_when_not_provided() {
        // cat with a closed stdin reads EOF immediately instead of
        // blocking on the server's terminal.
        let out = sh("cat").run().unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "");
    }

    #[test]
    fn respects_working_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let expected = dir.path().canonicalize().unwrap();
        let out = sh("pwd").current_dir(dir.path()).run().unwrap();
        assert_eq!(out.stdout.trim(), expected.to_string_lossy());
    }

    #[test]
    fn deadline_kills_child() {
        let start = Instant::now();
        let out = sh("sleep 30")
            .timeout(Duration::from_millis(100))
            .run()
            .unwrap();
        assert!(out.timed_out);
        assert!(!out.success());
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn deadline_kills_whole_tree() {
        // The backgrounded sleep inherits the stdout pipe. If only the
        // shell died, draining stdout would block until the grandchild
        // exited on its own, far past the assertion below.
        let start = Instant::now();
        let out = sh("sleep 30 & sleep 30")
            .timeout(Duration::from_millis(100))
            .run()
            .unwrap();
        assert!(out.timed_out);
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn deadline_bounds_drain_after_clean_exit() {
        // The shell exits zero immediately, but the backgrounded sleep
        // inherits the stdout pipe and keeps it open. The drain must
        // hit the same deadline and kill the straggler instead of
        // waiting out its EOF.
        let start = Instant::now();
        let out = sh("sleep 30 & exit 0")
            .timeout(Duration::from_millis(300))
            .run()
            .unwrap();
        assert!(out.timed_out);
        assert!(!out.success());
        assert_eq!(out.code, Some(0));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let err = BoundedCommand::new("/definitely/not/a/real/binary")
            .run()
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[test]
    fn signal_death_reported() {
        let out = sh("kill -9 $$").run().unwrap();
        assert!(!out.timed_out);
        assert_eq!(out.code, None);
        assert_eq!(out.signal, Some(9));
        assert_eq!(out.exit_code(), -9);
    }
}
